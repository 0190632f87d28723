//! Placeholder substitution.
//!
//! Runs once over the parsed template, before any function call is scanned.
//! Property values are inserted verbatim, so a value that happens to look
//! like `{fn(args)}` is scanned as a call afterwards.

use crate::interpreter::context::ExpansionContext;
use crate::interpreter::error::TemplateError;
use crate::parser::{Align, FormatSpec, Segment, Template, parse_format_spec};

/// Replace every placeholder in `template` with its formatted property value.
pub fn substitute(template: &Template, ctx: &mut ExpansionContext<'_>) -> Result<String, TemplateError> {
    let mut output = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::Placeholder { name, format } => {
                let spec = format
                    .as_deref()
                    .map(|spec| {
                        parse_format_spec(spec).map_err(|_| TemplateError::InvalidFormatSpec {
                            property: name.clone(),
                            spec: spec.to_string(),
                        })
                    })
                    .transpose()?;
                // Unknown properties stay empty, ignoring width and fill.
                match (ctx.property(name)?, spec) {
                    (Some(value), Some(spec)) => output.push_str(&apply_format(value, &spec)),
                    (Some(value), None) => output.push_str(value),
                    (None, _) => {}
                }
            }
        }
    }
    Ok(output)
}

/// Format `value` according to `spec`.
///
/// Width and precision count `char`s. Without an explicit alignment,
/// integers are right-aligned and other text left-aligned. The `0` flag
/// without an alignment pads with zeros after the sign; with an alignment
/// it pads with zeros on the aligned side.
///
/// # Example
///
/// ```
/// use batchx::interpreter::apply_format;
/// use batchx::parser::parse_format_spec;
///
/// let spec = parse_format_spec("05").unwrap();
/// assert_eq!(apply_format("-42", &spec), "-0042");
///
/// let spec = parse_format_spec("*^7.3").unwrap();
/// assert_eq!(apply_format("episode", &spec), "**epi**");
/// ```
pub fn apply_format(value: &str, spec: &FormatSpec) -> String {
    let value: String = match spec.precision {
        Some(precision) => value.chars().take(precision).collect(),
        None => value.to_string(),
    };
    let pad = spec
        .width
        .unwrap_or(0)
        .saturating_sub(value.chars().count());
    if pad == 0 {
        return value;
    }

    if spec.zero_pad && spec.align.is_none() {
        let (sign, digits) = split_sign(&value);
        return format!("{sign}{}{digits}", "0".repeat(pad));
    }

    let fill = if spec.zero_pad { '0' } else { spec.fill };
    let align = spec.align.unwrap_or(if value.parse::<i64>().is_ok() {
        Align::Right
    } else {
        Align::Left
    });
    let (before, after) = match align {
        Align::Left => (0, pad),
        Align::Right => (pad, 0),
        Align::Center => {
            let before = pad.div_euclid(2);
            (before, pad - before)
        }
    };

    let mut output = String::with_capacity(value.len() + pad * fill.len_utf8());
    output.extend((0..before).map(|_| fill));
    output.push_str(&value);
    output.extend((0..after).map(|_| fill));
    output
}

fn split_sign(value: &str) -> (&str, &str) {
    match value.chars().next() {
        Some('+' | '-') => value.split_at(1),
        _ => ("", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::error::ExpansionWarning;
    use crate::parser::parse_template;
    use crate::properties;
    use crate::types::{NoProperties, PropertySource};

    fn format(value: &str, spec: &str) -> String {
        apply_format(value, &parse_format_spec(spec).unwrap())
    }

    #[test]
    fn default_alignment_depends_on_value() {
        assert_eq!(format("42", "5"), "   42");
        assert_eq!(format("ab", "5"), "ab   ");
    }

    #[test]
    fn explicit_alignment_and_fill() {
        assert_eq!(format("ab", ">5"), "   ab");
        assert_eq!(format("ab", "-<5"), "ab---");
        assert_eq!(format("ab", "^5"), " ab  ");
        assert_eq!(format("7", "<03"), "700");
    }

    #[test]
    fn zero_pad_keeps_sign_first() {
        assert_eq!(format("7", "03"), "007");
        assert_eq!(format("+7", "04"), "+007");
    }

    #[test]
    fn precision_truncates_chars() {
        assert_eq!(format("héllo", ".2"), "hé");
        assert_eq!(format("abc", ".0"), "");
    }

    #[test]
    fn value_wider_than_width_is_untouched() {
        assert_eq!(format("abcdef", "3"), "abcdef");
    }

    fn substitute_with<'a>(
        template: &str,
        properties: &'a dyn PropertySource,
    ) -> (String, ExpansionContext<'a>) {
        let mut ctx = ExpansionContext::new(properties);
        let text = substitute(&parse_template(template), &mut ctx).unwrap();
        (text, ctx)
    }

    #[test]
    fn unknown_property_with_format_renders_empty() {
        let (text, ctx) = substitute_with("[{Missing:>5}][{Missing:05}]", &NoProperties);
        assert_eq!(text, "[][]");
        assert_eq!(
            ctx.warnings(),
            [ExpansionWarning::UnknownProperty {
                name: "Missing".into()
            }]
        );
    }

    #[test]
    fn known_property_is_formatted() {
        let properties = properties! { "Take" => 7 };
        let (text, ctx) = substitute_with("t{Take:03}", &properties);
        assert_eq!(text, "t007");
        assert!(ctx.warnings().is_empty());
    }
}
