//! Template placeholder parser using winnow.
//!
//! Splits a template into literal text and property placeholders:
//! - `{Name}` and `{Name:format}` become placeholders
//! - everything else, including `{fn(args)}` calls and stray braces, stays
//!   literal text for the call scanner to inspect after substitution

use winnow::combinator::{alt, delimited, opt, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{one_of, take_till, take_while};

use super::ast::*;

/// Parse a template string into literal and placeholder segments.
///
/// The grammar accepts every input, so this never fails.
pub fn parse_template(input: &str) -> Template {
    match template.parse(input) {
        Ok(t) => t,
        Err(_) => Template {
            segments: vec![Segment::Literal(input.to_string())],
        },
    }
}

fn template(input: &mut &str) -> ModalResult<Template> {
    let segments: Vec<Segment> = repeat(0.., segment).parse_next(input)?;
    Ok(Template {
        segments: merge_literals(segments),
    })
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Parse a single segment (placeholder, literal run, or a lone brace).
fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((placeholder, literal_run, open_brace)).parse_next(input)
}

/// Parse a run of text up to the next `{`.
fn literal_run(input: &mut &str) -> ModalResult<Segment> {
    take_till(1.., '{')
        .map(|s: &str| Segment::Literal(s.to_string()))
        .parse_next(input)
}

/// A `{` that does not open a placeholder.
fn open_brace(input: &mut &str) -> ModalResult<Segment> {
    '{'.value(Segment::Literal("{".to_string()))
        .parse_next(input)
}

/// Parse a placeholder: `{identifier}` or `{identifier:format}`.
fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    delimited(
        '{',
        (identifier, opt(preceded(':', take_till(1.., '}')))),
        '}',
    )
    .map(|(name, format): (&str, Option<&str>)| Segment::Placeholder {
        name: name.to_string(),
        format: format.map(str::to_string),
    })
    .parse_next(input)
}

/// Parse an identifier: a letter or `_`, then letters, digits or `_`.
pub(crate) fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (one_of(is_ident_start), take_while(0.., is_ident_cont))
        .take()
        .parse_next(input)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_cont(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_brace_fallback_into_surrounding_text() {
        let t = parse_template("a {b(1)} c");
        assert_eq!(t.segments, vec![Segment::Literal("a {b(1)} c".into())]);
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        let t = parse_template("{Name");
        assert_eq!(t.segments, vec![Segment::Literal("{Name".into())]);
    }
}
