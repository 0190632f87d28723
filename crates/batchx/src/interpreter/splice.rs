//! Span replacement over an immutable source string.

use crate::types::Span;

/// Replace the text at `span` with `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Replacement<'a> {
    pub span: Span,
    pub value: &'a str,
}

/// Apply `replacements` to `source`, left to right.
///
/// Spans refer to `source` and must not overlap. The output is built from
/// the untouched source, so each replacement shifts every later one by
/// `value.len() - span.len` without re-scanning.
pub(crate) fn splice(source: &str, replacements: &[Replacement<'_>]) -> String {
    let mut ordered: Vec<&Replacement<'_>> = replacements.iter().collect();
    ordered.sort_by_key(|r| r.span.start);

    let growth: usize = ordered.iter().map(|r| r.value.len()).sum();
    let mut output = String::with_capacity(source.len() + growth);
    let mut cursor = 0;
    for replacement in ordered {
        debug_assert!(
            replacement.span.start >= cursor,
            "overlapping replacement at {}",
            replacement.span.start
        );
        output.push_str(&source[cursor..replacement.span.start]);
        output.push_str(replacement.value);
        cursor = replacement.span.end();
    }
    output.push_str(&source[cursor..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longer_value_shifts_later_spans() {
        let source = "a {x} b {y} c";
        let out = splice(
            source,
            &[
                Replacement {
                    span: Span::new(2, 3),
                    value: "1000",
                },
                Replacement {
                    span: Span::new(8, 3),
                    value: "2",
                },
            ],
        );
        assert_eq!(out, "a 1000 b 2 c");
    }

    #[test]
    fn shorter_value_and_unsorted_input() {
        let source = "{first}-{second}";
        let out = splice(
            source,
            &[
                Replacement {
                    span: Span::new(8, 8),
                    value: "",
                },
                Replacement {
                    span: Span::new(0, 7),
                    value: "0-13",
                },
            ],
        );
        assert_eq!(out, "0-13-");
    }

    #[test]
    fn no_replacements_copies_source() {
        assert_eq!(splice("plain text", &[]), "plain text");
    }
}
