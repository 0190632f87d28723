//! Integration tests for placeholder, format and call parsing.

use batchx::parser::{
    Align, FormatSpec, ParseError, Segment, parse_format_spec, parse_template, scan_calls,
};
use batchx::{Literal, Span};

// =============================================================================
// Placeholders
// =============================================================================

#[test]
fn parse_placeholders_and_literals() {
    let t = parse_template(r#"-i "{DirectoryName}\{Name}.{Extension}""#);
    assert_eq!(
        t.segments,
        vec![
            Segment::Literal("-i \"".into()),
            Segment::Placeholder {
                name: "DirectoryName".into(),
                format: None,
            },
            Segment::Literal("\\".into()),
            Segment::Placeholder {
                name: "Name".into(),
                format: None,
            },
            Segment::Literal(".".into()),
            Segment::Placeholder {
                name: "Extension".into(),
                format: None,
            },
            Segment::Literal("\"".into()),
        ]
    );
}

#[test]
fn parse_placeholder_with_format() {
    let t = parse_template("{Name:>10}");
    assert_eq!(
        t.segments,
        vec![Segment::Placeholder {
            name: "Name".into(),
            format: Some(">10".into()),
        }]
    );
}

#[test]
fn calls_and_stray_braces_stay_literal() {
    let t = parse_template("{ } {number(1, 1)} {} {Name");
    assert_eq!(
        t.segments,
        vec![Segment::Literal("{ } {number(1, 1)} {} {Name".into())]
    );
}

#[test]
fn empty_template_has_no_segments() {
    assert!(parse_template("").segments.is_empty());
}

// =============================================================================
// Format Specs
// =============================================================================

#[test]
fn parse_full_format_spec() {
    assert_eq!(
        parse_format_spec("*^08.3"),
        Ok(FormatSpec {
            fill: '*',
            align: Some(Align::Center),
            zero_pad: true,
            width: Some(8),
            precision: Some(3),
        })
    );
}

#[test]
fn parse_width_only() {
    assert_eq!(
        parse_format_spec("4"),
        Ok(FormatSpec {
            width: Some(4),
            ..FormatSpec::default()
        })
    );
}

#[test]
fn parse_invalid_format_reports_column() {
    assert_eq!(
        parse_format_spec("5x"),
        Err(ParseError::InvalidFormat {
            spec: "5x".into(),
            column: 2,
        })
    );
}

// =============================================================================
// Call Scanning
// =============================================================================

#[test]
fn scan_calls_records_spans_in_order() {
    let input = "a {Number(2, 1)} b {range(1,2,3)}";
    let calls = scan_calls(input);
    assert_eq!(calls.len(), 2);

    assert_eq!(calls[0].name, "Number");
    assert_eq!(calls[0].args, vec![Literal::Integer(2), Literal::Integer(1)]);
    assert_eq!(calls[0].span, Span::new(2, 14));
    assert_eq!(&input[calls[0].span.range()], "{Number(2, 1)}");

    assert_eq!(calls[1].name, "range");
    assert_eq!(&input[calls[1].span.range()], "{range(1,2,3)}");
}

#[test]
fn scan_calls_allows_whitespace_around_name() {
    let calls = scan_calls("{  number (3, 1)}");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "number");
    assert_eq!(calls[0].span, Span::new(0, 17));
}

#[test]
fn scan_calls_ignores_incomplete_calls() {
    assert!(scan_calls("{number(1, 2} {Name}").is_empty());
    assert!(scan_calls("{9(1)} {(1)}").is_empty());
}

#[test]
fn scan_calls_arguments_end_at_first_closing_pair() {
    // The unclosed call swallows text up to the next `)}`.
    let input = "{number(1, 2} {range(3, 4)}";
    let calls = scan_calls(input);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "number");
    assert_eq!(calls[0].span, Span::new(0, input.len()));
}

#[test]
fn scan_calls_keeps_skipped_arguments() {
    let calls = scan_calls("{number(2, x, 1)}");
    assert_eq!(calls[0].args, vec![Literal::Integer(2), Literal::Integer(1)]);
    assert_eq!(calls[0].skipped, vec!["x"]);
}

#[test]
fn scan_calls_inside_a_longer_token() {
    let input = "dvdnav://{number(2, 1, 1, 1)} -dumpfile {number(2, 1, 1)}.vob";
    let calls = scan_calls(input);
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].span.start, 9);
    assert_eq!(&input[calls[1].span.range()], "{number(2, 1, 1)}");
}
