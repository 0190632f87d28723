//! Placeholder format parser: `[[fill]align][0][width][.precision]`.

use winnow::ascii::digit1;
use winnow::combinator::{alt, opt, preceded};
use winnow::prelude::*;
use winnow::token::any;

use super::ast::{Align, FormatSpec};
use super::error::ParseError;

/// Parse the text after the colon of a `{Name:format}` placeholder.
pub fn parse_format_spec(spec: &str) -> Result<FormatSpec, ParseError> {
    format_spec.parse(spec).map_err(|e| ParseError::InvalidFormat {
        spec: spec.to_string(),
        column: e.offset() + 1,
    })
}

fn format_spec(input: &mut &str) -> ModalResult<FormatSpec> {
    let fill_align = opt(alt((
        (any, align).map(|(fill, align)| (Some(fill), align)),
        align.map(|align| (None, align)),
    )))
    .parse_next(input)?;
    let zero_pad = opt('0').parse_next(input)?.is_some();
    let width = opt(count).parse_next(input)?;
    let precision = opt(preceded('.', count)).parse_next(input)?;

    let (fill, align) = match fill_align {
        Some((fill, align)) => (fill.unwrap_or(' '), Some(align)),
        None => (' ', None),
    };
    Ok(FormatSpec {
        fill,
        align,
        zero_pad,
        width,
        precision,
    })
}

fn align(input: &mut &str) -> ModalResult<Align> {
    alt((
        '<'.value(Align::Left),
        '>'.value(Align::Right),
        '^'.value(Align::Center),
    ))
    .parse_next(input)
}

fn count(input: &mut &str) -> ModalResult<usize> {
    digit1.try_map(str::parse::<usize>).parse_next(input)
}
