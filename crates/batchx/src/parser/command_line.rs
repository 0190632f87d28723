//! Splits an expanded argument string into process arguments.
//!
//! Rules:
//! - whitespace separates words
//! - double quotes group text and are removed
//! - `\"` is a literal quote, inside or outside quotes
//! - every other backslash is literal, so `C:\dir\file` survives

use winnow::combinator::{alt, cut_err, delimited, preceded, repeat, terminated};
use winnow::prelude::*;
use winnow::token::{none_of, take_while};

use super::error::ParseError;

/// Split a command line into words.
///
/// # Example
///
/// ```
/// use batchx::parser::split_command_line;
///
/// let words = split_command_line(r#"-i "C:\My Videos\a.ts" -hide"#).unwrap();
/// assert_eq!(words, vec!["-i", r"C:\My Videos\a.ts", "-hide"]);
/// ```
pub fn split_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    words
        .parse(input)
        .map_err(|e| ParseError::UnterminatedQuote {
            column: e.offset() + 1,
        })
}

fn words(input: &mut &str) -> ModalResult<Vec<String>> {
    preceded(ws, repeat(0.., terminated(word, ws))).parse_next(input)
}

/// A word is one or more adjacent parts with no whitespace between them.
fn word(input: &mut &str) -> ModalResult<String> {
    repeat(1.., part)
        .fold(String::new, |mut acc, piece: String| {
            acc.push_str(&piece);
            acc
        })
        .parse_next(input)
}

fn part(input: &mut &str) -> ModalResult<String> {
    alt((escaped_quote, quoted, bare, backslash)).parse_next(input)
}

fn escaped_quote(input: &mut &str) -> ModalResult<String> {
    "\\\"".value("\"".to_string()).parse_next(input)
}

/// A double-quoted run; once the quote opens it must be closed.
fn quoted(input: &mut &str) -> ModalResult<String> {
    delimited(
        '"',
        repeat(0.., alt(("\\\"".value('"'), none_of(['"']))))
            .fold(String::new, |mut acc, c: char| {
                acc.push(c);
                acc
            }),
        cut_err('"'),
    )
    .parse_next(input)
}

fn bare(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |c: char| !c.is_whitespace() && c != '"' && c != '\\')
        .map(str::to_string)
        .parse_next(input)
}

fn backslash(input: &mut &str) -> ModalResult<String> {
    '\\'.value("\\".to_string()).parse_next(input)
}

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace).void().parse_next(input)
}
