//! Function argument parser using winnow.
//!
//! Each comma separated argument is tried, in order, as an integer, a quoted
//! string and a boolean. Quoted strings may only contain lowercase ASCII
//! letters, digits and whitespace. Arguments matching none of these shapes
//! are dropped rather than rejected.

use winnow::ascii::{Caseless, digit1};
use winnow::combinator::{alt, delimited, opt};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::types::Literal;

/// The result of parsing a call's argument text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments {
    pub literals: Vec<Literal>,
    /// Non-blank argument text that matched no literal shape.
    pub skipped: Vec<String>,
}

/// Parse the text between a call's parentheses into literals.
pub fn parse_arguments(raw: &str) -> ParsedArguments {
    let mut parsed = ParsedArguments::default();
    for piece in raw.split(',') {
        let piece = piece.trim();
        match parse_literal(piece) {
            Some(literal) => parsed.literals.push(literal),
            None if piece.is_empty() => {}
            None => parsed.skipped.push(piece.to_string()),
        }
    }
    parsed
}

/// Parse a single, already trimmed argument.
pub fn parse_literal(text: &str) -> Option<Literal> {
    literal.parse(text).ok()
}

fn literal(input: &mut &str) -> ModalResult<Literal> {
    alt((integer, text, boolean)).parse_next(input)
}

/// Parse an optionally signed decimal integer.
fn integer(input: &mut &str) -> ModalResult<Literal> {
    (opt(one_of(['+', '-'])), digit1)
        .take()
        .try_map(str::parse::<i64>)
        .map(Literal::Integer)
        .parse_next(input)
}

/// Parse a double-quoted string of lowercase letters, digits and whitespace.
fn text(input: &mut &str) -> ModalResult<Literal> {
    delimited('"', take_while(0.., is_text_char), '"')
        .map(|s: &str| Literal::Text(s.to_string()))
        .parse_next(input)
}

fn boolean(input: &mut &str) -> ModalResult<Literal> {
    alt((Caseless("true").value(true), Caseless("false").value(false)))
        .map(Literal::Boolean)
        .parse_next(input)
}

fn is_text_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace()
}
