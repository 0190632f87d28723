//! Function call scanner.
//!
//! Finds every `{name(args)}` occurrence in a template, left to right. The
//! argument text is matched non-greedily up to the first `)}`.

use winnow::combinator::{preceded, terminated};
use winnow::prelude::*;
use winnow::token::{take_until, take_while};

use super::ast::FunctionCall;
use super::literal::parse_arguments;
use super::template::identifier;
use crate::types::Span;

/// Scan `input` for function calls.
///
/// Spans are byte offsets into `input`. Text that looks like the start of a
/// call but never completes is skipped.
pub fn scan_calls(input: &str) -> Vec<FunctionCall> {
    let mut calls = Vec::new();
    let mut offset = 0;

    while let Some(found) = input[offset..].find('{') {
        let start = offset + found;
        let mut rest = &input[start..];
        match call_syntax.parse_next(&mut rest) {
            Ok((name, raw_args)) => {
                let end = input.len() - rest.len();
                let parsed = parse_arguments(raw_args);
                calls.push(FunctionCall {
                    name: name.to_string(),
                    args: parsed.literals,
                    skipped: parsed.skipped,
                    span: Span::new(start, end - start),
                });
                offset = end;
            }
            Err(_) => offset = start + 1,
        }
    }

    calls
}

/// Parse `{ name ( args )}`, returning the name and the raw argument text.
fn call_syntax<'i>(input: &mut &'i str) -> ModalResult<(&'i str, &'i str)> {
    preceded(
        ('{', ws),
        (
            terminated(identifier, (ws, '(')),
            terminated(take_until(0.., ")}"), ")}"),
        ),
    )
    .parse_next(input)
}

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}
