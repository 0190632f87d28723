//! Step alignment: synchronizing independently sized sequences.

use crate::interpreter::splice::Replacement;
use crate::types::Span;

/// One-based cyclic index: `((value - 1) mod count) + 1`.
///
/// # Panics
///
/// Panics if `value` or `count` is zero.
///
/// # Example
///
/// ```
/// use batchx::interpreter::cyclic_pick;
///
/// assert_eq!(cyclic_pick(15, 5), 5);
/// assert_eq!(cyclic_pick(3, 2), 1);
/// ```
pub fn cyclic_pick(value: usize, count: usize) -> usize {
    ((value - 1) % count) + 1
}

/// A resolved call and the sequence its generator produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CallValues {
    pub span: Span,
    pub values: Vec<String>,
}

/// Total step count: the longest sequence, or one step when there are no calls.
pub(crate) fn step_count(calls: &[CallValues]) -> usize {
    calls.iter().map(|c| c.values.len()).max().unwrap_or(1)
}

/// The replacement each call contributes to `step`.
///
/// Shorter sequences wrap around modulo their own length. Every sequence
/// must be non-empty.
pub(crate) fn step_replacements(calls: &[CallValues], step: usize) -> Vec<Replacement<'_>> {
    calls
        .iter()
        .map(|call| Replacement {
            span: call.span,
            value: &call.values[step % call.values.len()],
        })
        .collect()
}
