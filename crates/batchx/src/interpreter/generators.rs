//! Built-in sequence generators.
//!
//! Every generator is a pure function of its arguments. The length of the
//! sequence depends only on the generator's own step count, never on the
//! other calls in the template.

use crate::interpreter::align::cyclic_pick;
use crate::interpreter::error::GeneratorError;
use crate::interpreter::registry::{FunctionRegistry, Signature};
use crate::types::{Literal, LiteralKind};

/// Upper bound on the length of any generated sequence.
pub const MAX_SEQUENCE_LENGTH: usize = 1_000_000;

const DEFAULT_OFFSETS: [i64; 1] = [0];

const INT: LiteralKind = LiteralKind::Integer;
const BOOL: LiteralKind = LiteralKind::Boolean;

/// Register `Number`, `Range` and `RangeLength`.
///
/// - `Number(numSteps, stepSize, offsets...)`
/// - `Range(numSteps, every, length)` and `Range(numSteps, every, offset, length)`
/// - `RangeLength(numSteps, every, offset, lengths...)` and
///   `RangeLength(numSteps, every, offset, collapse, lengths...)`
pub(crate) fn register_builtins(registry: &mut FunctionRegistry) {
    registry.register("Number", Signature::variadic(&[INT, INT], INT), number_fn);
    registry.register("Range", Signature::fixed(&[INT, INT, INT]), range3_fn);
    registry.register("Range", Signature::fixed(&[INT, INT, INT, INT]), range4_fn);
    registry.register(
        "RangeLength",
        Signature::variadic(&[INT, INT, INT], INT),
        range_length_fn,
    );
    registry.register(
        "RangeLength",
        Signature::variadic(&[INT, INT, INT, BOOL], INT),
        range_length_collapse_fn,
    );
}

/// `numSteps` values: `offsets` repeated over bases `0, stepSize, 2*stepSize, ...`.
///
/// `offsets` defaults to `[0]`. Each base emits one value per offset, in
/// order, and the result is truncated to `num_steps`.
///
/// # Example
///
/// ```
/// use batchx::interpreter::number;
///
/// assert_eq!(number(9, 10, &[3, 6, 7]).unwrap(), vec![3, 6, 7, 13, 16, 17, 23, 26, 27]);
/// assert_eq!(number(4, 2, &[]).unwrap(), vec![0, 2, 4, 6]);
/// ```
pub fn number(num_steps: i64, step_size: i64, offsets: &[i64]) -> Result<Vec<i64>, GeneratorError> {
    let count = step_count(num_steps)?;
    let offsets = if offsets.is_empty() {
        &DEFAULT_OFFSETS[..]
    } else {
        offsets
    };
    let cycles = count.div_ceil(offsets.len());

    let mut values = Vec::with_capacity(count);
    'cycles: for cycle in 0..cycles {
        let base = i64::try_from(cycle)
            .ok()
            .and_then(|c| c.checked_mul(step_size))
            .ok_or(GeneratorError::Overflow)?;
        for offset in offsets {
            if values.len() == count {
                break 'cycles;
            }
            values.push(base.checked_add(*offset).ok_or(GeneratorError::Overflow)?);
        }
    }
    Ok(values)
}

/// `"start-end"` ranges of `length` values starting at `number(num_steps, every, [offset])`.
///
/// # Example
///
/// ```
/// use batchx::interpreter::range;
///
/// assert_eq!(range(3, 280, 0, 14).unwrap(), vec!["0-13", "280-293", "560-573"]);
/// ```
pub fn range(
    num_steps: i64,
    every: i64,
    offset: i64,
    length: i64,
) -> Result<Vec<String>, GeneratorError> {
    if length < 1 {
        return Err(GeneratorError::NonPositiveLength {
            parameter: "length",
            value: length,
        });
    }
    number(num_steps, every, &[offset])?
        .into_iter()
        .map(|start| Ok(format!("{start}-{}", range_end(start, length)?)))
        .collect()
}

/// Like [`range`], but the `i`-th range takes its length from `lengths`
/// cyclically. With `collapse`, single-value ranges render as `"start"`.
///
/// # Example
///
/// ```
/// use batchx::interpreter::range_length;
///
/// assert_eq!(
///     range_length(4, 10, 1, true, &[1, 3]).unwrap(),
///     vec!["1", "11-13", "21", "31-33"],
/// );
/// ```
pub fn range_length(
    num_steps: i64,
    every: i64,
    offset: i64,
    collapse: bool,
    lengths: &[i64],
) -> Result<Vec<String>, GeneratorError> {
    if lengths.is_empty() {
        return Err(GeneratorError::MissingLengths);
    }
    if let Some(&value) = lengths.iter().find(|&&l| l < 1) {
        return Err(GeneratorError::NonPositiveLength {
            parameter: "lengths",
            value,
        });
    }

    number(num_steps, every, &[offset])?
        .into_iter()
        .enumerate()
        .map(|(index, start)| {
            let length = lengths[cyclic_pick(index + 1, lengths.len()) - 1];
            let end = range_end(start, length)?;
            if collapse && start == end {
                Ok(start.to_string())
            } else {
                Ok(format!("{start}-{end}"))
            }
        })
        .collect()
}

/// Validate a step count argument and convert it to a length.
fn step_count(num_steps: i64) -> Result<usize, GeneratorError> {
    let count = usize::try_from(num_steps)
        .map_err(|_| GeneratorError::NegativeSteps { value: num_steps })?;
    if count > MAX_SEQUENCE_LENGTH {
        return Err(GeneratorError::TooManyValues {
            value: num_steps,
            max: MAX_SEQUENCE_LENGTH,
        });
    }
    Ok(count)
}

/// Last value of a range of `length >= 1` values starting at `start`.
fn range_end(start: i64, length: i64) -> Result<i64, GeneratorError> {
    start
        .checked_add(length - 1)
        .ok_or(GeneratorError::Overflow)
}

// Registry adapters. The registry has already checked the argument kinds;
// the accessors below only guard against a mismatched registration.

fn number_fn(args: &[Literal]) -> Result<Vec<String>, GeneratorError> {
    let values = number(integer_at(args, 0)?, integer_at(args, 1)?, &integers_from(args, 2)?)?;
    Ok(values.iter().map(ToString::to_string).collect())
}

fn range3_fn(args: &[Literal]) -> Result<Vec<String>, GeneratorError> {
    range(integer_at(args, 0)?, integer_at(args, 1)?, 0, integer_at(args, 2)?)
}

fn range4_fn(args: &[Literal]) -> Result<Vec<String>, GeneratorError> {
    range(
        integer_at(args, 0)?,
        integer_at(args, 1)?,
        integer_at(args, 2)?,
        integer_at(args, 3)?,
    )
}

fn range_length_fn(args: &[Literal]) -> Result<Vec<String>, GeneratorError> {
    range_length(
        integer_at(args, 0)?,
        integer_at(args, 1)?,
        integer_at(args, 2)?,
        false,
        &integers_from(args, 3)?,
    )
}

fn range_length_collapse_fn(args: &[Literal]) -> Result<Vec<String>, GeneratorError> {
    range_length(
        integer_at(args, 0)?,
        integer_at(args, 1)?,
        integer_at(args, 2)?,
        boolean_at(args, 3)?,
        &integers_from(args, 4)?,
    )
}

fn integer_at(args: &[Literal], position: usize) -> Result<i64, GeneratorError> {
    args.get(position)
        .and_then(Literal::as_integer)
        .ok_or(GeneratorError::ArgumentKind {
            position,
            expected: LiteralKind::Integer,
        })
}

fn boolean_at(args: &[Literal], position: usize) -> Result<bool, GeneratorError> {
    args.get(position)
        .and_then(Literal::as_boolean)
        .ok_or(GeneratorError::ArgumentKind {
            position,
            expected: LiteralKind::Boolean,
        })
}

fn integers_from(args: &[Literal], start: usize) -> Result<Vec<i64>, GeneratorError> {
    (start..args.len())
        .map(|position| integer_at(args, position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_fn_renders_integers() {
        let args = [Literal::Integer(3), Literal::Integer(5), Literal::Integer(1)];
        assert_eq!(number_fn(&args).unwrap(), vec!["1", "6", "11"]);
    }

    #[test]
    fn adapters_reject_misregistered_kinds() {
        let args = [Literal::Integer(3), Literal::Boolean(true), Literal::Integer(1)];
        assert_eq!(
            range3_fn(&args),
            Err(GeneratorError::ArgumentKind {
                position: 1,
                expected: LiteralKind::Integer,
            })
        );
    }

    #[test]
    fn step_count_bounds() {
        assert_eq!(step_count(0), Ok(0));
        assert_eq!(
            step_count(-1),
            Err(GeneratorError::NegativeSteps { value: -1 })
        );
        assert!(matches!(
            step_count(i64::MAX),
            Err(GeneratorError::TooManyValues { .. })
        ));
    }
}
