//! Error and warning types for template expansion.

use std::fmt::{Display, Formatter, Result as FmtResult};

use strsim::levenshtein;
use thiserror::Error;

use crate::types::{LiteralKind, Span};

/// An error that aborts a template expansion.
///
/// Expansion never returns partial output: the first error wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// No single registered function accepts the call.
    #[error("unresolved function '{name}({shape})': {reason}")]
    UnresolvedFunction {
        name: String,
        shape: String,
        reason: UnresolvedReason,
        span: Span,
    },

    /// The function exists but the arguments do not fit any of its signatures.
    #[error("malformed arguments for '{name}({shape})', expected {expected}")]
    MalformedArguments {
        name: String,
        shape: String,
        expected: String,
        span: Span,
    },

    /// A function produced no values, so no step count can be derived.
    #[error("function '{name}' produced no values")]
    EmptySequence { name: String, span: Span },

    /// A function rejected its argument values.
    #[error("invalid arguments for '{name}': {source}")]
    InvalidGeneratorArguments {
        name: String,
        span: Span,
        #[source]
        source: GeneratorError,
    },

    /// A placeholder format could not be parsed.
    #[error("invalid format '{spec}' for property '{property}'")]
    InvalidFormatSpec { property: String, spec: String },

    /// A placeholder names an unknown property (strict mode only).
    #[error("unknown property '{name}'")]
    UnknownProperty { name: String },

    /// The template expands to more steps than allowed.
    #[error("template expands to {steps} steps, more than the maximum of {max}")]
    TooManySteps { steps: usize, max: usize },
}

impl TemplateError {
    /// Span of the offending call in the substituted template, if any.
    pub fn span(&self) -> Option<Span> {
        match self {
            TemplateError::UnresolvedFunction { span, .. }
            | TemplateError::MalformedArguments { span, .. }
            | TemplateError::EmptySequence { span, .. }
            | TemplateError::InvalidGeneratorArguments { span, .. } => Some(*span),
            TemplateError::InvalidFormatSpec { .. }
            | TemplateError::UnknownProperty { .. }
            | TemplateError::TooManySteps { .. } => None,
        }
    }
}

/// Why a call could not be resolved to a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// No function has this name.
    UnknownName { suggestions: Vec<String> },
    /// The name exists but no signature takes this many arguments.
    NoMatchingArity { arity: usize },
    /// More than one signature accepts the arguments.
    Ambiguous { candidates: usize },
}

impl Display for UnresolvedReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UnresolvedReason::UnknownName { suggestions } if suggestions.is_empty() => {
                write!(f, "unknown function")
            }
            UnresolvedReason::UnknownName { suggestions } => {
                write!(f, "unknown function, did you mean '{}'?", suggestions.join("', '"))
            }
            UnresolvedReason::NoMatchingArity { arity: 1 } => {
                write!(f, "no signature takes 1 argument")
            }
            UnresolvedReason::NoMatchingArity { arity } => {
                write!(f, "no signature takes {arity} arguments")
            }
            UnresolvedReason::Ambiguous { candidates } => {
                write!(f, "{candidates} signatures match")
            }
        }
    }
}

/// An error raised by a generator function for out-of-range argument values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("step count must not be negative, got {value}")]
    NegativeSteps { value: i64 },

    #[error("step count {value} exceeds the limit of {max}")]
    TooManyValues { value: i64, max: usize },

    #[error("{parameter} must be at least 1, got {value}")]
    NonPositiveLength { parameter: &'static str, value: i64 },

    #[error("at least one length is required")]
    MissingLengths,

    #[error("integer overflow while generating values")]
    Overflow,

    #[error("expected {expected} argument at position {position}")]
    ArgumentKind {
        position: usize,
        expected: LiteralKind,
    },
}

/// A non-fatal finding collected during expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpansionWarning {
    /// A placeholder named a property the source does not have.
    UnknownProperty { name: String },
    /// Argument text that matched no literal shape was dropped.
    SkippedArgument { function: String, text: String },
}

impl Display for ExpansionWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ExpansionWarning::UnknownProperty { name } => {
                write!(f, "unknown property '{name}' rendered as empty text")
            }
            ExpansionWarning::SkippedArgument { function, text } => {
                write!(f, "ignored argument '{text}' in call to '{function}'")
            }
        }
    }
}

/// Returns up to three names from `available` close to `target`, closest first.
///
/// Comparison is case-insensitive. Names within edit distance 1 qualify for
/// targets of three characters or fewer, distance 2 otherwise.
pub fn compute_suggestions(target: &str, available: &[String]) -> Vec<String> {
    let target = target.to_lowercase();
    let max_distance = if target.chars().count() <= 3 { 1 } else { 2 };

    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|name| (levenshtein(&target, &name.to_lowercase()), name))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    scored
        .into_iter()
        .take(3)
        .map(|(_, name)| name.clone())
        .collect()
}
