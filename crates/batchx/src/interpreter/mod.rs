//! Template expansion engine.
//!
//! This module turns a parsed argument template into a list of fully
//! resolved argument strings. It substitutes property placeholders, resolves
//! function calls against the registry, aligns the generated sequences into
//! steps and splices each step's values back into the text.

mod align;
mod context;
mod error;
mod expander;
mod generators;
mod registry;
mod splice;
mod substitute;

pub use align::cyclic_pick;
pub use context::ExpansionContext;
pub use error::{
    ExpansionWarning, GeneratorError, TemplateError, UnresolvedReason, compute_suggestions,
};
pub use expander::{DEFAULT_MAX_STEPS, ExpansionResult, Expander, expand};
pub use generators::{MAX_SEQUENCE_LENGTH, number, range, range_length};
pub use registry::{FunctionDef, FunctionRegistry, GeneratorFn, ResolveError, Signature};
pub use substitute::{apply_format, substitute};
