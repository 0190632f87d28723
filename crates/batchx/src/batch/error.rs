//! Error types for the program store, input collection and the runner.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::interpreter::TemplateError;
use crate::parser::ParseError;

/// Failure reading or writing the program store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid program store '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode program store: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

/// Failure walking an input path.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("cannot read input '{path}': {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Failure running a program over a file.
///
/// Only [`RunError::NotRunnable`] aborts a whole run; the other variants
/// fail the file they occur in and are recorded in its report.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("program '{name}' needs an executable and an argument template")]
    NotRunnable { name: String },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("step {step}: {source}")]
    UnterminatedQuote {
        step: usize,
        #[source]
        source: ParseError,
    },

    #[error("step {step}: failed to launch '{executable}': {source}")]
    Launch {
        step: usize,
        executable: String,
        #[source]
        source: io::Error,
    },
}
