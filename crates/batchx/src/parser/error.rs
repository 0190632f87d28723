//! Parse error types for batchx.

use thiserror::Error;

/// An error that occurred during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A placeholder format that does not follow `[[fill]align][0][width][.precision]`.
    #[error("invalid format '{spec}' at column {column}")]
    InvalidFormat { spec: String, column: usize },

    /// A double quote in a command line that is never closed.
    #[error("unterminated quote at column {column}")]
    UnterminatedQuote { column: usize },
}
