//! Public AST types for argument templates.
//!
//! These types are public so tooling (previews, linters) can inspect a
//! template without expanding it.

use crate::types::{Literal, Span};

/// A template split into literal text and property placeholders.
///
/// Function calls are not part of this tree: they are located by the call
/// scanner after placeholders have been substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, including braces that form no placeholder.
    Literal(String),
    /// A property placeholder: `{Name}` or `{Name:format}`.
    Placeholder {
        name: String,
        /// Raw format text after the colon.
        format: Option<String>,
    },
}

/// One `{name(args)}` occurrence found by the call scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    /// Function name as written; resolution is case-insensitive.
    pub name: String,
    /// Recognised arguments in source order.
    pub args: Vec<Literal>,
    /// Argument text that matched no literal shape and was dropped.
    pub skipped: Vec<String>,
    /// Byte span of the whole call, braces included.
    pub span: Span,
}

/// Alignment of a padded placeholder value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

/// A parsed placeholder format: `[[fill]align][0][width][.precision]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    pub fill: char,
    pub align: Option<Align>,
    /// Pad with zeros after the sign.
    pub zero_pad: bool,
    pub width: Option<usize>,
    /// Maximum number of characters kept from the value.
    pub precision: Option<usize>,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            fill: ' ',
            align: None,
            zero_pad: false,
            width: None,
            precision: None,
        }
    }
}
