use std::fmt::{Display, Formatter, Result as FmtResult};

/// A typed argument to a template function call.
///
/// Function arguments are restricted to three shapes: integers, lowercase
/// quoted strings and booleans. There are no floats and no nested
/// expressions.
///
/// # Example
///
/// ```
/// use batchx::{Literal, LiteralKind};
///
/// let count: Literal = 3.into();
/// assert_eq!(count.kind(), LiteralKind::Integer);
/// assert_eq!(count.as_integer(), Some(3));
///
/// let flag: Literal = true.into();
/// assert_eq!(flag.to_string(), "true");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// A signed decimal integer.
    Integer(i64),

    /// The contents of a double-quoted string, quotes removed.
    Text(String),

    /// `true` or `false`.
    Boolean(bool),
}

/// The kind of a [`Literal`], used to declare function signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Integer,
    Text,
    Boolean,
}

impl LiteralKind {
    /// Short name used in signatures and error messages.
    pub fn name(self) -> &'static str {
        match self {
            LiteralKind::Integer => "int",
            LiteralKind::Text => "string",
            LiteralKind::Boolean => "bool",
        }
    }
}

impl Display for LiteralKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl Literal {
    /// The kind of this literal.
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::Integer(_) => LiteralKind::Integer,
            Literal::Text(_) => LiteralKind::Text,
            Literal::Boolean(_) => LiteralKind::Boolean,
        }
    }

    /// Get this literal as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Literal::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this literal as a string, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get this literal as a boolean, if it is one.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Literal::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// Renders the kinds of `args` as a comma separated list, e.g. `int, int, bool`.
pub fn describe_shape(args: &[Literal]) -> String {
    args.iter()
        .map(|arg| arg.kind().name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Literal::Integer(n) => write!(f, "{n}"),
            Literal::Text(s) => write!(f, "\"{s}\""),
            Literal::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Integer(i64::from(n))
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Integer(n)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Boolean(b)
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Text(s)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Text(s.to_string())
    }
}
