mod literal;
mod properties;
mod span;

pub use literal::{Literal, LiteralKind, describe_shape};
pub use properties::{FILE_PROPERTY_NAMES, FileProperties, NoProperties, PropertySource};
pub use span::Span;
