//! Template and command-line parsers.
//!
//! This module provides parsing for argument templates: property
//! placeholders, function calls with literal arguments, placeholder formats,
//! and the splitting of expanded steps into process arguments.

pub mod ast;
pub mod error;
mod call;
mod command_line;
mod format;
mod literal;
mod template;

pub use ast::*;
pub use call::scan_calls;
pub use command_line::split_command_line;
pub use error::ParseError;
pub use format::parse_format_spec;
pub use literal::{ParsedArguments, parse_arguments, parse_literal};
pub use template::parse_template;
