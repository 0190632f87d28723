//! Miette diagnostic wrapper for template expansion errors.

use batchx::types::FILE_PROPERTY_NAMES;
use batchx::{FunctionRegistry, TemplateError};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for template errors.
///
/// The source is the template after placeholder substitution, which is the
/// text call spans refer to.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("template error: {message}")]
#[diagnostic(code(batchx::template))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("in this call")]
    span: Option<SourceSpan>,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic for `err` raised while expanding `substituted`.
    pub fn from_template_error(
        substituted: &str,
        err: &TemplateError,
        registry: &FunctionRegistry,
    ) -> Self {
        // Clamp to the source to avoid a miette panic on out-of-bounds spans.
        let span = err.span().map(|span| {
            let start = span.start.min(substituted.len());
            let len = span.len.min(substituted.len() - start);
            SourceSpan::from((start, len))
        });

        let help = match err {
            TemplateError::UnresolvedFunction { .. } | TemplateError::MalformedArguments { .. } => {
                Some(format!("available functions: {}", describe_functions(registry)))
            }
            TemplateError::UnknownProperty { .. } => Some(format!(
                "file properties are {}",
                FILE_PROPERTY_NAMES.join(", ")
            )),
            TemplateError::InvalidFormatSpec { .. } => {
                Some("formats look like [[fill]align][0][width][.precision], e.g. {Name:>8}".into())
            }
            _ => None,
        };

        TemplateDiagnostic {
            src: NamedSource::new("template", substituted.to_string()),
            span,
            message: err.to_string(),
            help,
        }
    }
}

fn describe_functions(registry: &FunctionRegistry) -> String {
    registry
        .names()
        .iter()
        .flat_map(|name| {
            registry
                .overloads(name)
                .map(|def| format!("{}{}", def.name(), def.signature()))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .join(", ")
}
