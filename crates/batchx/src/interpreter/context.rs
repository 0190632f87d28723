//! Expansion context carrying the property source and collected warnings.

use std::mem;

use crate::interpreter::error::{ExpansionWarning, TemplateError};
use crate::types::PropertySource;

/// State carried through one template expansion.
///
/// The context tracks:
/// - the property source placeholders are resolved against
/// - whether unknown properties are errors
/// - warnings collected so far, deduplicated in first-seen order
pub struct ExpansionContext<'a> {
    properties: &'a dyn PropertySource,
    strict: bool,
    warnings: Vec<ExpansionWarning>,
}

impl<'a> ExpansionContext<'a> {
    /// Create a lenient context: unknown properties render as empty text.
    pub fn new(properties: &'a dyn PropertySource) -> Self {
        Self::with_strict(properties, false)
    }

    /// Create a context where unknown properties are errors when `strict`.
    pub fn with_strict(properties: &'a dyn PropertySource, strict: bool) -> Self {
        Self {
            properties,
            strict,
            warnings: Vec::new(),
        }
    }

    /// Look up a property, applying the unknown-property policy.
    ///
    /// Lenient contexts record an [`ExpansionWarning::UnknownProperty`] and
    /// return `None`; the placeholder then renders as empty text.
    pub fn property(&mut self, name: &str) -> Result<Option<&'a str>, TemplateError> {
        if let Some(value) = self.properties.property(name) {
            return Ok(Some(value));
        }
        if self.strict {
            return Err(TemplateError::UnknownProperty {
                name: name.to_string(),
            });
        }
        self.add_warning(ExpansionWarning::UnknownProperty {
            name: name.to_string(),
        });
        Ok(None)
    }

    /// Record a warning unless an identical one was already recorded.
    pub fn add_warning(&mut self, warning: ExpansionWarning) {
        if !self.warnings.contains(&warning) {
            self.warnings.push(warning);
        }
    }

    pub fn warnings(&self) -> &[ExpansionWarning] {
        &self.warnings
    }

    /// Take the collected warnings, leaving the context empty.
    pub fn take_warnings(&mut self) -> Vec<ExpansionWarning> {
        mem::take(&mut self.warnings)
    }
}
