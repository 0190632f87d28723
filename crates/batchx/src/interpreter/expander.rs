//! Template expansion: placeholders, calls, alignment and splicing.

use std::ops::Index;
use std::slice::Iter;
use std::vec::IntoIter;

use bon::Builder;
use tracing::debug;

use crate::interpreter::align::{CallValues, step_count, step_replacements};
use crate::interpreter::context::ExpansionContext;
use crate::interpreter::error::{ExpansionWarning, TemplateError};
use crate::interpreter::registry::{FunctionRegistry, ResolveError};
use crate::interpreter::splice::splice;
use crate::interpreter::substitute::substitute;
use crate::parser::{FunctionCall, parse_template, scan_calls};
use crate::types::{PropertySource, describe_shape};

/// Default cap on the number of steps one expansion may produce.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Expands argument templates into one string per step.
///
/// An `Expander` holds no per-expansion state, so one instance can be shared
/// between threads and reused for every file of a batch.
///
/// # Example
///
/// ```
/// use batchx::{Expander, properties};
///
/// let expander = Expander::builder().max_steps(100).build();
/// let result = expander
///     .expand("-i {Name}.ts -ss {Number(3, 60, 0)}", &properties! { "Name" => "clip" })
///     .unwrap();
///
/// assert_eq!(result.steps(), ["-i clip.ts -ss 0", "-i clip.ts -ss 60", "-i clip.ts -ss 120"]);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct Expander {
    /// Functions available to `{name(args)}` calls.
    #[builder(default)]
    registry: FunctionRegistry,

    /// Largest step count an expansion may produce.
    #[builder(default = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Fail on unknown placeholders instead of rendering them empty.
    #[builder(default)]
    strict_properties: bool,
}

impl Default for Expander {
    fn default() -> Self {
        Expander::builder().build()
    }
}

impl Expander {
    /// Create an expander with the built-in functions and default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn strict_properties(&self) -> bool {
        self.strict_properties
    }

    /// Expand `template` against `properties`.
    ///
    /// Placeholders are substituted first; function calls are then located
    /// in the substituted text and each resolved to a sequence. The result
    /// has one step per value of the longest sequence, shorter sequences
    /// repeating from their start.
    ///
    /// # Errors
    ///
    /// Returns the first error found; no partial result is produced.
    pub fn expand(
        &self,
        template: &str,
        properties: &dyn PropertySource,
    ) -> Result<ExpansionResult, TemplateError> {
        let mut ctx = ExpansionContext::with_strict(properties, self.strict_properties);
        let substituted = substitute(&parse_template(template), &mut ctx)?;
        let calls = scan_calls(&substituted);
        debug!(template, substituted = %substituted, calls = calls.len(), "expanding template");

        let mut resolved = Vec::with_capacity(calls.len());
        for call in &calls {
            for text in &call.skipped {
                ctx.add_warning(ExpansionWarning::SkippedArgument {
                    function: call.name.clone(),
                    text: text.clone(),
                });
            }
            resolved.push(self.evaluate_call(call)?);
        }

        let steps = step_count(&resolved);
        if steps > self.max_steps {
            return Err(TemplateError::TooManySteps {
                steps,
                max: self.max_steps,
            });
        }

        let steps: Vec<String> = (0..steps)
            .map(|step| splice(&substituted, &step_replacements(&resolved, step)))
            .collect();
        debug!(steps = steps.len(), warnings = ctx.warnings().len(), "expanded template");

        Ok(ExpansionResult {
            steps,
            warnings: ctx.take_warnings(),
        })
    }

    /// Substitute placeholders only, leaving function calls untouched.
    ///
    /// Call spans in [`TemplateError`] refer to this text.
    pub fn substitute(
        &self,
        template: &str,
        properties: &dyn PropertySource,
    ) -> Result<String, TemplateError> {
        let mut ctx = ExpansionContext::with_strict(properties, self.strict_properties);
        substitute(&parse_template(template), &mut ctx)
    }

    /// Resolve one call and run its generator.
    fn evaluate_call(&self, call: &FunctionCall) -> Result<CallValues, TemplateError> {
        let def = self
            .registry
            .resolve(&call.name, &call.args)
            .map_err(|err| match err {
                ResolveError::Unresolved(reason) => TemplateError::UnresolvedFunction {
                    name: call.name.clone(),
                    shape: describe_shape(&call.args),
                    reason,
                    span: call.span,
                },
                ResolveError::Malformed { expected } => TemplateError::MalformedArguments {
                    name: call.name.clone(),
                    shape: describe_shape(&call.args),
                    expected,
                    span: call.span,
                },
            })?;

        let values = def
            .call(&call.args)
            .map_err(|source| TemplateError::InvalidGeneratorArguments {
                name: call.name.clone(),
                span: call.span,
                source,
            })?;
        if values.is_empty() {
            return Err(TemplateError::EmptySequence {
                name: call.name.clone(),
                span: call.span,
            });
        }

        debug!(function = def.name(), values = values.len(), "resolved call");
        Ok(CallValues {
            span: call.span,
            values,
        })
    }
}

/// Expand `template` with the default expander.
///
/// # Example
///
/// ```
/// use batchx::{NoProperties, expand};
///
/// let result = expand("{Range(2, 100, 10)}", &NoProperties).unwrap();
/// assert_eq!(result.steps(), ["0-9", "100-109"]);
/// ```
pub fn expand(
    template: &str,
    properties: &dyn PropertySource,
) -> Result<ExpansionResult, TemplateError> {
    Expander::default().expand(template, properties)
}

/// The steps of one expansion, in order, and the warnings it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionResult {
    steps: Vec<String>,
    warnings: Vec<ExpansionWarning>,
}

impl ExpansionResult {
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Number of steps; always at least one.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.steps.first().map(String::as_str)
    }

    pub fn warnings(&self) -> &[ExpansionWarning] {
        &self.warnings
    }

    pub fn iter(&self) -> Iter<'_, String> {
        self.steps.iter()
    }

    pub fn into_steps(self) -> Vec<String> {
        self.steps
    }
}

impl Index<usize> for ExpansionResult {
    type Output = str;

    fn index(&self, step: usize) -> &str {
        &self.steps[step]
    }
}

impl IntoIterator for ExpansionResult {
    type Item = String;
    type IntoIter = IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExpansionResult {
    type Item = &'a String;
    type IntoIter = Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
