//! Function registry for resolving calls to generators.

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use crate::interpreter::error::{GeneratorError, UnresolvedReason, compute_suggestions};
use crate::interpreter::generators;
use crate::types::{Literal, LiteralKind};

/// Generator function signature.
///
/// Takes the call's literal arguments, already checked against the declared
/// [`Signature`], and returns the generated sequence.
pub type GeneratorFn = fn(&[Literal]) -> Result<Vec<String>, GeneratorError>;

/// The parameter shape of a generator: fixed kinds, optionally followed by a
/// variadic tail that repeats one kind zero or more times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    params: Vec<LiteralKind>,
    variadic: Option<LiteralKind>,
}

impl Signature {
    /// A signature taking exactly `params`.
    pub fn fixed(params: &[LiteralKind]) -> Self {
        Self {
            params: params.to_vec(),
            variadic: None,
        }
    }

    /// A signature taking `params` followed by any number of `tail` values.
    pub fn variadic(params: &[LiteralKind], tail: LiteralKind) -> Self {
        Self {
            params: params.to_vec(),
            variadic: Some(tail),
        }
    }

    /// Number of fixed parameters.
    pub fn fixed_count(&self) -> usize {
        self.params.len()
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic.is_some()
    }

    /// Whether a call with `count` arguments fits this signature's arity.
    pub fn accepts_count(&self, count: usize) -> bool {
        match self.variadic {
            Some(_) => count >= self.params.len(),
            None => count == self.params.len(),
        }
    }

    /// Whether `args` fit this signature's arity and kinds.
    pub fn accepts(&self, args: &[Literal]) -> bool {
        self.accepts_count(args.len())
            && args
                .iter()
                .enumerate()
                .all(|(position, arg)| self.kind_at(position) == Some(arg.kind()))
    }

    /// The declared kind at `position`, using the tail kind past the fixed part.
    fn kind_at(&self, position: usize) -> Option<LiteralKind> {
        self.params.get(position).copied().or(self.variadic)
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut parts: Vec<String> = self.params.iter().map(|k| k.name().to_string()).collect();
        if let Some(tail) = self.variadic {
            parts.push(format!("{tail}..."));
        }
        write!(f, "({})", parts.join(", "))
    }
}

/// A registered generator: a name, a signature and the function itself.
#[derive(Clone)]
pub struct FunctionDef {
    name: &'static str,
    signature: Signature,
    generator: GeneratorFn,
}

impl FunctionDef {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Run the generator.
    pub fn call(&self, args: &[Literal]) -> Result<Vec<String>, GeneratorError> {
        (self.generator)(args)
    }
}

impl Debug for FunctionDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}", self.name, self.signature)
    }
}

/// Why [`FunctionRegistry::resolve`] found no single match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    Unresolved(UnresolvedReason),
    /// The name and arity are known but the argument kinds do not fit.
    Malformed { expected: String },
}

/// The table of generator functions available to templates.
///
/// Names are matched case-insensitively. A name may have several
/// signatures, which must not overlap: a call that fits more than one is
/// rejected as ambiguous.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: Vec<FunctionDef>,
}

impl FunctionRegistry {
    /// The registry of built-in functions: `Number`, `Range` and `RangeLength`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        generators::register_builtins(&mut registry);
        registry
    }

    pub(crate) fn empty() -> Self {
        Self {
            functions: Vec::new(),
        }
    }

    pub(crate) fn register(
        &mut self,
        name: &'static str,
        signature: Signature,
        generator: GeneratorFn,
    ) {
        self.functions.push(FunctionDef {
            name,
            signature,
            generator,
        });
    }

    /// Registered function names, in registration order without repeats.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for def in &self.functions {
            if !names.iter().any(|n| n == def.name) {
                names.push(def.name.to_string());
            }
        }
        names
    }

    /// All signatures registered under `name` (case-insensitive).
    pub fn overloads<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a FunctionDef> {
        self.functions
            .iter()
            .filter(move |def| def.name.eq_ignore_ascii_case(name))
    }

    /// Select the one function that accepts `name(args)`.
    ///
    /// - unknown name, unsupported argument count, or several matches:
    ///   [`ResolveError::Unresolved`]
    /// - known arity with mismatched kinds, or no arguments at all where
    ///   every signature needs some: [`ResolveError::Malformed`]
    pub fn resolve(&self, name: &str, args: &[Literal]) -> Result<&FunctionDef, ResolveError> {
        let overloads: Vec<&FunctionDef> = self.overloads(name).collect();
        if overloads.is_empty() {
            return Err(ResolveError::Unresolved(UnresolvedReason::UnknownName {
                suggestions: compute_suggestions(name, &self.names()),
            }));
        }

        let by_count: Vec<&FunctionDef> = overloads
            .iter()
            .copied()
            .filter(|def| def.signature.accepts_count(args.len()))
            .collect();
        if by_count.is_empty() {
            if args.is_empty() {
                return Err(ResolveError::Malformed {
                    expected: describe_signatures(&overloads),
                });
            }
            return Err(ResolveError::Unresolved(UnresolvedReason::NoMatchingArity {
                arity: args.len(),
            }));
        }

        let matching: Vec<&FunctionDef> = by_count
            .iter()
            .copied()
            .filter(|def| def.signature.accepts(args))
            .collect();
        match matching.as_slice() {
            [] => Err(ResolveError::Malformed {
                expected: describe_signatures(&by_count),
            }),
            [single] => Ok(*single),
            many => Err(ResolveError::Unresolved(UnresolvedReason::Ambiguous {
                candidates: many.len(),
            })),
        }
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn describe_signatures(defs: &[&FunctionDef]) -> String {
    defs.iter()
        .map(|def| def.signature.to_string())
        .collect::<Vec<_>>()
        .join(" or ")
}
