pub mod batch;
pub mod interpreter;
pub mod parser;
pub mod types;

pub use batch::{
    CancelFlag, CollectError, DryRunLauncher, FileReport, FileStatus, Invocation, Launcher,
    ProcessLauncher, Program, ProgramStore, RunError, RunObserver, RunOutcome, RunSummary, Runner,
    StoreError, collect_files, matches_extension, parse_extensions,
};
pub use interpreter::{
    ExpansionResult, ExpansionWarning, Expander, FunctionRegistry, GeneratorError, TemplateError,
    compute_suggestions, expand,
};
pub use types::{FileProperties, Literal, LiteralKind, NoProperties, PropertySource, Span};

/// Creates a `BTreeMap<String, String>` property source from key-value pairs.
///
/// Values are converted with `ToString`, so integers and string slices can
/// be passed directly.
///
/// # Example
///
/// ```
/// use batchx::{PropertySource, properties};
///
/// let p = properties! { "Name" => "clip", "Take" => 3 };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p.property("Name"), Some("clip"));
/// assert_eq!(p.property("Take"), Some("3"));
/// ```
#[macro_export]
macro_rules! properties {
    {} => {
        ::std::collections::BTreeMap::<String, String>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::BTreeMap::<String, String>::new();
            $(
                map.insert($key.to_string(), ::std::string::ToString::to_string(&$value));
            )+
            map
        }
    };
}
