//! CLI command implementations.

mod expand;
mod preview;
mod programs;
mod run;

use std::path::{Path, PathBuf};

use batchx::{collect_files, parse_extensions, Program, ProgramStore};
use miette::{miette, IntoDiagnostic, Result};

pub use expand::{run_expand, ExpandArgs};
pub use preview::{run_preview, PreviewArgs};
pub use programs::{run_programs, ProgramsArgs};
pub use run::{run_run, RunArgs};

/// Which program a batch command uses: a stored one or an ad-hoc template.
#[derive(Debug, clap::Args)]
pub struct ProgramSelection {
    /// Stored program to use
    #[arg(short = 'P', long, conflicts_with_all = ["template", "exe"])]
    pub program: Option<String>,

    /// Argument template, used instead of a stored program
    #[arg(short, long)]
    pub template: Option<String>,

    /// Executable to run with --template
    #[arg(long, requires = "template")]
    pub exe: Option<String>,
}

impl ProgramSelection {
    /// Resolve the selection against the store.
    pub fn resolve(&self, store: &ProgramStore) -> Result<Program> {
        if let Some(name) = &self.program {
            return store
                .get(name)
                .cloned()
                .ok_or_else(|| miette!("no stored program named '{}'", name));
        }
        match &self.template {
            Some(template) => Ok(Program::builder()
                .name("template")
                .executable(self.exe.clone().unwrap_or_default())
                .arguments(template.clone())
                .build()),
            None => Err(miette!("either --program or --template is required")),
        }
    }
}

/// Input files and the extensions that select them.
#[derive(Debug, clap::Args)]
pub struct InputArgs {
    /// Input files or directories
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Accepted extensions (repeatable); defaults to the stored list
    #[arg(long = "ext")]
    pub extensions: Vec<String>,
}

impl InputArgs {
    /// Collect the input files, falling back to the store's extensions.
    pub fn collect(&self, store: &ProgramStore) -> Result<Vec<PathBuf>> {
        let mut extensions: Vec<String> = self
            .extensions
            .iter()
            .map(String::as_str)
            .flat_map(parse_extensions)
            .collect();
        if extensions.is_empty() {
            extensions.clone_from(&store.extensions);
        }
        collect_files(&self.paths, &extensions).into_diagnostic()
    }
}

/// Load the program store named by `--config`.
pub fn load_store(config: &Path) -> Result<ProgramStore> {
    ProgramStore::load(config).into_diagnostic()
}

/// Parse a key=value property string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid property format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
