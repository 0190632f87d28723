//! Implementation of the `batchx preview` command.

use std::path::Path;

use batchx::{Expander, FileProperties};
use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::{load_store, InputArgs, ProgramSelection};
use crate::output::table::{format_preview_table, PreviewRow};

/// Arguments for the preview command.
#[derive(Debug, clap::Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub selection: ProgramSelection,

    #[command(flatten)]
    pub input: InputArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one previewed file.
#[derive(Debug, Serialize)]
struct FilePreview {
    file: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the preview command.
pub fn run_preview(args: PreviewArgs, config: &Path) -> miette::Result<i32> {
    let store = load_store(config)?;
    let program = args.selection.resolve(&store)?;
    let files = args.input.collect(&store)?;
    let expander = Expander::new();

    let mut previews = Vec::with_capacity(files.len());
    for path in &files {
        let file = path.display().to_string();
        match expander.expand(&program.arguments, &FileProperties::from_path(path)) {
            Ok(result) => {
                for warning in result.warnings() {
                    eprintln!("{} {}: {}", "warning:".yellow().bold(), file, warning);
                }
                previews.push(FilePreview {
                    file,
                    steps: result.into_steps(),
                    error: None,
                });
            }
            Err(e) => previews.push(FilePreview {
                file,
                steps: Vec::new(),
                error: Some(e.to_string()),
            }),
        }
    }
    let failed = previews.iter().filter(|p| p.error.is_some()).count();

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&previews).into_diagnostic()?
        );
    } else if previews.is_empty() {
        eprintln!("{}", "no input files matched".yellow());
    } else {
        let rows: Vec<PreviewRow> = previews
            .into_iter()
            .flat_map(|preview| preview_rows(preview, &program.executable))
            .collect();
        println!("{}", format_preview_table(&rows));
    }

    if failed > 0 {
        eprintln!(
            "{}",
            format!("{failed} of {} files failed to expand", files.len()).red()
        );
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn preview_rows(preview: FilePreview, executable: &str) -> Vec<PreviewRow> {
    match preview.error {
        Some(message) => vec![PreviewRow {
            file: preview.file,
            step: None,
            executable: executable.to_string(),
            arguments: format!("ERROR: {message}"),
        }],
        None => preview
            .steps
            .into_iter()
            .enumerate()
            .map(|(index, arguments)| PreviewRow {
                file: preview.file.clone(),
                step: Some(index + 1),
                executable: executable.to_string(),
                arguments,
            })
            .collect(),
    }
}
