//! Implementation of the `batchx expand` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use batchx::{Expander, FileProperties, PropertySource};
use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::parse_key_val;
use crate::output::TemplateDiagnostic;

/// Arguments for the expand command.
#[derive(Debug, clap::Args)]
pub struct ExpandArgs {
    /// Argument template to expand
    #[arg(short, long, required = true)]
    pub template: String,

    /// Take properties from this file path
    #[arg(long, conflicts_with = "properties")]
    pub file: Option<PathBuf>,

    /// Properties in Name=Value format (repeatable)
    #[arg(short = 'p', long = "property", value_parser = parse_key_val)]
    pub properties: Vec<(String, String)>,

    /// Fail on placeholders with no matching property
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for expansion results.
#[derive(Serialize)]
pub struct ExpandResult {
    pub steps: Vec<String>,
    pub warnings: Vec<String>,
}

/// Run the expand command.
pub fn run_expand(args: ExpandArgs) -> miette::Result<i32> {
    let expander = Expander::builder().strict_properties(args.strict).build();
    let source: Box<dyn PropertySource> = match &args.file {
        Some(path) => Box::new(FileProperties::from_path(path)),
        None => Box::new(args.properties.into_iter().collect::<BTreeMap<_, _>>()),
    };

    match expander.expand(&args.template, source.as_ref()) {
        Ok(result) => {
            let warnings: Vec<String> = result.warnings().iter().map(ToString::to_string).collect();
            if args.json {
                let output = ExpandResult {
                    steps: result.into_steps(),
                    warnings,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).into_diagnostic()?
                );
            } else {
                for warning in &warnings {
                    eprintln!("{} {}", "warning:".yellow().bold(), warning);
                }
                for step in result.steps() {
                    println!("{}", step);
                }
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&output).into_diagnostic()?
                );
            } else {
                let substituted = expander
                    .substitute(&args.template, source.as_ref())
                    .unwrap_or_else(|_| args.template.clone());
                let diagnostic =
                    TemplateDiagnostic::from_template_error(&substituted, &e, expander.registry());
                eprintln!("{:?}", miette::Report::new(diagnostic));
            }
            Ok(exitcode::DATAERR)
        }
    }
}
