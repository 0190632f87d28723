//! Implementation of the `batchx programs` command.

use std::path::Path;

use batchx::{parse_extensions, Program};
use clap::Subcommand;
use miette::{miette, IntoDiagnostic};
use owo_colors::OwoColorize;

use super::load_store;
use crate::output::table::format_programs_table;

/// Arguments for the programs command.
#[derive(Debug, clap::Args)]
pub struct ProgramsArgs {
    #[command(subcommand)]
    pub action: ProgramsAction,
}

#[derive(Debug, Subcommand)]
pub enum ProgramsAction {
    /// List stored programs
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a program, replacing one with the same name
    Add {
        name: String,
        executable: String,
        /// Argument template
        arguments: String,
    },
    /// Remove a stored program
    Remove { name: String },
    /// Show or set the default input extensions
    Extensions {
        /// Extensions such as "ts mkv"; omit to show the current list
        extensions: Vec<String>,
    },
}

/// Run the programs command.
pub fn run_programs(args: ProgramsArgs, config: &Path) -> miette::Result<i32> {
    let mut store = load_store(config)?;

    match args.action {
        ProgramsAction::List { json } => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(store.programs()).into_diagnostic()?
                );
            } else if store.programs().is_empty() {
                println!("no programs in {}", config.display());
            } else {
                println!("{}", format_programs_table(store.programs()));
            }
        }
        ProgramsAction::Add {
            name,
            executable,
            arguments,
        } => {
            let program = Program::builder()
                .name(name.clone())
                .executable(executable)
                .arguments(arguments)
                .build();
            if !program.is_runnable() {
                eprintln!(
                    "{} '{}' has an empty executable or template",
                    "warning:".yellow().bold(),
                    name
                );
            }
            let verb = match store.add(program) {
                Some(_) => "updated",
                None => "added",
            };
            store.save(config).into_diagnostic()?;
            println!("{} {}", verb.green(), name);
        }
        ProgramsAction::Remove { name } => {
            let removed = store
                .remove(&name)
                .ok_or_else(|| miette!("no stored program named '{}'", name))?;
            store.save(config).into_diagnostic()?;
            println!("{} {}", "removed".green(), removed.name);
        }
        ProgramsAction::Extensions { extensions } => {
            if !extensions.is_empty() {
                store.extensions = extensions
                    .iter()
                    .map(String::as_str)
                    .flat_map(parse_extensions)
                    .collect();
                store.save(config).into_diagnostic()?;
            }
            println!("{}", store.extensions.join(" "));
        }
    }

    Ok(exitcode::OK)
}
