//! batchx CLI entry point.
//!
//! Provides command-line tools for argument templates and batch runs:
//! - `batchx expand` - Print the steps of one template expansion
//! - `batchx preview` - Show the steps a batch would run, per file
//! - `batchx run` - Run a program over input files
//! - `batchx programs` - Edit the stored program list

mod commands;
mod output;

use std::io;
use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_expand, run_preview, run_programs, run_run, ExpandArgs, PreviewArgs, ProgramsArgs, RunArgs,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Batch program invocation from argument templates.
#[derive(Debug, Parser)]
#[command(name = "batchx")]
#[command(about = "Expand argument templates and run programs over files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Program store file
    #[arg(long, env = "BATCHX_CONFIG", default_value = "batchx.json", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Expand a template and print every step
    Expand(ExpandArgs),
    /// Preview the steps of a batch without running it
    Preview(PreviewArgs),
    /// Run a program over input files
    Run(RunArgs),
    /// List, add or remove stored programs
    Programs(ProgramsArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` or the verbosity flag.
fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_tracing(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Expand(args) => run_expand(args),
        Commands::Preview(args) => run_preview(args, &cli.config),
        Commands::Run(args) => run_run(args, &cli.config),
        Commands::Programs(args) => run_programs(args, &cli.config),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
