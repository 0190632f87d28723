//! Implementation of the `batchx run` command.

use std::path::{Path, PathBuf};
use std::process;

use batchx::{
    CancelFlag, DryRunLauncher, Expander, FileReport, FileStatus, Invocation, Launcher,
    ProcessLauncher, Program, RunObserver, RunOutcome, RunSummary, Runner,
};
use miette::IntoDiagnostic;
use owo_colors::OwoColorize;

use super::{load_store, InputArgs, ProgramSelection};

/// Arguments for the run command.
#[derive(Debug, clap::Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub selection: ProgramSelection,

    #[command(flatten)]
    pub input: InputArgs,

    /// Print each command instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Prints progress as files are processed.
struct ConsoleObserver {
    total: usize,
    done: usize,
    dry_run: bool,
}

impl RunObserver for ConsoleObserver {
    fn step_started(&mut self, _file: &Path, _step: usize, invocation: &Invocation) {
        if self.dry_run {
            println!(
                "  {} {} {}",
                "$".dimmed(),
                invocation.executable,
                invocation.command_line
            );
        }
    }

    fn step_finished(&mut self, _file: &Path, step: usize, exit_code: Option<i32>) {
        if exit_code != Some(0) {
            let code = exit_code.map_or_else(|| "none".to_string(), |c| c.to_string());
            eprintln!(
                "  {} step {} exited with code {}",
                "warning:".yellow().bold(),
                step + 1,
                code
            );
        }
    }

    fn file_finished(&mut self, report: &FileReport) {
        self.done += 1;
        let status = match &report.status {
            FileStatus::Done => "done".green().to_string(),
            FileStatus::Failed(message) => format!("{} {}", "ERROR:".red().bold(), message),
            FileStatus::Pending => "pending".dimmed().to_string(),
        };
        println!(
            "[{}/{}] {} {}",
            self.done,
            self.total,
            report.path.display(),
            status
        );
    }

    fn completed(&mut self, summary: &RunSummary) {
        println!(
            "{} {} files, {} steps",
            "completed:".green().bold(),
            summary.files.len(),
            summary.steps_launched
        );
    }

    fn stopped(&mut self, summary: &RunSummary) {
        println!(
            "{} after {} steps",
            "stopped:".yellow().bold(),
            summary.steps_launched
        );
    }
}

/// Exit status after a second interrupt, following the shell convention for SIGINT.
const INTERRUPTED: i32 = 130;

/// Run the run command.
pub fn run_run(args: RunArgs, config: &Path) -> miette::Result<i32> {
    let store = load_store(config)?;
    let program = args.selection.resolve(&store)?;
    let files = args.input.collect(&store)?;
    if files.is_empty() {
        eprintln!("{}", "no input files matched".yellow());
        return Ok(exitcode::NOINPUT);
    }

    let cancel = CancelFlag::new();
    stop_on_interrupt(cancel.clone())?;

    let mut observer = ConsoleObserver {
        total: files.len(),
        done: 0,
        dry_run: args.dry_run,
    };
    let summary = if args.dry_run {
        execute(DryRunLauncher::new(), &program, &files, cancel, &mut observer)?
    } else {
        execute(ProcessLauncher, &program, &files, cancel, &mut observer)?
    };
    Ok(exit_code(&summary))
}

/// The first Ctrl-C stops the batch once the current file finishes; a second
/// one exits immediately.
fn stop_on_interrupt(cancel: CancelFlag) -> miette::Result<()> {
    ctrlc::set_handler(move || {
        if cancel.is_cancelled() {
            process::exit(INTERRUPTED);
        }
        eprintln!(
            "{} stopping after the current file, press Ctrl-C again to abort",
            "interrupt:".yellow().bold()
        );
        cancel.cancel();
    })
    .into_diagnostic()
}

fn execute<L: Launcher>(
    launcher: L,
    program: &Program,
    files: &[PathBuf],
    cancel: CancelFlag,
    observer: &mut ConsoleObserver,
) -> miette::Result<RunSummary> {
    let expander = Expander::new();
    let mut runner = Runner::new(&expander, launcher, cancel);
    runner.run(program, files, observer).into_diagnostic()
}

fn exit_code(summary: &RunSummary) -> i32 {
    let failed = summary.failed().count();
    if failed > 0 {
        eprintln!("{}", format!("{failed} files failed").red());
        return exitcode::DATAERR;
    }
    match summary.outcome {
        RunOutcome::Completed => exitcode::OK,
        RunOutcome::Stopped => exitcode::TEMPFAIL,
    }
}
