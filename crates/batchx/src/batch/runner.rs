//! Sequential batch execution.
//!
//! Files are processed in order. Each file's template is expanded once and
//! every step is launched and awaited before the next one starts. The
//! cancellation flag is checked between files, never between steps.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::batch::error::RunError;
use crate::batch::program::Program;
use crate::interpreter::Expander;
use crate::parser::split_command_line;
use crate::types::FileProperties;

/// A shared stop request, checked by the runner between files.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One process to start: the executable and its split arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub executable: String,
    pub args: Vec<String>,
    /// The step's argument string before splitting.
    pub command_line: String,
}

/// Starts a process and waits for it to finish.
pub trait Launcher {
    /// Run `invocation` to completion, returning its exit code.
    ///
    /// `None` means the process ended without a code, for example because
    /// it was killed by a signal.
    fn launch(&mut self, invocation: &Invocation) -> io::Result<Option<i32>>;
}

/// Launches real processes with inherited standard streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, invocation: &Invocation) -> io::Result<Option<i32>> {
        info!(
            executable = %invocation.executable,
            arguments = %invocation.command_line,
            "launching"
        );
        let status = Command::new(&invocation.executable)
            .args(&invocation.args)
            .status()?;
        Ok(status.code())
    }
}

/// Logs and records invocations instead of launching them.
#[derive(Debug, Clone, Default)]
pub struct DryRunLauncher {
    invocations: Vec<Invocation>,
}

impl DryRunLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every invocation seen so far, in order.
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }
}

impl Launcher for DryRunLauncher {
    fn launch(&mut self, invocation: &Invocation) -> io::Result<Option<i32>> {
        info!(
            executable = %invocation.executable,
            arguments = %invocation.command_line,
            "dry run"
        );
        self.invocations.push(invocation.clone());
        Ok(Some(0))
    }
}

/// The state of one input file in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Not reached, either because the run was stopped or has not got there yet.
    Pending,
    Done,
    Failed(String),
}

impl Display for FileStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FileStatus::Pending => write!(f, "pending"),
            FileStatus::Done => write!(f, "done"),
            FileStatus::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    /// Steps launched for this file.
    pub steps: usize,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
    pub outcome: RunOutcome,
    pub steps_launched: usize,
    /// Launched steps that exited with a non-zero or missing code.
    pub nonzero_exits: usize,
}

impl RunSummary {
    /// Files whose status is [`FileStatus::Failed`].
    pub fn failed(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|report| matches!(report.status, FileStatus::Failed(_)))
    }
}

/// Progress callbacks. Every method defaults to doing nothing.
pub trait RunObserver {
    fn step_started(&mut self, _file: &Path, _step: usize, _invocation: &Invocation) {}

    fn step_finished(&mut self, _file: &Path, _step: usize, _exit_code: Option<i32>) {}

    fn file_finished(&mut self, _report: &FileReport) {}

    fn completed(&mut self, _summary: &RunSummary) {}

    fn stopped(&mut self, _summary: &RunSummary) {}
}

impl RunObserver for () {}

/// Runs a program over input files, one process per expanded step.
pub struct Runner<'a, L> {
    expander: &'a Expander,
    launcher: L,
    cancel: CancelFlag,
}

impl<'a, L: Launcher> Runner<'a, L> {
    pub fn new(expander: &'a Expander, launcher: L, cancel: CancelFlag) -> Self {
        Self {
            expander,
            launcher,
            cancel,
        }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn into_launcher(self) -> L {
        self.launcher
    }

    /// Run `program` over `files`.
    ///
    /// A file whose template fails to expand, or whose process cannot be
    /// started, is marked failed and the run moves on to the next file.
    /// Non-zero exit codes are counted but do not fail the file.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::NotRunnable`] before starting if the program has
    /// no executable or no argument template.
    pub fn run(
        &mut self,
        program: &Program,
        files: &[PathBuf],
        observer: &mut dyn RunObserver,
    ) -> Result<RunSummary, RunError> {
        if !program.is_runnable() {
            return Err(RunError::NotRunnable {
                name: program.name.clone(),
            });
        }

        let mut summary = RunSummary {
            files: files
                .iter()
                .map(|path| FileReport {
                    path: path.clone(),
                    status: FileStatus::Pending,
                    steps: 0,
                })
                .collect(),
            outcome: RunOutcome::Completed,
            steps_launched: 0,
            nonzero_exits: 0,
        };

        for report in &mut summary.files {
            if self.cancel.is_cancelled() {
                info!("run stopped");
                summary.outcome = RunOutcome::Stopped;
                break;
            }

            let result = self.run_file(program, report, &mut summary.nonzero_exits, observer);
            summary.steps_launched += report.steps;
            report.status = match result {
                Ok(()) => FileStatus::Done,
                Err(err) => {
                    warn!(path = %report.path.display(), error = %err, "file failed");
                    FileStatus::Failed(err.to_string())
                }
            };
            observer.file_finished(report);
        }

        match summary.outcome {
            RunOutcome::Completed => observer.completed(&summary),
            RunOutcome::Stopped => observer.stopped(&summary),
        }
        Ok(summary)
    }

    /// Expand and launch every step for one file, stopping at the first failure.
    fn run_file(
        &mut self,
        program: &Program,
        report: &mut FileReport,
        nonzero_exits: &mut usize,
        observer: &mut dyn RunObserver,
    ) -> Result<(), RunError> {
        let properties = FileProperties::from_path(&report.path);
        let expansion = self.expander.expand(&program.arguments, &properties)?;
        for warning in expansion.warnings() {
            warn!(path = %report.path.display(), "{warning}");
        }

        for (step, command_line) in expansion.iter().enumerate() {
            let args = split_command_line(command_line)
                .map_err(|source| RunError::UnterminatedQuote { step, source })?;
            let invocation = Invocation {
                executable: program.executable.clone(),
                args,
                command_line: command_line.clone(),
            };

            observer.step_started(&report.path, step, &invocation);
            let exit_code =
                self.launcher
                    .launch(&invocation)
                    .map_err(|source| RunError::Launch {
                        step,
                        executable: program.executable.clone(),
                        source,
                    })?;
            report.steps += 1;
            if exit_code != Some(0) {
                warn!(path = %report.path.display(), step, ?exit_code, "non-zero exit");
                *nonzero_exits += 1;
            }
            observer.step_finished(&report.path, step, exit_code);
        }
        Ok(())
    }
}
