//! Batch execution around the expansion engine.
//!
//! This module holds the persisted program list, input file collection and
//! the sequential runner that launches one process per expanded step.

mod error;
mod files;
mod program;
mod runner;

pub use error::{CollectError, RunError, StoreError};
pub use files::{collect_files, matches_extension, parse_extensions};
pub use program::{Program, ProgramStore};
pub use runner::{
    CancelFlag, DryRunLauncher, FileReport, FileStatus, Invocation, Launcher, ProcessLauncher,
    RunObserver, RunOutcome, RunSummary, Runner,
};
