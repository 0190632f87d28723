//! Program definitions and their JSON store.

use std::fs;
use std::io::ErrorKind;
use std::mem;
use std::path::Path;

use bon::Builder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::batch::error::StoreError;

/// A named executable with an argument template.
///
/// # Example
///
/// ```
/// use batchx::Program;
///
/// let program = Program::builder()
///     .name("cut")
///     .executable("ffmpeg")
///     .arguments(r#"-i "{FullName}" -ss {Number(3, 60, 0)}"#)
///     .build();
/// assert!(program.is_runnable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct Program {
    pub name: String,
    pub executable: String,
    /// Argument template expanded once per input file.
    pub arguments: String,
}

impl Program {
    /// Whether the program has both an executable and an argument template.
    pub fn is_runnable(&self) -> bool {
        !self.executable.trim().is_empty() && !self.arguments.trim().is_empty()
    }
}

/// The persisted list of programs and the default input extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramStore {
    #[serde(default)]
    programs: Vec<Program>,

    /// Extensions, without the dot, accepted when collecting input files.
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl ProgramStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from `path`. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no program store, starting empty");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the store to `path` as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| StoreError::Encode { source })?;
        let write_error = |source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(path, json + "\n").map_err(write_error)?;
        debug!(path = %path.display(), programs = self.programs.len(), "saved program store");
        Ok(())
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    /// Find a program by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&Program> {
        self.programs
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Add `program`, replacing a program of the same name in place.
    ///
    /// Returns the replaced program, if any.
    pub fn add(&mut self, program: Program) -> Option<Program> {
        match self
            .programs
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(&program.name))
        {
            Some(existing) => Some(mem::replace(existing, program)),
            None => {
                self.programs.push(program);
                None
            }
        }
    }

    /// Remove the program called `name`, returning it.
    pub fn remove(&mut self, name: &str) -> Option<Program> {
        let index = self
            .programs
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))?;
        Some(self.programs.remove(index))
    }
}
