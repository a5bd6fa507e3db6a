//! Subprocess execution
//!
//! Commands are a program plus an argument vector; nothing goes through a
//! shell. Children inherit stdio so tool output reaches the console, and
//! every run blocks until the child exits.

use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::process::Command;

use crate::error::{Result, SetupError};
use crate::ui::Reporter;

/// A command to run: program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl CommandSpec {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Shorthand for adding a path argument
    #[must_use]
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.as_os_str())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Run a command to completion, tracing it first.
///
/// Fails with [`SetupError::CommandSpawnFailed`] when the program cannot be
/// started and [`SetupError::CommandFailed`] on a non-zero exit.
pub fn run(spec: &CommandSpec, reporter: &mut dyn Reporter) -> Result<()> {
    let command_line = spec.to_string();
    reporter.command(&command_line);

    let status = Command::new(&spec.program)
        .args(&spec.args)
        .status()
        .map_err(|e| SetupError::CommandSpawnFailed {
            command: command_line.clone(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(SetupError::CommandFailed {
            command: command_line,
            code: status.code(),
        });
    }

    Ok(())
}
