//! Error types and handling for bp2m-setup
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//! Every failure is fatal: errors bubble up to `main`, which prints them and
//! exits with [`SetupError::exit_code`].

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for bootstrap operations
#[derive(Error, Diagnostic, Debug)]
pub enum SetupError {
    // Process errors
    #[error("Command failed with exit code {}: {command}", display_code(.code))]
    #[diagnostic(
        code(bp2m::process::failed),
        help("See the command output above for the underlying cause")
    )]
    CommandFailed { command: String, code: Option<i32> },

    #[error("Failed to start command: {command}: {reason}")]
    #[diagnostic(
        code(bp2m::process::spawn_failed),
        help("Check that the program is installed and on PATH")
    )]
    CommandSpawnFailed { command: String, reason: String },

    // Project layout errors
    #[error("Project root not found: {path}")]
    #[diagnostic(
        code(bp2m::config::root_not_found),
        help("Pass --project-root or run from the project directory")
    )]
    ProjectRootNotFound { path: String },

    #[error("Dependency manifest not found: {path}")]
    #[diagnostic(
        code(bp2m::install::manifest_not_found),
        help("Create the requirements file or pass --requirements")
    )]
    ManifestNotFound { path: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(bp2m::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(bp2m::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(bp2m::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("{name} is not valid Unicode and cannot be written on this platform")]
    #[diagnostic(
        code(bp2m::credentials::non_unicode),
        help("Set {name} to a Unicode value, or enter it at the prompt with -i")
    )]
    #[cfg_attr(unix, allow(dead_code))]
    NonUnicodeValue { name: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(bp2m::fs::io_error))]
    IoError {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    // Prompt errors
    #[error("Prompt cancelled")]
    #[diagnostic(
        code(bp2m::prompt::cancelled),
        help("Re-run the setup, or use --credentials env to read keys from the environment")
    )]
    PromptCancelled,

    #[error("Failed to read input: {reason}")]
    #[diagnostic(
        code(bp2m::prompt::failed),
        help("Interactive mode needs a terminal; use --credentials env otherwise")
    )]
    PromptFailed { reason: String },
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

impl SetupError {
    /// Process exit code for this error.
    ///
    /// A subprocess failure propagates the child's own exit code; everything
    /// else (including children killed by a signal) exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            SetupError::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for SetupError {
    fn from(err: std::io::Error) -> Self {
        SetupError::IoError {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<inquire::InquireError> for SetupError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => SetupError::PromptCancelled,
            other => SetupError::PromptFailed {
                reason: other.to_string(),
            },
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SetupError>;
