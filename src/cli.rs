//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

use crate::config::{CredentialMode, Overrides};

/// bp2m-setup - BluePrint2Model environment bootstrapper
///
/// Creates the virtual environment, installs requirements and writes the
/// credentials file. Safe to re-run: existing environments and credentials
/// files are left alone.
#[derive(Parser, Debug)]
#[command(
    name = "bp2m-setup",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Bootstrap a BluePrint2Model development environment",
    long_about = "Creates a Python virtual environment, installs requirements.txt into it \
                  and writes a .env file with OPENAI_API_KEY, ANTHROPIC_API_KEY and \
                  GOOGLE_API_KEY taken from the environment or asked interactively.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  bp2m-setup\n    \
                  bp2m-setup --interactive\n    \
                  bp2m-setup -C ~/src/BluePrint2Model --python python3.11\n    \
                  OPENAI_API_KEY=sk-... bp2m-setup"
)]
pub struct Cli {
    /// Project root (defaults to current directory)
    #[arg(long, short = 'C', env = "BP2M_PROJECT_ROOT", value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Virtual environment directory, relative to the project root
    #[arg(long, value_name = "PATH")]
    pub venv: Option<PathBuf>,

    /// Dependency manifest, relative to the project root
    #[arg(long, value_name = "PATH")]
    pub requirements: Option<PathBuf>,

    /// Credentials file, relative to the project root
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Python interpreter used to create the environment
    #[arg(long, env = "BP2M_PYTHON", value_name = "PROGRAM")]
    pub python: Option<String>,

    /// Where API keys come from when the credentials file is created
    #[arg(long, value_enum, value_name = "SOURCE", conflicts_with = "interactive")]
    pub credentials: Option<CredentialMode>,

    /// Ask for API keys interactively (same as --credentials prompt)
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Only print the commands being run
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl Cli {
    /// Configuration values given on the command line
    pub fn overrides(&self) -> Overrides {
        let credentials = if self.interactive {
            Some(CredentialMode::Prompt)
        } else {
            self.credentials
        };

        Overrides {
            venv: self.venv.clone(),
            requirements: self.requirements.clone(),
            env_file: self.env_file.clone(),
            python: self.python.clone(),
            credentials,
        }
    }
}
