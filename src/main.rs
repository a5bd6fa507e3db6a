//! bp2m-setup - BluePrint2Model environment bootstrapper
//!
//! Creates the project's virtual environment, installs its requirements and
//! writes the `.env` credentials file, in that order, stopping at the first
//! failure.

use clap::Parser;
use miette::Diagnostic;

mod bootstrap;
mod cli;
mod config;
mod credentials;
mod error;
mod process;
mod ui;

use bootstrap::Bootstrapper;
use cli::Cli;
use config::{BootstrapConfig, CredentialMode};
use credentials::{CredentialSource, EnvSource, InquirePrompter, PromptSource};
use error::Result;
use ui::{ConsoleReporter, QuietReporter, Reporter};

fn run(cli: &Cli) -> Result<()> {
    let config = BootstrapConfig::load(cli.project_root.clone(), cli.overrides())?;

    let mut reporter: Box<dyn Reporter> = if cli.quiet {
        Box::new(QuietReporter)
    } else {
        Box::new(ConsoleReporter)
    };

    let mut source: Box<dyn CredentialSource> = match config.credentials {
        CredentialMode::Env => Box::new(EnvSource::process()),
        CredentialMode::Prompt => Box::new(PromptSource::new(InquirePrompter)),
    };

    Bootstrapper::new(&config, reporter.as_mut()).run(source.as_mut())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        if let Some(help) = e.help() {
            eprintln!("  help: {help}");
        }
        std::process::exit(e.exit_code());
    }
}
