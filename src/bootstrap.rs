//! The bootstrap sequence
//!
//! Steps run in a fixed order and the first failure aborts the run:
//!
//! 1. create the virtual environment unless its directory exists
//! 2. install the dependency manifest with the environment's `pip`
//! 3. write the credentials file unless it exists
//! 4. print the activation command
//!
//! Existence is the only state checked, so re-running is a no-op for steps
//! 1 and 3. Nothing is rolled back on failure.

use std::path::{Path, PathBuf};

use crate::config::BootstrapConfig;
use crate::credentials::CredentialSource;
use crate::error::{Result, SetupError};
use crate::process::{self, CommandSpec};
use crate::ui::Reporter;

pub const BANNER: &str = "=== BluePrint2Model Environment Setup ===";

/// Path of the installer inside an environment directory
pub fn installer_path(venv_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_dir.join("Scripts").join("pip.exe")
    } else {
        venv_dir.join("bin").join("pip")
    }
}

/// Shell command that activates the environment
pub fn activation_command(venv_dir: &Path) -> String {
    if cfg!(windows) {
        format!("{}\\Scripts\\activate", venv_dir.display())
    } else {
        format!("source {}/bin/activate", venv_dir.display())
    }
}

/// `<python> -m venv <venv_dir>`
pub fn venv_command(config: &BootstrapConfig) -> CommandSpec {
    CommandSpec::new(&config.python)
        .arg("-m")
        .arg("venv")
        .path_arg(&config.venv_dir)
}

/// `<venv pip> install -r <manifest>`
pub fn install_command(config: &BootstrapConfig) -> CommandSpec {
    CommandSpec::new(installer_path(&config.venv_dir))
        .arg("install")
        .arg("-r")
        .path_arg(&config.requirements_file)
}

/// Runs the bootstrap steps against one configuration
pub struct Bootstrapper<'a> {
    config: &'a BootstrapConfig,
    reporter: &'a mut dyn Reporter,
}

impl<'a> Bootstrapper<'a> {
    pub fn new(config: &'a BootstrapConfig, reporter: &'a mut dyn Reporter) -> Self {
        Self { config, reporter }
    }

    /// Create the environment directory if it is absent.
    ///
    /// Returns `true` when the environment was created by this call.
    pub fn ensure_environment(&mut self) -> Result<bool> {
        if self.config.venv_dir.exists() {
            self.reporter.step("Virtual environment already exists.");
            return Ok(false);
        }

        self.reporter.step("Creating virtual environment...");
        process::run(&venv_command(self.config), self.reporter)?;
        Ok(true)
    }

    /// Install the dependency manifest into the environment
    pub fn install_dependencies(&mut self) -> Result<()> {
        self.reporter.step("Installing dependencies...");

        let manifest = &self.config.requirements_file;
        if !manifest.is_file() {
            return Err(SetupError::ManifestNotFound {
                path: manifest.display().to_string(),
            });
        }

        process::run(&install_command(self.config), self.reporter)
    }

    /// Write the credentials file from `source` if it is absent.
    ///
    /// An existing file is never touched, even when its values are stale.
    /// Returns `true` when the file was written by this call.
    pub fn ensure_credentials(&mut self, source: &mut dyn CredentialSource) -> Result<bool> {
        let env_file = &self.config.env_file;
        let name = file_label(env_file);

        if env_file.exists() {
            self.reporter.step(&format!("{name} file already exists."));
            return Ok(false);
        }

        self.reporter.step(&format!("Creating {name} file..."));
        let credentials = source.gather()?;
        credentials.write_to(env_file)?;
        self.reporter.success(&format!("{name} file created."));
        Ok(true)
    }

    /// Run every step, then print the activation hint
    pub fn run(&mut self, source: &mut dyn CredentialSource) -> Result<()> {
        self.reporter.banner(BANNER);
        self.reporter.detail(&format!("Project: {}", self.config.project_root.display()));

        self.ensure_environment()?;
        self.install_dependencies()?;
        self.ensure_credentials(source)?;

        self.reporter.success("Setup complete. Activate with:");
        self.reporter.detail(&activation_command(&self.config.venv_dir));
        Ok(())
    }
}

fn file_label(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
