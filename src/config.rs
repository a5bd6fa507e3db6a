//! Bootstrap configuration
//!
//! Settings are layered: built-in defaults, then the optional
//! `bp2m-setup.yaml` at the project root, then command line flags.
//! The result is a [`BootstrapConfig`] built once at startup and passed to
//! every step, so nothing depends on the process working directory after
//! resolution.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SetupError};

/// Optional configuration file at the project root
pub const CONFIG_FILE: &str = "bp2m-setup.yaml";

/// Environment directory name
pub const DEFAULT_VENV_DIR: &str = "venv";

/// Dependency manifest name
pub const DEFAULT_REQUIREMENTS_FILE: &str = "requirements.txt";

/// Credentials file name
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Where credential values come from when the credentials file is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CredentialMode {
    /// Read `*_API_KEY` process environment variables
    #[default]
    Env,
    /// Ask for each key on the terminal
    Prompt,
}

/// Interpreter used to create the environment when none is configured
pub fn default_python() -> &'static str {
    if cfg!(windows) { "python" } else { "python3" }
}

/// Contents of `bp2m-setup.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub venv: Option<PathBuf>,
    #[serde(default)]
    pub requirements: Option<PathBuf>,
    #[serde(default)]
    pub env_file: Option<PathBuf>,
    #[serde(default)]
    pub python: Option<String>,
    #[serde(default)]
    pub credentials: Option<CredentialMode>,
}

impl ConfigFile {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str, path: &Path) -> Result<Self> {
        // An empty file deserializes to unit, not a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| SetupError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Load `bp2m-setup.yaml` from the project root if it exists
    pub fn load(project_root: &Path) -> Result<Option<Self>> {
        let path = project_root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| SetupError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&content, &path).map(Some)
    }
}

/// Values given on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub venv: Option<PathBuf>,
    pub requirements: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    pub python: Option<String>,
    pub credentials: Option<CredentialMode>,
}

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapConfig {
    pub project_root: PathBuf,
    pub venv_dir: PathBuf,
    pub requirements_file: PathBuf,
    pub env_file: PathBuf,
    pub python: String,
    pub credentials: CredentialMode,
}

impl BootstrapConfig {
    /// Configuration with every setting at its default
    #[cfg(test)]
    pub fn with_defaults(project_root: impl Into<PathBuf>) -> Self {
        Self::resolve(project_root.into(), ConfigFile::default(), Overrides::default())
    }

    /// Merge defaults, file and command line values.
    ///
    /// Relative paths are joined onto `project_root`; absolute ones are kept.
    pub fn resolve(project_root: PathBuf, file: ConfigFile, overrides: Overrides) -> Self {
        let pick = |cli: Option<PathBuf>, from_file: Option<PathBuf>, default: &str| {
            let path = cli.or(from_file).unwrap_or_else(|| PathBuf::from(default));
            project_root.join(path)
        };

        let venv_dir = pick(overrides.venv, file.venv, DEFAULT_VENV_DIR);
        let requirements_file = pick(
            overrides.requirements,
            file.requirements,
            DEFAULT_REQUIREMENTS_FILE,
        );
        let env_file = pick(overrides.env_file, file.env_file, DEFAULT_ENV_FILE);

        let python = overrides
            .python
            .or(file.python)
            .unwrap_or_else(|| default_python().to_string());
        let credentials = overrides
            .credentials
            .or(file.credentials)
            .unwrap_or_default();

        Self {
            project_root,
            venv_dir,
            requirements_file,
            env_file,
            python,
            credentials,
        }
    }

    /// Resolve the project root and build the configuration from it.
    ///
    /// `project_root` defaults to the current directory. It must exist; it is
    /// canonicalized without Windows verbatim prefixes so printed paths stay
    /// usable in a shell.
    pub fn load(project_root: Option<PathBuf>, overrides: Overrides) -> Result<Self> {
        let root = match project_root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };

        if !root.is_dir() {
            return Err(SetupError::ProjectRootNotFound {
                path: root.display().to_string(),
            });
        }

        let root = dunce::canonicalize(&root)?;
        let file = ConfigFile::load(&root)?.unwrap_or_default();

        Ok(Self::resolve(root, file, overrides))
    }
}
