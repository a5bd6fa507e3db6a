//! Credentials file (`.env`) gathering and rendering
//!
//! The file always holds the same three lines in a fixed order:
//!
//! ```text
//! OPENAI_API_KEY=...
//! ANTHROPIC_API_KEY=...
//! GOOGLE_API_KEY=...
//! ```
//!
//! Values are written verbatim with no quoting or escaping. On Unix that
//! means byte for byte, so a key that is not valid UTF-8 still lands in the
//! file unchanged. Where values come from is a [`CredentialSource`]: process
//! environment variables or an interactive prompt.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use inquire::validator::ValueRequiredValidator;
use inquire::{Password, PasswordDisplayMode};

use crate::error::{Result, SetupError};

/// The API keys written to the credentials file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKey {
    OpenAi,
    Anthropic,
    Google,
}

impl ApiKey {
    /// File order
    pub const ALL: [ApiKey; 3] = [ApiKey::OpenAi, ApiKey::Anthropic, ApiKey::Google];

    /// Variable name, used both in the file and in the process environment
    pub fn var_name(self) -> &'static str {
        match self {
            ApiKey::OpenAi => "OPENAI_API_KEY",
            ApiKey::Anthropic => "ANTHROPIC_API_KEY",
            ApiKey::Google => "GOOGLE_API_KEY",
        }
    }

    pub fn provider(self) -> &'static str {
        match self {
            ApiKey::OpenAi => "OpenAI",
            ApiKey::Anthropic => "Anthropic",
            ApiKey::Google => "Google",
        }
    }

    /// Whether a blank answer is accepted at the interactive prompt
    pub fn optional(self) -> bool {
        !matches!(self, ApiKey::OpenAi)
    }
}

/// Look up a key in the process environment without requiring UTF-8
fn process_lookup(name: &str) -> Option<OsString> {
    std::env::var_os(name)
}

#[cfg(unix)]
fn value_bytes(value: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;

    Cow::Borrowed(value.as_bytes())
}

#[cfg(not(unix))]
fn value_bytes(value: &OsStr) -> Cow<'_, [u8]> {
    // Values reaching here were checked by `checked_value`
    Cow::Owned(value.to_string_lossy().into_owned().into_bytes())
}

/// Reject values that cannot be written verbatim on this platform
#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn checked_value(_key: ApiKey, value: OsString) -> Result<OsString> {
    Ok(value)
}

#[cfg(not(unix))]
fn checked_value(key: ApiKey, value: OsString) -> Result<OsString> {
    if value.to_str().is_none() {
        return Err(SetupError::NonUnicodeValue {
            name: key.var_name().to_string(),
        });
    }
    Ok(value)
}

/// Gathered credential values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub openai: OsString,
    pub anthropic: OsString,
    pub google: OsString,
}

impl Credentials {
    pub fn get(&self, key: ApiKey) -> &OsStr {
        match key {
            ApiKey::OpenAi => &self.openai,
            ApiKey::Anthropic => &self.anthropic,
            ApiKey::Google => &self.google,
        }
    }

    pub fn set(&mut self, key: ApiKey, value: OsString) {
        match key {
            ApiKey::OpenAi => self.openai = value,
            ApiKey::Anthropic => self.anthropic = value,
            ApiKey::Google => self.google = value,
        }
    }

    /// Render as three `NAME=VALUE` lines
    pub fn render(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for key in ApiKey::ALL {
            out.extend_from_slice(key.var_name().as_bytes());
            out.push(b'=');
            out.extend_from_slice(&value_bytes(self.get(key)));
            out.push(b'\n');
        }
        out
    }

    /// Create the file and write the rendered lines.
    ///
    /// Creation is exclusive: an existing entry at `path`, including a
    /// dangling symlink, fails the write instead of being followed or
    /// truncated. Creation mode is the platform default.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let write_failed = |e: std::io::Error| SetupError::FileWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(write_failed)?;
        file.write_all(&self.render()).map_err(write_failed)
    }
}

/// Strategy for obtaining credential values
pub trait CredentialSource {
    fn gather(&mut self) -> Result<Credentials>;
}

/// Reads each key from a variable lookup; unset variables become empty
pub struct EnvSource<F> {
    lookup: F,
}

impl EnvSource<fn(&str) -> Option<OsString>> {
    /// Source backed by the process environment
    pub fn process() -> Self {
        Self::with_lookup(process_lookup)
    }
}

impl<F> EnvSource<F>
where
    F: Fn(&str) -> Option<OsString>,
{
    pub fn with_lookup(lookup: F) -> Self {
        Self { lookup }
    }
}

impl<F> CredentialSource for EnvSource<F>
where
    F: Fn(&str) -> Option<OsString>,
{
    fn gather(&mut self) -> Result<Credentials> {
        let mut credentials = Credentials::default();
        for key in ApiKey::ALL {
            let value = (self.lookup)(key.var_name()).unwrap_or_default();
            credentials.set(key, checked_value(key, value)?);
        }
        Ok(credentials)
    }
}

/// A single question put to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub key: ApiKey,
    /// Whether a blank answer is rejected
    pub required: bool,
    /// Value used when the answer is blank (taken from the environment)
    pub fallback: Option<OsString>,
}

/// Terminal input behind the prompt source
pub trait Prompter {
    fn ask(&mut self, question: &Question) -> Result<String>;
}

/// Masked terminal prompt using `inquire`
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn ask(&mut self, question: &Question) -> Result<String> {
        let key = question.key;
        let message = if key.optional() {
            format!("{} API key (optional):", key.provider())
        } else {
            format!("{} API key:", key.provider())
        };
        let help = if question.fallback.is_some() {
            format!("Leave blank to use ${}", key.var_name())
        } else if key.optional() {
            "Leave blank to skip".to_string()
        } else {
            format!("Stored as {}", key.var_name())
        };

        let mut prompt = Password::new(&message)
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .with_help_message(&help);
        if question.required {
            prompt = prompt.with_validator(ValueRequiredValidator::new(format!(
                "The {} key is required",
                key.provider()
            )));
        }

        Ok(prompt.prompt()?)
    }
}

/// Asks the user for each key in file order
pub struct PromptSource<P, F> {
    prompter: P,
    lookup: F,
}

impl<P: Prompter> PromptSource<P, fn(&str) -> Option<OsString>> {
    /// Prompt source that offers process environment values as fallbacks
    pub fn new(prompter: P) -> Self {
        Self::with_lookup(prompter, process_lookup)
    }
}

impl<P, F> PromptSource<P, F>
where
    P: Prompter,
    F: Fn(&str) -> Option<OsString>,
{
    pub fn with_lookup(prompter: P, lookup: F) -> Self {
        Self { prompter, lookup }
    }

    fn ask_one(&mut self, key: ApiKey) -> Result<OsString> {
        let fallback = match (self.lookup)(key.var_name()) {
            Some(value) if !value.is_empty() => Some(checked_value(key, value)?),
            _ => None,
        };
        let question = Question {
            key,
            required: !key.optional() && fallback.is_none(),
            fallback,
        };

        loop {
            let answer = self.prompter.ask(&question)?;
            let answer = answer.trim();

            if !answer.is_empty() {
                return Ok(OsString::from(answer));
            }
            if let Some(fallback) = &question.fallback {
                return Ok(fallback.clone());
            }
            if !question.required {
                return Ok(OsString::new());
            }
        }
    }
}

impl<P, F> CredentialSource for PromptSource<P, F>
where
    P: Prompter,
    F: Fn(&str) -> Option<OsString>,
{
    fn gather(&mut self) -> Result<Credentials> {
        let mut credentials = Credentials::default();
        for key in ApiKey::ALL {
            let value = self.ask_one(key)?;
            credentials.set(key, value);
        }
        Ok(credentials)
    }
}
