//! Console presentation layer
//!
//! All user-facing progress goes through the [`Reporter`] trait so the
//! bootstrap steps never print directly. The console reporter styles output
//! with `console`; the silent reporter drops progress messages for quiet mode
//! and for unit tests.

use console::Style;

/// Progress reporter for bootstrap steps
pub trait Reporter {
    /// Banner printed once at startup
    fn banner(&mut self, title: &str);

    /// A step is starting or was skipped
    fn step(&mut self, message: &str);

    /// Command about to be executed
    fn command(&mut self, command_line: &str);

    /// A step finished successfully
    fn success(&mut self, message: &str);

    /// Indented detail line, e.g. the activation command
    fn detail(&mut self, message: &str);
}

/// Reporter that writes styled lines to stdout
#[derive(Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn banner(&mut self, title: &str) {
        println!("{}", Style::new().bold().green().apply_to(title));
    }

    fn step(&mut self, message: &str) {
        println!("{message}");
    }

    fn command(&mut self, command_line: &str) {
        println!("{}", Style::new().dim().apply_to(format!("→ {command_line}")));
    }

    fn success(&mut self, message: &str) {
        println!("{} {message}", Style::new().green().bold().apply_to("✔"));
    }

    fn detail(&mut self, message: &str) {
        println!("    {}", Style::new().cyan().apply_to(message));
    }
}

/// Reporter for `--quiet`
///
/// Only command traces are kept, so the last line before a failure still
/// names the command being attempted.
#[derive(Default)]
pub struct QuietReporter;

impl Reporter for QuietReporter {
    fn banner(&mut self, _title: &str) {}

    fn step(&mut self, _message: &str) {}

    fn command(&mut self, command_line: &str) {
        println!("→ {command_line}");
    }

    fn success(&mut self, _message: &str) {}

    fn detail(&mut self, _message: &str) {}
}

/// Reporter that records every line instead of printing it
#[cfg(test)]
#[derive(Default)]
pub struct RecordingReporter {
    pub lines: Vec<String>,
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn banner(&mut self, title: &str) {
        self.lines.push(title.to_string());
    }

    fn step(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }

    fn command(&mut self, command_line: &str) {
        self.lines.push(format!("→ {command_line}"));
    }

    fn success(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }

    fn detail(&mut self, message: &str) {
        self.lines.push(format!("    {message}"));
    }
}
