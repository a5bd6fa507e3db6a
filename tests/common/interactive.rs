//! Terminal-driven runs of the binary for prompt tests
//!
//! The credential prompt reads from the terminal, not stdin, so these tests
//! attach the binary to a pseudo-terminal. The prompt runs in raw mode, where
//! Enter is a carriage return.

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use expectrl::session::OsSession;
use expectrl::{Eof, Expect, Session};

use super::READ_VARS;

const EXPECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct InteractiveTest {
    session: OsSession,
}

impl InteractiveTest {
    /// Spawn the binary in `workdir` with a clean environment
    pub fn new(workdir: &Path, args: &[&str]) -> Result<Self, expectrl::Error> {
        let mut command = Command::new(env!("CARGO_BIN_EXE_bp2m-setup"));
        command.args(args).current_dir(workdir);
        for var in READ_VARS {
            command.env_remove(var);
        }
        command.env("NO_COLOR", "1");

        let mut session = Session::spawn(command)?;
        session.set_expect_timeout(Some(EXPECT_TIMEOUT));
        Ok(Self { session })
    }

    /// Block until `text` appears in the output
    pub fn wait_for_text(&mut self, text: &str) -> Result<(), expectrl::Error> {
        self.session.expect(text)?;
        Ok(())
    }

    pub fn send_input(&mut self, input: &str) -> Result<(), expectrl::Error> {
        self.session.send(input)?;
        Ok(())
    }

    pub fn send_enter(&mut self) -> Result<(), expectrl::Error> {
        self.send_input("\r")
    }

    pub fn send_escape(&mut self) -> Result<(), expectrl::Error> {
        self.send_input("\x1b")
    }

    /// Block until the process closes the terminal
    pub fn wait_for_exit(&mut self) -> Result<(), expectrl::Error> {
        self.session.expect(Eof)?;
        Ok(())
    }
}
