//! Common test utilities for bp2m-setup integration tests

#[cfg(unix)]
#[allow(dead_code)]
pub mod interactive;

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Environment variables the binary reads; cleared so the host shell
/// cannot leak into a test
pub const READ_VARS: [&str; 5] = [
    "OPENAI_API_KEY",
    "ANTHROPIC_API_KEY",
    "GOOGLE_API_KEY",
    "BP2M_PROJECT_ROOT",
    "BP2M_PYTHON",
];

/// A throwaway project checkout
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create a new empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Command for the real binary, run from the project root with a clean
    /// environment
    pub fn cmd(&self) -> Command {
        // cargo_bin is deprecated, but the replacement macro needs a newer assert_cmd
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("bp2m-setup").expect("Failed to find bp2m-setup binary");
        cmd.current_dir(&self.path);
        for var in READ_VARS {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write a minimal requirements.txt
    #[allow(dead_code)]
    pub fn write_requirements(&self) {
        self.write_file("requirements.txt", "requests==2.31.0\npython-dotenv\n");
    }

    /// Create `venv/bin/pip` as a script exiting with `exit_code`
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn install_fake_pip(&self, exit_code: i32) {
        let script = format!("#!/bin/sh\necho \"fake pip $*\"\nexit {exit_code}\n");
        self.write_executable("venv/bin/pip", &script);
    }

    /// Create a fake interpreter that lays out `<target>/bin/pip` when run as
    /// `python -m venv <target>`. Returns its path.
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn install_fake_python(&self) -> PathBuf {
        let script = "#!/bin/sh\n\
                      mkdir -p \"$3/bin\"\n\
                      printf '#!/bin/sh\\nexit 0\\n' > \"$3/bin/pip\"\n\
                      chmod +x \"$3/bin/pip\"\n";
        self.write_executable("tools/python", script)
    }

    #[cfg(unix)]
    fn write_executable(&self, path: &str, content: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        self.write_file(path, content);
        let full = self.path.join(path);
        std::fs::set_permissions(&full, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        full
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
