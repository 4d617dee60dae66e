//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers that isolate the environment
//! - Fixture documents

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A tree with one unit and one file, rendering without warnings.
#[allow(dead_code)]
pub const BASIC_CONFIG: &str = "\
hostname: core-01
systemd_unit:
  - name: tst.mount
    command: start
    content: |
      [Unit]
      Description=Test Mount
write_file:
  - path: /etc/resolv.conf
    permissions: \"0644\"
    owner: root
    content: nameserver 8.8.8.8
";

/// Expected document for [`BASIC_CONFIG`].
#[allow(dead_code)]
pub const BASIC_DOCUMENT: &str = "\
#cloud-config
hostname: core-01
coreos:
  units:
    - name: tst.mount
      command: start
      content: |
        [Unit]
        Description=Test Mount
write_files:
  - path: /etc/resolv.conf
    permissions: \"0644\"
    owner: root
    content: |
      nameserver 8.8.8.8
";

/// Test environment with an isolated temporary directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder with the binary's environment variables
    /// cleared so the host environment cannot leak into a test.
    pub fn command(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("coreos-cloudinit").expect("Failed to find coreos-cloudinit binary");
        cmd.env_remove("CLOUDINIT_INPUT")
            .env_remove("CLOUDINIT_USE_SHEBANG")
            .env_remove("CLOUDINIT_LOG_MODE");
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temporary directory and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }
}
