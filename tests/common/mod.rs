#![allow(dead_code)]

pub mod mock_data;

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper struct to run planner commands in an isolated temp directory
pub struct PlannerTest {
    pub temp_dir: TempDir,
    binary_path: &'static str,
}

impl PlannerTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        PlannerTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_planner"),
        }
    }

    /// A temp directory that has already been through `planner init`
    pub fn initialized() -> Self {
        let test = Self::new();
        test.run_success(&["init"]);
        test
    }

    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join(".planner")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(self.binary_path)
            .args(args)
            .current_dir(self.temp_dir.path())
            .env_remove("PLANNER_ROOT")
            .env("NO_COLOR", "1")
            .output()
            .expect("Failed to execute planner command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let stdout = self.run_success(args);
        serde_json::from_str(&stdout).expect("command output should be valid JSON")
    }

    pub fn write_file(&self, name: &str, content: &str) {
        let dir = self.root();
        fs::create_dir_all(&dir).expect("Failed to create .planner directory");
        fs::write(dir.join(name), content).expect("Failed to write planner file");
    }

    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.root().join(name)).expect("Failed to read planner file")
    }
}
