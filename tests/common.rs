#![allow(dead_code)]

use std::{
    path::Path,
    process::{Command, Output},
};

use serde_json::Value;

/// Runs the `pill-tabs` binary headless and parses its frame output.
pub struct TraceHarness {
    command: Command,
}

impl TraceHarness {
    pub fn new() -> Self {
        let mut command = Command::new(env!("CARGO_BIN_EXE_pill-tabs"));
        // Keep the user's real config out of the picture.
        command.env("XDG_CONFIG_HOME", std::env::temp_dir().join("pill-tabs-test-none"));
        command.env("HOME", std::env::temp_dir().join("pill-tabs-test-none"));
        Self { command }
    }

    pub fn config(mut self, path: &Path) -> Self {
        self.command.arg("--config").arg(path);
        self
    }

    pub fn delay_ms(mut self, delay: u64) -> Self {
        self.command.arg("--delay-ms").arg(delay.to_string());
        self
    }

    pub fn output(mut self, width: u16, presses: &[&str]) -> Output {
        self.command
            .arg("trace")
            .arg("--width")
            .arg(width.to_string());
        if !presses.is_empty() {
            self.command.arg("--press").arg(presses.join(","));
        }
        self.command.output().expect("Failed to spawn pill-tabs")
    }

    /// Run a trace and return one JSON value per frame.
    pub fn frames(self, width: u16, presses: &[&str]) -> Vec<Value> {
        let output = self.output(width, presses);
        assert!(
            output.status.success(),
            "trace failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("stdout is not UTF-8")
            .lines()
            .map(|line| serde_json::from_str(line).expect("frame is not JSON"))
            .collect()
    }
}
