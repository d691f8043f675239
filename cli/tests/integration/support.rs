//! Shared setup for binary tests.

#![allow(clippy::expect_used, clippy::unwrap_used, dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated home with a registry document.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn with_registry(contents: &str) -> Self {
        let sandbox = Self::new();
        std::fs::write(sandbox.registry(), contents).unwrap();
        sandbox
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn registry(&self) -> PathBuf {
        self.path().join("mcp.json")
    }

    pub fn report(&self) -> PathBuf {
        self.path().join("health-report.json")
    }

    pub fn config(&self) -> PathBuf {
        self.path().join("config.yaml")
    }

    /// `mcpdoc` with every location pinned inside the sandbox.
    pub fn mcpdoc(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mcpdoc"));
        cmd.env("NO_COLOR", "1")
            .env("HOME", self.path())
            .env("MCPDOC_CONFIG", self.config())
            .env("MCPDOC_REGISTRY", self.registry())
            .env("MCPDOC_REPORT", self.report())
            .env_remove("CI")
            .env_remove("MCPDOC_YES")
            .env_remove("MCPDOC_LOG");
        cmd
    }

    /// Files in the sandbox whose name contains `.backup.`.
    pub fn backups(&self) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = std::fs::read_dir(self.path())
            .unwrap()
            .flatten()
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.contains(".backup."))
            })
            .collect();
        found.sort();
        found
    }
}

/// Registry with one entry in each health state.
pub fn mixed_registry(script_dir: &Path) -> String {
    let present = script_dir.join("present.js");
    std::fs::write(&present, "// server").unwrap();
    let gone = script_dir.join("gone.js");
    serde_json::json!({
        "theme": "dark",
        "mcpServers": {
            "alpha": {"command": "npx", "args": ["-y", "@mcp/alpha"], "env": {"TOKEN": "your_token_here"}},
            "memory": {"command": "node", "args": [present]},
            "beta": {"command": "node", "args": [gone]},
            "custom": {"command": "docker", "args": ["run", "img"]}
        }
    })
    .to_string()
}
