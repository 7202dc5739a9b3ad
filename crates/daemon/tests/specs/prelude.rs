//! Shared helpers for recond specs

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory holding event files and configs for one spec
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` inside the project; returns the full path
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Write watch events, one JSON object per line
    pub fn events(&self, lines: &[&str]) -> PathBuf {
        self.file("events.jsonl", &format!("{}\n", lines.join("\n")))
    }

    /// recond running in the project directory
    pub fn recond(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_recond"));
        cmd.current_dir(self.dir.path()).env("RUST_LOG", "info");
        cmd
    }
}

/// JSON for an object in namespace `ns`
pub fn object(name: &str) -> String {
    format!(r#"{{"metadata":{{"namespace":"ns","name":"{}"}}}}"#, name)
}

pub fn listed(names: &[&str]) -> String {
    let objects: Vec<String> = names.iter().map(|n| object(n)).collect();
    format!(r#"{{"type":"LISTED","object":[{}]}}"#, objects.join(","))
}

pub fn added(name: &str) -> String {
    format!(r#"{{"type":"ADDED","object":{}}}"#, object(name))
}

pub fn deleted(name: &str) -> String {
    format!(r#"{{"type":"DELETED","object":{}}}"#, object(name))
}

/// Fluent assertions on a finished command
pub trait CommandExt {
    fn passes(&mut self) -> Assert;
    fn fails(&mut self) -> Assert;
}

impl CommandExt for Command {
    fn passes(&mut self) -> Assert {
        self.assert().success()
    }

    fn fails(&mut self) -> Assert {
        self.assert().failure()
    }
}

pub trait AssertExt {
    fn stdout_has(self, expected: &str) -> Self;
    fn stdout_lacks(self, unexpected: &str) -> Self;
    fn stderr_has(self, expected: &str) -> Self;
}

impl AssertExt for Assert {
    fn stdout_has(self, expected: &str) -> Self {
        self.stdout(predicate::str::contains(expected))
    }

    fn stdout_lacks(self, unexpected: &str) -> Self {
        self.stdout(predicate::str::contains(unexpected).not())
    }

    fn stderr_has(self, expected: &str) -> Self {
        self.stderr(predicate::str::contains(expected))
    }
}
