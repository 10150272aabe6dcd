//! Common test utilities and helpers
//!
//! This module provides reusable test helpers to reduce code duplication
//! across integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test command builder for the newman-batch CLI
pub struct TestCommand {
    cmd: Command,
}

impl TestCommand {
    /// Create a command running inside `dir`, isolated from the user's
    /// configuration and environment
    pub fn new(dir: &Path) -> Self {
        let mut cmd = Command::cargo_bin("newman-batch").expect("Failed to find newman-batch binary");
        cmd.current_dir(dir)
            .env("HOME", dir)
            .env("XDG_CONFIG_HOME", dir.join(".config"))
            .env_remove("NEWMAN_BIN")
            .env_remove("NEWMAN_BATCH_SCRIPTS_DIR")
            .env_remove("RUST_LOG");
        Self { cmd }
    }

    /// Add arguments to the command
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.cmd.args(args);
        self
    }

    /// Add a single argument to the command
    pub fn arg<S: AsRef<std::ffi::OsStr>>(mut self, arg: S) -> Self {
        self.cmd.arg(arg);
        self
    }

    /// Set environment variable
    pub fn env<K, V>(mut self, key: K, val: V) -> Self
    where
        K: AsRef<std::ffi::OsStr>,
        V: AsRef<std::ffi::OsStr>,
    {
        self.cmd.env(key, val);
        self
    }

    /// Execute and expect success
    pub fn expect_success(mut self) -> TestAssertion {
        let assert = self.cmd.assert().success();
        TestAssertion { assert }
    }

    /// Execute and expect exit code 1
    pub fn expect_failure(mut self) -> TestAssertion {
        let assert = self.cmd.assert().failure().code(1);
        TestAssertion { assert }
    }

    /// Rejected by clap while parsing, which exits with status 2
    pub fn expect_parse_error(mut self) -> TestAssertion {
        let assert = self.cmd.assert().failure().code(2);
        TestAssertion { assert }
    }
}

/// Test assertion wrapper with convenient methods
pub struct TestAssertion {
    assert: assert_cmd::assert::Assert,
}

impl TestAssertion {
    /// Assert stdout contains text
    pub fn stdout_contains<S: AsRef<str>>(self, text: S) -> Self {
        let assert = self.assert.stdout(predicate::str::contains(text.as_ref()));
        Self { assert }
    }

    /// Assert stdout does not contain text
    pub fn stdout_lacks<S: AsRef<str>>(self, text: S) -> Self {
        let assert = self
            .assert
            .stdout(predicate::str::contains(text.as_ref()).not());
        Self { assert }
    }

    /// Assert stderr contains text
    pub fn stderr_contains<S: AsRef<str>>(self, text: S) -> Self {
        let assert = self.assert.stderr(predicate::str::contains(text.as_ref()));
        Self { assert }
    }

    /// Assert multiple stdout patterns
    pub fn stdout_contains_all<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            self.assert = self.assert.stdout(predicate::str::contains(pattern.as_ref()));
        }
        Self { assert: self.assert }
    }

    /// Finish the assertion
    pub fn done(self) -> assert_cmd::assert::Assert {
        self.assert
    }
}

/// Scratch workspace with a collections directory
pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::create_dir(temp_dir.path().join("collections"))
            .expect("Failed to create collections directory");
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn source(&self) -> PathBuf {
        self.root().join("collections")
    }

    /// Write a JSON document into the collections directory
    pub fn add_collection(&self, name: &str, document: &Value) -> PathBuf {
        let path = self.source().join(name);
        std::fs::write(&path, serde_json::to_vec_pretty(document).unwrap())
            .expect("Failed to write collection");
        path
    }

    /// Write a file relative to the workspace root
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Create a command running in this workspace with `--source` set
    pub fn command(&self) -> TestCommand {
        TestCommand::new(self.root()).arg("--source").arg(self.source())
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Collection fixtures
pub mod fixtures {
    use super::*;

    /// One folder with a users request and an orders request
    pub fn users_and_orders() -> Value {
        json!({
            "info": {"name": "Shop API", "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"},
            "item": [{
                "name": "Endpoints",
                "item": [
                    {
                        "name": "Get user",
                        "request": {"method": "GET", "url": {"raw": "https://api.example.com/users/1"}},
                        "event": [{"listen": "test", "script": {"type": "text/javascript", "exec": ["old();"]}}]
                    },
                    {
                        "name": "Get order",
                        "request": {"method": "GET", "url": "https://api.example.com/orders/1"}
                    }
                ]
            }]
        })
    }

    /// A JSON document that is not a collection
    pub fn environment() -> Value {
        json!({"name": "dev", "values": [{"key": "host", "value": "localhost"}]})
    }
}
