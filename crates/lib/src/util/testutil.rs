//! Test utilities for swiftpm-helper-lib.
//!
//! Provides a recording [`ProcessRunner`] that never spawns anything, plus
//! cross-platform shell helpers for the tests that do.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::process::{Invocation, ProcessError, ProcessRunner};

/// Target info as printed by a Linux toolchain.
pub const LINUX_TARGET_INFO: &str = r#"{
  "compilerVersion": "Swift version 5.9",
  "target": {
    "triple": "x86_64-unknown-linux-gnu",
    "unversionedTriple": "x86_64-unknown-linux-gnu",
    "moduleTriple": "x86_64-unknown-linux-gnu",
    "librariesRequireRPath": false
  },
  "paths": { "runtimeLibraryPaths": ["/tc/lib/swift/linux"] }
}"#;

/// Target info as printed by a macOS toolchain.
pub const MACOS_TARGET_INFO: &str = r#"{
  "compilerVersion": "Swift version 5.9",
  "target": {
    "triple": "arm64-apple-macosx13.0",
    "unversionedTriple": "arm64-apple-macosx",
    "moduleTriple": "arm64-apple-macos",
    "librariesRequireRPath": false
  }
}"#;

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

/// A [`ProcessRunner`] that records every invocation instead of running it.
///
/// `capture` answers from a queue of scripted outputs. Any invocation whose
/// rendered command line contains a registered failure pattern fails with
/// exit code 1.
#[derive(Debug, Default)]
pub struct RecordingRunner {
  calls: RefCell<Vec<Invocation>>,
  outputs: RefCell<VecDeque<String>>,
  fail_on: Vec<String>,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Queue the standard output of the next `capture` call.
  pub fn with_output(self, output: &str) -> Self {
    self.outputs.borrow_mut().push_back(output.to_string());
    self
  }

  /// Fail every invocation whose command line contains `pattern`.
  pub fn failing_on(mut self, pattern: &str) -> Self {
    self.fail_on.push(pattern.to_string());
    self
  }

  /// All invocations seen so far, in order.
  pub fn calls(&self) -> Vec<Invocation> {
    self.calls.borrow().clone()
  }

  /// Command lines of all invocations seen so far.
  pub fn command_lines(&self) -> Vec<String> {
    self.calls.borrow().iter().map(ToString::to_string).collect()
  }

  fn record(&self, invocation: &Invocation) -> Result<(), ProcessError> {
    self.calls.borrow_mut().push(invocation.clone());
    let cmd = invocation.to_string();
    if self.fail_on.iter().any(|p| cmd.contains(p.as_str())) {
      return Err(ProcessError::Failed { cmd, code: Some(1) });
    }
    Ok(())
  }
}

impl ProcessRunner for RecordingRunner {
  fn run(&self, invocation: &Invocation) -> Result<(), ProcessError> {
    self.record(invocation)
  }

  fn capture(&self, invocation: &Invocation) -> Result<String, ProcessError> {
    self.record(invocation)?;
    Ok(self.outputs.borrow_mut().pop_front().unwrap_or_default())
  }
}
