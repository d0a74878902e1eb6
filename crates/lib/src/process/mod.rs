//! External process execution.
//!
//! Every side effect the helper has on the outside world goes through the
//! [`ProcessRunner`] trait: an [`Invocation`] goes in, an exit status or the
//! captured standard output comes back. The orchestration code never spawns
//! processes itself, so tests can substitute a recording fake.

mod system;

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::env::Environment;

pub use system::SystemRunner;

/// Errors raised while running an external command.
#[derive(Debug, Error)]
pub enum ProcessError {
  /// The program could not be started at all.
  #[error("failed to spawn {cmd}: {source}")]
  Spawn {
    cmd: String,
    #[source]
    source: std::io::Error,
  },

  /// The program ran and exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}")]
  Failed { cmd: String, code: Option<i32> },

  /// Captured output was not valid UTF-8.
  #[error("command produced non-UTF-8 output: {cmd}")]
  InvalidOutput { cmd: String },
}

impl ProcessError {
  /// The rendered command line that triggered this error.
  pub fn command_line(&self) -> &str {
    match self {
      ProcessError::Spawn { cmd, .. } | ProcessError::Failed { cmd, .. } | ProcessError::InvalidOutput { cmd } => cmd,
    }
  }

  /// Exit code of a process that ran and failed.
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      ProcessError::Failed { code, .. } => *code,
      ProcessError::Spawn { .. } | ProcessError::InvalidOutput { .. } => None,
    }
  }

  /// How the command failed, without the command line.
  pub fn status(&self) -> String {
    match self {
      ProcessError::Spawn { source, .. } => format!("could not start: {}", source),
      ProcessError::Failed { code: Some(code), .. } => format!("exit status: {}", code),
      ProcessError::Failed { code: None, .. } => "terminated by signal".to_string(),
      ProcessError::InvalidOutput { .. } => "produced non-UTF-8 output".to_string(),
    }
  }
}

/// A fully-determined external command: program, arguments and environment.
///
/// Built once with the consuming builder methods and never changed after it
/// is handed to a runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  program: PathBuf,
  args: Vec<String>,
  env: Option<Environment>,
}

impl Invocation {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      env: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  /// Replace the inherited environment with `env`.
  pub fn env(mut self, env: Environment) -> Self {
    self.env = Some(env);
    self
  }

  pub fn program(&self) -> &Path {
    &self.program
  }

  pub fn arguments(&self) -> &[String] {
    &self.args
  }

  /// The explicit environment, or `None` when the child inherits ours.
  pub fn environment(&self) -> Option<&Environment> {
    self.env.as_ref()
  }

  /// Value of `key` in the explicit environment, if one is set.
  pub fn env_var(&self, key: &str) -> Option<&OsString> {
    self.env.as_ref()?.get(&OsString::from(key))
  }

  /// Program followed by arguments, as plain strings.
  pub fn tokens(&self) -> Vec<String> {
    std::iter::once(self.program.to_string_lossy().into_owned())
      .chain(self.args.iter().cloned())
      .collect()
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let rendered: Vec<String> = self.tokens().iter().map(|t| escape_arg(t)).collect();
    write!(f, "{}", rendered.join(" "))
  }
}

/// Quote an argument for display when it contains a space or a double quote.
pub fn escape_arg(arg: &str) -> String {
  if arg.contains('"') || arg.contains(' ') {
    format!("\"{}\"", arg.replace('"', "\\\""))
  } else {
    arg.to_string()
  }
}

/// Runs external commands on behalf of the helper.
///
/// Both methods block until the child exits.
pub trait ProcessRunner {
  /// Run to completion, relaying output. Standard error is merged into
  /// standard output.
  fn run(&self, invocation: &Invocation) -> Result<(), ProcessError>;

  /// Run to completion and return standard output with surrounding
  /// whitespace trimmed. Standard error is discarded.
  fn capture(&self, invocation: &Invocation) -> Result<String, ProcessError>;
}
