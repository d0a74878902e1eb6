//! Runner backed by real child processes.

use std::process::{Command, Stdio};

use tracing::debug;

use super::{Invocation, ProcessError, ProcessRunner};

/// Spawns real processes with [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
  echo: bool,
}

impl SystemRunner {
  /// Create a runner. With `echo` set, each command line is printed to
  /// standard output before it runs.
  pub fn new(echo: bool) -> Self {
    Self { echo }
  }

  fn command(&self, invocation: &Invocation) -> Command {
    let rendered = invocation.to_string();
    if self.echo {
      println!("{}", rendered);
    }
    debug!(cmd = %rendered, "spawning process");

    let mut command = Command::new(invocation.program());
    command.args(invocation.arguments());
    if let Some(env) = invocation.environment() {
      command.env_clear().envs(env);
    }
    command
  }
}

impl ProcessRunner for SystemRunner {
  fn run(&self, invocation: &Invocation) -> Result<(), ProcessError> {
    let mut command = self.command(invocation);
    command.stdout(Stdio::inherit()).stderr(Stdio::from(std::io::stdout()));

    let status = command.status().map_err(|source| ProcessError::Spawn {
      cmd: invocation.to_string(),
      source,
    })?;

    if !status.success() {
      return Err(ProcessError::Failed {
        cmd: invocation.to_string(),
        code: status.code(),
      });
    }

    Ok(())
  }

  fn capture(&self, invocation: &Invocation) -> Result<String, ProcessError> {
    let mut command = self.command(invocation);
    command.stdin(Stdio::null()).stderr(Stdio::null());

    let output = command.output().map_err(|source| ProcessError::Spawn {
      cmd: invocation.to_string(),
      source,
    })?;

    if !output.status.success() {
      return Err(ProcessError::Failed {
        cmd: invocation.to_string(),
        code: output.status.code(),
      });
    }

    let stdout = String::from_utf8(output.stdout).map_err(|_| ProcessError::InvalidOutput {
      cmd: invocation.to_string(),
    })?;

    Ok(stdout.trim().to_string())
  }
}
