//! Copying the built product into install prefixes.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::consts::SYNC_PROGRAM;
use crate::env::Environment;
use crate::process::{Invocation, ProcessError, ProcessRunner};

/// Errors that can occur while installing.
#[derive(Debug, Error)]
pub enum InstallError {
  #[error("bin path query failed: {0}")]
  BinPath(#[source] ProcessError),

  #[error("bin path query returned nothing")]
  EmptyBinPath,

  #[error("cannot create {path}: {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("copy failed: {0}")]
  Copy(#[source] ProcessError),
}

impl InstallError {
  /// The process error behind this failure, if any.
  pub fn process_error(&self) -> Option<&ProcessError> {
    match self {
      InstallError::BinPath(e) | InstallError::Copy(e) => Some(e),
      InstallError::EmptyBinPath | InstallError::CreateDir { .. } => None,
    }
  }
}

/// Build the `--show-bin-path` query for the current options.
pub fn bin_path_invocation(swift_exec: &Path, options: &[String], env: Environment) -> Invocation {
  Invocation::new(swift_exec)
    .args(["build", "--show-bin-path"])
    .args(options.iter().cloned())
    .env(env)
}

/// Ask SwiftPM where it puts binaries for the given options. Builds nothing.
pub fn query_bin_path(runner: &impl ProcessRunner, invocation: &Invocation) -> Result<PathBuf, InstallError> {
  let output = runner.capture(invocation).map_err(InstallError::BinPath)?;
  if output.is_empty() {
    return Err(InstallError::EmptyBinPath);
  }
  debug!(bin_path = %output, "resolved bin path");
  Ok(PathBuf::from(output))
}

/// A resolved product binary and the prefixes it is copied into.
///
/// Prefixes keep their given order; duplicates are copied again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
  source: PathBuf,
  prefixes: Vec<PathBuf>,
}

impl InstallPlan {
  pub fn new(bin_path: &Path, product: &str, prefixes: &[PathBuf]) -> Self {
    Self {
      source: bin_path.join(product),
      prefixes: prefixes.to_vec(),
    }
  }

  pub fn source(&self) -> &Path {
    &self.source
  }

  pub fn prefixes(&self) -> &[PathBuf] {
    &self.prefixes
  }

  /// One `rsync -a <source> <prefix>/bin` per prefix, in order.
  pub fn copy_invocations(&self) -> Vec<(PathBuf, Invocation)> {
    self
      .prefixes
      .iter()
      .map(|prefix| {
        let dest = prefix.join("bin");
        let invocation = Invocation::new(SYNC_PROGRAM).args([
          "-a".to_string(),
          self.source.to_string_lossy().into_owned(),
          dest.to_string_lossy().into_owned(),
        ]);
        (dest, invocation)
      })
      .collect()
  }

  /// Copy the product into every prefix. Stops at the first failure.
  pub fn execute(&self, runner: &impl ProcessRunner) -> Result<(), InstallError> {
    for (dest, invocation) in self.copy_invocations() {
      std::fs::create_dir_all(&dest).map_err(|source| InstallError::CreateDir {
        path: dest.clone(),
        source,
      })?;
      runner.run(&invocation).map_err(InstallError::Copy)?;
      info!(dest = %dest.display(), "installed {}", self.source.display());
    }
    Ok(())
  }
}
