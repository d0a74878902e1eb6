//! Types for action dispatch.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::install::InstallError;
use crate::options::OptionsError;
use crate::process::ProcessError;
use crate::target::TargetError;

/// A requested intent. Exactly one per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  /// Build the product.
  Build,
  /// Build and run the package tests.
  Test,
  /// Build the product, then copy it into each prefix's `bin` directory.
  Install { prefixes: Vec<PathBuf> },
}

impl Action {
  pub fn name(&self) -> &'static str {
    match self {
      Action::Build => "build",
      Action::Test => "test",
      Action::Install { .. } => "install",
    }
  }

  pub fn is_install(&self) -> bool {
    matches!(self, Action::Install { .. })
  }

  /// The SwiftPM step failures during planning are attributed to.
  pub fn primary_step(&self) -> Step {
    match self {
      Action::Build | Action::Install { .. } => Step::Build,
      Action::Test => Step::Test,
    }
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}

/// One externally visible unit of work within an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
  Update,
  Build,
  Test,
  Install,
}

impl Step {
  /// Lowercase banner verb, e.g. `building`.
  pub fn progress(&self) -> &'static str {
    match self {
      Step::Update => "updating dependencies of",
      Step::Build => "building",
      Step::Test => "testing",
      Step::Install => "installing",
    }
  }

  /// Capitalised form used in failure reports, e.g. `Building`.
  pub fn label(&self) -> &'static str {
    match self {
      Step::Update => "Updating dependencies of",
      Step::Build => "Building",
      Step::Test => "Testing",
      Step::Install => "Installing",
    }
  }
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}

/// Why a step failed.
#[derive(Debug, Error)]
pub enum StepError {
  #[error(transparent)]
  Target(#[from] TargetError),

  #[error(transparent)]
  Options(#[from] OptionsError),

  #[error(transparent)]
  Process(#[from] ProcessError),

  #[error(transparent)]
  Install(#[from] InstallError),
}

impl StepError {
  /// The process error behind this failure, if any.
  pub fn process_error(&self) -> Option<&ProcessError> {
    match self {
      StepError::Process(e) | StepError::Target(TargetError::Query(e)) => Some(e),
      StepError::Install(e) => e.process_error(),
      StepError::Target(_) | StepError::Options(_) => None,
    }
  }
}

/// A fatal failure that aborted the run.
#[derive(Debug, Error)]
#[error("{step} {subject} failed")]
pub struct DispatchError {
  pub step: Step,
  pub subject: String,
  #[source]
  pub source: StepError,
}

impl DispatchError {
  /// The external command line that failed, when a process was involved.
  pub fn command_line(&self) -> Option<&str> {
    self.source.process_error().map(ProcessError::command_line)
  }

  /// How the external command failed, when a process was involved.
  pub fn process_status(&self) -> Option<String> {
    self.source.process_error().map(ProcessError::status)
  }
}
