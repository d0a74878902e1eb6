//! Action dispatch.
//!
//! An [`Action`] is a single requested intent. The [`Dispatcher`] turns it
//! into an ordered sequence of [`Step`]s and runs them, aborting at the first
//! failure. The target triple and the SwiftPM options are resolved at most
//! once per dispatcher and shared by every step.

mod types;

use std::cell::OnceCell;
use std::path::PathBuf;

use tracing::info;

use crate::env::{self, Environment};
use crate::install::{InstallPlan, bin_path_invocation, query_bin_path};
use crate::options::swiftpm_options;
use crate::process::{Invocation, ProcessRunner};
use crate::request::BuildRequest;
use crate::target::{TargetTriple, resolve_target};

pub use types::{Action, DispatchError, Step, StepError};

/// Drives SwiftPM for one [`BuildRequest`].
pub struct Dispatcher<R: ProcessRunner> {
  request: BuildRequest,
  runner: R,
  base_env: Environment,
  update: bool,
  target: OnceCell<TargetTriple>,
  options: OnceCell<Vec<String>>,
}

impl<R: ProcessRunner> Dispatcher<R> {
  /// Create a dispatcher. `base_env` is the environment every SwiftPM
  /// overlay starts from.
  pub fn new(request: BuildRequest, runner: R, base_env: Environment) -> Self {
    Self {
      request,
      runner,
      base_env,
      update: false,
      target: OnceCell::new(),
      options: OnceCell::new(),
    }
  }

  /// Run `swift package update` before the action.
  pub fn with_update(mut self, update: bool) -> Self {
    self.update = update;
    self
  }

  pub fn runner(&self) -> &R {
    &self.runner
  }

  /// Steps `action` expands to, in execution order.
  pub fn steps(&self, action: &Action) -> Vec<Step> {
    let mut steps = Vec::new();
    if self.update {
      steps.push(Step::Update);
    }
    match action {
      Action::Build => steps.push(Step::Build),
      Action::Test => steps.push(Step::Test),
      Action::Install { .. } => steps.extend([Step::Build, Step::Install]),
    }
    steps
  }

  /// Run every step of `action`, stopping at the first failure.
  ///
  /// The target and options are settled before anything is spawned, so an
  /// unsupported configuration never reaches SwiftPM.
  pub fn dispatch(&self, action: &Action) -> Result<(), DispatchError> {
    let primary = action.primary_step();
    self.options().map_err(|source| DispatchError {
      step: primary,
      subject: self.subject(primary),
      source,
    })?;

    for step in self.steps(action) {
      let subject = self.subject(step);
      info!("{} {}", step.progress(), subject);
      self
        .run_step(step, action)
        .map_err(|source| DispatchError { step, subject, source })?;
    }
    Ok(())
  }

  fn subject(&self, step: Step) -> String {
    match step {
      Step::Update => self.request.package_name(),
      Step::Build | Step::Test | Step::Install => self.request.product().to_string(),
    }
  }

  fn run_step(&self, step: Step, action: &Action) -> Result<(), StepError> {
    match step {
      Step::Update => self.runner.run(&self.update_invocation(action)).map_err(StepError::from),
      Step::Build => self.runner.run(&self.build_invocation(action)?).map_err(StepError::from),
      Step::Test => self.runner.run(&self.test_invocation(action)?).map_err(StepError::from),
      Step::Install => self.install(action),
    }
  }

  /// The effective build target, queried from the toolchain on first use.
  pub fn target(&self) -> Result<&TargetTriple, StepError> {
    if let Some(target) = self.target.get() {
      return Ok(target);
    }
    let target = resolve_target(
      &self.runner,
      &self.request.swift_exec(),
      self.request.cross_compile_config(),
    )?;
    Ok(self.target.get_or_init(|| target))
  }

  /// SwiftPM options for this request, assembled on first use.
  pub fn options(&self) -> Result<&[String], StepError> {
    if let Some(options) = self.options.get() {
      return Ok(options);
    }
    let options = swiftpm_options(&self.request, self.target()?)?;
    Ok(self.options.get_or_init(|| options))
  }

  fn environment(&self, action: &Action) -> Environment {
    env::swiftpm_environment(&self.base_env, action)
  }

  fn update_invocation(&self, action: &Action) -> Invocation {
    Invocation::new(self.request.swift_exec())
      .args([
        "package".to_string(),
        "--package-path".to_string(),
        self.request.package_path().to_string_lossy().into_owned(),
        "--scratch-path".to_string(),
        self.request.build_path().to_string_lossy().into_owned(),
        "update".to_string(),
      ])
      .env(self.environment(action))
  }

  /// `swift build <options> --product <product>`.
  pub fn build_invocation(&self, action: &Action) -> Result<Invocation, StepError> {
    Ok(
      Invocation::new(self.request.swift_exec())
        .arg("build")
        .args(self.options()?.iter().cloned())
        .args(["--product", self.request.product()])
        .env(self.environment(action)),
    )
  }

  /// `swift test <options> --test-product <pkg>PackageTests --disable-testable-imports`.
  pub fn test_invocation(&self, action: &Action) -> Result<Invocation, StepError> {
    Ok(
      Invocation::new(self.request.swift_exec())
        .arg("test")
        .args(self.options()?.iter().cloned())
        .args(["--test-product".to_string(), self.request.test_product()])
        .arg("--disable-testable-imports")
        .env(self.environment(action)),
    )
  }

  fn install(&self, action: &Action) -> Result<(), StepError> {
    let prefixes: &[PathBuf] = match action {
      Action::Install { prefixes } => prefixes,
      Action::Build | Action::Test => &[],
    };

    let query = bin_path_invocation(&self.request.swift_exec(), self.options()?, self.environment(action));
    let bin_path = query_bin_path(&self.runner, &query)?;

    InstallPlan::new(&bin_path, self.request.product(), prefixes).execute(&self.runner)?;
    Ok(())
  }
}
