//! Environment overlay for SwiftPM invocations.

use std::collections::BTreeMap;
use std::ffi::OsString;

use tracing::debug;

use crate::consts::{INSTALL_BUILD_ENV, LOCAL_DEPS_ENV};
use crate::dispatch::Action;

/// Environment variables handed to a child process.
pub type Environment = BTreeMap<OsString, OsString>;

/// Snapshot of the current process environment.
///
/// Taken once per run; everything downstream works on copies of it.
pub fn capture() -> Environment {
  std::env::vars_os().collect()
}

/// Build the environment for a SwiftPM invocation made on behalf of `action`.
///
/// Returns a fresh map: `base` plus the local-dependencies flag, plus the
/// install flag when `action` is [`Action::Install`].
pub fn swiftpm_environment(base: &Environment, action: &Action) -> Environment {
  let mut env = base.clone();
  env.insert(LOCAL_DEPS_ENV.into(), "1".into());
  if action.is_install() {
    env.insert(INSTALL_BUILD_ENV.into(), "1".into());
  }

  debug!(action = %action, install = action.is_install(), "built environment overlay");
  env
}
