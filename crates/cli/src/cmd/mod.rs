mod build;
mod install;

pub use build::cmd_build;
pub use install::cmd_install;
pub use test::cmd_test;

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use swiftpm_helper_lib::env;
use swiftpm_helper_lib::{Action, BuildRequest, Dispatcher, RequestOptions, SystemRunner};

use crate::output::{format_duration, print_success};

/// Resolve the request, then run `action` against the real toolchain.
///
/// Dispatch failures are returned unwrapped so the caller can report the
/// failing step and command line.
fn run_action(options: &RequestOptions, update: bool, action: Action) -> Result<()> {
  let start = Instant::now();
  let request = BuildRequest::resolve(options.clone()).context("Invalid arguments")?;
  debug!(
    package = %request.package_path().display(),
    build_path = %request.build_path().display(),
    configuration = %request.configuration(),
    "resolved request"
  );

  let runner = SystemRunner::new(request.verbose());
  let product = request.product();

  let dispatcher = Dispatcher::new(request, runner, env::capture()).with_update(update);
  dispatcher.dispatch(&action)?;

  print_success(&format!(
    "{} of {} finished in {}",
    action,
    product,
    format_duration(start.elapsed())
  ));
  Ok(())
}
