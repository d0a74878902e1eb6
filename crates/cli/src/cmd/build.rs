//! Implementation of the `build` command.

use anyhow::Result;

use swiftpm_helper_lib::{Action, RequestOptions};

/// Build the swift-format product.
pub fn cmd_build(options: &RequestOptions, update: bool) -> Result<()> {
  super::run_action(options, update, Action::Build)
}
