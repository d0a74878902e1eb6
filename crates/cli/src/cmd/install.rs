//! Implementation of the `install` command.
//!
//! Always builds first, then copies the product into `<prefix>/bin` for each
//! prefix in the order given.

use std::path::PathBuf;

use anyhow::Result;

use swiftpm_helper_lib::{Action, RequestOptions};

/// Execute the install command.
///
/// # Errors
///
/// Returns an error if the build, the bin path query or any copy fails. A
/// failed copy stops the remaining ones.
pub fn cmd_install(options: &RequestOptions, update: bool, prefixes: Vec<PathBuf>) -> Result<()> {
  super::run_action(options, update, Action::Install { prefixes })
}
