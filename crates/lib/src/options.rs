//! SwiftPM option assembly.
//!
//! Produces the flag list appended to every SwiftPM invocation for a
//! request. The result depends only on the request and the resolved target,
//! so building it twice yields identical output.

use thiserror::Error;
use tracing::debug;

use crate::consts::{DARWIN_HOST_PREFIX, UNIVERSAL_ARCHS};
use crate::request::BuildRequest;
use crate::target::TargetTriple;

/// Errors raised while assembling options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
  /// Only macOS to macOS "cross" builds are supported, as universal binaries.
  #[error("cannot cross-compile for {host} from {build_os}")]
  UnsupportedCrossCompile { host: String, build_os: String },
}

/// Runtime search path relative to the installed binary.
pub fn origin_rpath(os: &str) -> String {
  format!("$ORIGIN/../lib/swift/{}", os)
}

/// Whether a universal binary can be produced for `host` when building on `target`.
pub fn accepts_cross_compile_host(target: &TargetTriple, host: &str) -> bool {
  target.is_darwin() && host.starts_with(DARWIN_HOST_PREFIX)
}

/// Assemble the SwiftPM flags for `request` building for `target`.
///
/// Baseline flags come first, then the runtime-path flags for non-macOS
/// targets, then the architecture flags for a universal build.
pub fn swiftpm_options(request: &BuildRequest, target: &TargetTriple) -> Result<Vec<String>, OptionsError> {
  let mut args = vec![
    "--package-path".to_string(),
    request.package_path().to_string_lossy().into_owned(),
    "--configuration".to_string(),
    request.configuration().to_string(),
    "--scratch-path".to_string(),
    request.build_path().to_string_lossy().into_owned(),
  ];

  if let Some(file) = request.multiroot_data_file() {
    args.push("--multiroot-data-file".to_string());
    args.push(file.to_string_lossy().into_owned());
  }

  if request.verbose() {
    args.push("--verbose".to_string());
  }

  if !target.is_darwin() {
    // Swift runtime libraries are installed next to the binary.
    args.extend(
      ["-Xlinker", "-rpath", "-Xlinker"]
        .into_iter()
        .map(String::from)
        .chain([origin_rpath(target.os())]),
    );
    args.push("--disable-local-rpath".to_string());
  }

  if let Some(host) = request.cross_compile_host() {
    if !accepts_cross_compile_host(target, host) {
      return Err(OptionsError::UnsupportedCrossCompile {
        host: host.to_string(),
        build_os: target.os().to_string(),
      });
    }
    for arch in UNIVERSAL_ARCHS {
      args.push("--arch".to_string());
      args.push(arch.to_string());
    }
  }

  debug!(target = %target, options = ?args, "assembled swiftpm options");
  Ok(args)
}
