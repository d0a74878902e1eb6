//! Build target resolution.
//!
//! The toolchain is the only authority on what it will build for, so the
//! target triple comes from `swift -print-target-info`, optionally pinned by
//! a cross-compilation descriptor.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::DARWIN_OS_PREFIX;
use crate::process::{Invocation, ProcessError, ProcessRunner};

/// Errors that can occur while resolving the build target.
#[derive(Debug, Error)]
pub enum TargetError {
  #[error("cannot read cross-compile config {path}: {source}")]
  ReadConfig {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid cross-compile config {path}: {source}")]
  ParseConfig {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("target info query failed: {0}")]
  Query(#[from] ProcessError),

  #[error("malformed target info: {0}")]
  MalformedInfo(#[source] serde_json::Error),

  #[error("malformed target triple '{0}'")]
  MalformedTriple(String),
}

/// A target triple reported by the toolchain, e.g. `x86_64-unknown-linux-gnu`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetTriple(String);

impl TargetTriple {
  /// Parse a triple, requiring non-empty arch, vendor and OS segments.
  pub fn parse(triple: &str) -> Result<Self, TargetError> {
    let segments: Vec<&str> = triple.split('-').collect();
    if segments.len() < 3 || segments[..3].iter().any(|s| s.is_empty()) {
      return Err(TargetError::MalformedTriple(triple.to_string()));
    }
    Ok(Self(triple.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn arch(&self) -> &str {
    self.segment(0)
  }

  /// The OS segment: the third dash-delimited component.
  pub fn os(&self) -> &str {
    self.segment(2)
  }

  /// Whether the OS segment denotes macOS.
  pub fn is_darwin(&self) -> bool {
    is_darwin_os(self.os())
  }

  fn segment(&self, index: usize) -> &str {
    self.0.split('-').nth(index).unwrap_or_default()
  }
}

impl fmt::Display for TargetTriple {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Whether an OS segment belongs to the macOS family.
pub fn is_darwin_os(os: &str) -> bool {
  os.starts_with(DARWIN_OS_PREFIX)
}

/// Descriptor passed with `--cross-compile-config`.
#[derive(Debug, Clone, Deserialize)]
pub struct CrossCompileConfig {
  pub target: String,
}

impl CrossCompileConfig {
  pub fn load(path: &Path) -> Result<Self, TargetError> {
    let content = std::fs::read_to_string(path).map_err(|source| TargetError::ReadConfig {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| TargetError::ParseConfig {
      path: path.to_path_buf(),
      source,
    })
  }
}

#[derive(Debug, Deserialize)]
struct TargetInfo {
  target: TargetInfoTarget,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetInfoTarget {
  triple: String,
  unversioned_triple: String,
}

/// Pick the effective triple from `-print-target-info` JSON.
///
/// macOS toolchains report a versioned `triple` (`arm64-apple-macosx13.0`);
/// the unversioned form is used for them so OS-family checks keep working.
/// Every other target uses `triple`.
pub fn parse_target_info(json: &str) -> Result<TargetTriple, TargetError> {
  let info: TargetInfo = serde_json::from_str(json).map_err(TargetError::MalformedInfo)?;

  let unversioned = TargetTriple::parse(&info.target.unversioned_triple)?;
  if unversioned.is_darwin() {
    return Ok(unversioned);
  }
  TargetTriple::parse(&info.target.triple)
}

/// Build the target-info query for `swift_exec`.
pub fn target_info_invocation(swift_exec: &Path, cross_compile: Option<&CrossCompileConfig>) -> Invocation {
  let invocation = Invocation::new(swift_exec).arg("-print-target-info");
  match cross_compile {
    Some(config) => invocation.args(["-target", config.target.as_str()]),
    None => invocation,
  }
}

/// Ask the toolchain which triple it builds for.
///
/// Any failure is fatal: there is no fallback guess.
pub fn resolve_target(
  runner: &impl ProcessRunner,
  swift_exec: &Path,
  cross_compile_config: Option<&Path>,
) -> Result<TargetTriple, TargetError> {
  let cross_compile = cross_compile_config.map(CrossCompileConfig::load).transpose()?;
  let invocation = target_info_invocation(swift_exec, cross_compile.as_ref());

  let output = runner.capture(&invocation)?;
  let triple = parse_target_info(&output)?;

  debug!(triple = %triple, "resolved build target");
  Ok(triple)
}
