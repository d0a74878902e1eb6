//! The validated, immutable description of one helper run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::consts::{DEFAULT_SCRATCH_DIR, PRODUCT_NAME, TEST_PRODUCT_SUFFIX};

/// Errors detected while turning raw inputs into a [`BuildRequest`].
#[derive(Debug, Error)]
pub enum RequestError {
  #[error("unknown configuration '{0}' (expected 'debug' or 'release')")]
  UnknownConfiguration(String),

  #[error("package path {path} cannot be resolved: {source}")]
  PackagePath {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("package path {0} has no final component")]
  PackageName(PathBuf),

  #[error("build path {path} cannot be made absolute: {source}")]
  BuildPath {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// SwiftPM build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Configuration {
  #[default]
  Debug,
  Release,
}

impl Configuration {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Debug => "debug",
      Self::Release => "release",
    }
  }
}

impl fmt::Display for Configuration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Configuration {
  type Err = RequestError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "debug" => Ok(Self::Debug),
      "release" => Ok(Self::Release),
      other => Err(RequestError::UnknownConfiguration(other.to_string())),
    }
  }
}

/// Raw inputs as they arrive from the command line.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
  pub package_path: PathBuf,
  pub build_path: Option<PathBuf>,
  pub configuration: Configuration,
  pub multiroot_data_file: Option<PathBuf>,
  pub toolchain: PathBuf,
  pub cross_compile_host: Option<String>,
  pub cross_compile_config: Option<PathBuf>,
  pub verbose: bool,
}

/// Everything needed to plan SwiftPM invocations for one run.
///
/// The package and build paths are always absolute. Fields are only
/// readable; a request is never changed once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
  package_path: PathBuf,
  build_path: PathBuf,
  configuration: Configuration,
  multiroot_data_file: Option<PathBuf>,
  toolchain: PathBuf,
  cross_compile_host: Option<String>,
  cross_compile_config: Option<PathBuf>,
  verbose: bool,
}

impl BuildRequest {
  /// Resolve raw options against the current directory.
  ///
  /// The package path must exist; it is canonicalised. The build path
  /// defaults to `<package>/.build`.
  pub fn resolve(options: RequestOptions) -> Result<Self, RequestError> {
    let package_path = dunce::canonicalize(&options.package_path).map_err(|source| RequestError::PackagePath {
      path: options.package_path.clone(),
      source,
    })?;

    if package_path.file_name().is_none() {
      return Err(RequestError::PackageName(package_path));
    }

    let build_path = match options.build_path {
      Some(path) => std::path::absolute(&path).map_err(|source| RequestError::BuildPath { path, source })?,
      None => package_path.join(DEFAULT_SCRATCH_DIR),
    };

    Ok(Self {
      package_path,
      build_path,
      configuration: options.configuration,
      multiroot_data_file: options.multiroot_data_file,
      toolchain: options.toolchain,
      cross_compile_host: options.cross_compile_host,
      cross_compile_config: options.cross_compile_config,
      verbose: options.verbose,
    })
  }

  pub fn package_path(&self) -> &Path {
    &self.package_path
  }

  pub fn build_path(&self) -> &Path {
    &self.build_path
  }

  pub fn configuration(&self) -> Configuration {
    self.configuration
  }

  pub fn multiroot_data_file(&self) -> Option<&Path> {
    self.multiroot_data_file.as_deref()
  }

  pub fn cross_compile_host(&self) -> Option<&str> {
    self.cross_compile_host.as_deref()
  }

  pub fn cross_compile_config(&self) -> Option<&Path> {
    self.cross_compile_config.as_deref()
  }

  pub fn verbose(&self) -> bool {
    self.verbose
  }

  /// The `swift` driver inside the toolchain.
  pub fn swift_exec(&self) -> PathBuf {
    self.toolchain.join("bin").join("swift")
  }

  /// Last component of the package path.
  pub fn package_name(&self) -> String {
    self
      .package_path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default()
  }

  /// Product built by `build` and `install`.
  pub fn product(&self) -> &'static str {
    PRODUCT_NAME
  }

  /// Test product SwiftPM synthesises for this package.
  pub fn test_product(&self) -> String {
    format!("{}{}", self.package_name(), TEST_PRODUCT_SUFFIX)
  }
}

#[cfg(test)]
impl BuildRequest {
  /// Construct a request from already-absolute paths without touching the
  /// filesystem.
  pub(crate) fn for_tests(package_path: &str, toolchain: &str, configuration: Configuration) -> Self {
    let package_path = PathBuf::from(package_path);
    Self {
      build_path: package_path.join(DEFAULT_SCRATCH_DIR),
      package_path,
      configuration,
      multiroot_data_file: None,
      toolchain: PathBuf::from(toolchain),
      cross_compile_host: None,
      cross_compile_config: None,
      verbose: false,
    }
  }

  pub(crate) fn with_cross_compile_host(mut self, host: &str) -> Self {
    self.cross_compile_host = Some(host.to_string());
    self
  }

  pub(crate) fn with_cross_compile_config(mut self, path: &Path) -> Self {
    self.cross_compile_config = Some(path.to_path_buf());
    self
  }

  pub(crate) fn with_multiroot_data_file(mut self, path: &str) -> Self {
    self.multiroot_data_file = Some(PathBuf::from(path));
    self
  }

  pub(crate) fn with_verbose(mut self) -> Self {
    self.verbose = true;
    self
  }
}
