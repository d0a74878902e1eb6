//! swiftpm-helper-lib: orchestration logic for building swift-format with SwiftPM
//!
//! This crate turns a build intent into SwiftPM invocations:
//! - `target`: asks the toolchain which triple it builds for
//! - `options`: assembles platform-correct SwiftPM flags
//! - `env`: builds the environment overlay for each invocation
//! - `dispatch`: sequences the steps of `build`, `test` and `install`
//! - `install`: copies the built product into install prefixes
//!
//! All process spawning goes through [`process::ProcessRunner`].

pub mod consts;
pub mod dispatch;
pub mod env;
pub mod install;
pub mod options;
pub mod process;
pub mod request;
pub mod target;
pub mod util;

pub use dispatch::{Action, DispatchError, Dispatcher, Step};
pub use process::{Invocation, ProcessRunner, SystemRunner};
pub use request::{BuildRequest, Configuration, RequestError, RequestOptions};
