//! End-to-end tests against a fake toolchain.

#[cfg(unix)]
mod common;
#[cfg(unix)]
mod install_tests;
