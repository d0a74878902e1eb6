//! Shared utilities.
//!
//! Test helpers live here so every module can drive the orchestration code
//! against a fake toolchain.

#[cfg(test)]
pub mod testutil;
