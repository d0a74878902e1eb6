//! Tests for the `install` action.

use predicates::prelude::*;

use super::common::{LINUX_TARGET_INFO, TestEnv};

#[test]
fn install_builds_then_copies_into_each_prefix() {
  let env = TestEnv::new(LINUX_TARGET_INFO);
  let usr = env.prefix("usr");
  let opt = env.prefix("opt");

  env
    .helper_cmd("install")
    .arg("--prefix")
    .arg(&usr)
    .arg(&opt)
    .assert()
    .success();

  let log = env.swift_log();
  assert_eq!(log.len(), 3);
  assert!(log[1].starts_with("build --package-path "));
  assert!(log[1].ends_with("--product swift-format | local_deps=1 install=1"));
  assert!(log[2].starts_with("build --show-bin-path --package-path "));
  assert!(log[2].ends_with("--disable-local-rpath | local_deps=1 install=1"));

  let source = env.bin_path().join("swift-format");
  assert_eq!(
    env.rsync_log(),
    vec![
      format!("-a {} {}", source.display(), usr.join("bin").display()),
      format!("-a {} {}", source.display(), opt.join("bin").display()),
    ]
  );
  assert!(usr.join("bin/swift-format").is_file());
  assert!(opt.join("bin/swift-format").is_file());
}

#[test]
fn repeated_prefix_flags_accumulate() {
  let env = TestEnv::new(LINUX_TARGET_INFO);
  let a = env.prefix("a");

  env
    .helper_cmd("install")
    .arg("--prefix")
    .arg(&a)
    .arg("--prefix")
    .arg(&a)
    .assert()
    .success();

  assert_eq!(env.rsync_log().len(), 2);
}

#[test]
fn failed_build_copies_nothing() {
  let env = TestEnv::new(LINUX_TARGET_INFO).failing_on("--product");
  let usr = env.prefix("usr");

  env
    .helper_cmd("install")
    .arg("--prefix")
    .arg(&usr)
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("FAIL: Building swift-format failed"));

  assert!(env.rsync_log().is_empty());
  assert!(!usr.exists());
}
