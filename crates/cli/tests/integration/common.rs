//! Shared test helpers for CLI integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const LINUX_TARGET_INFO: &str = r#"{
  "target": {
    "triple": "x86_64-unknown-linux-gnu",
    "unversionedTriple": "x86_64-unknown-linux-gnu"
  }
}"#;

pub const MACOS_TARGET_INFO: &str = r#"{
  "target": {
    "triple": "arm64-apple-macosx13.0",
    "unversionedTriple": "arm64-apple-macosx"
  }
}"#;

/// Stand-in for `<toolchain>/bin/swift`.
///
/// Logs its arguments and the relevant environment, answers the target-info
/// and bin-path queries, and "builds" by writing a product file.
const FAKE_SWIFT: &str = r#"#!/bin/sh
echo "$* | local_deps=${SWIFTCI_USE_LOCAL_DEPS:-} install=${SWIFTFORMAT_CI_INSTALL:-}" >> "$FAKE_SWIFT_LOG"
if [ "$1" = "-print-target-info" ]; then
  cat "$FAKE_TARGET_INFO"
  exit 0
fi
if [ "$1" = "build" ] && [ "$2" = "--show-bin-path" ]; then
  echo "warning: noise on stderr" >&2
  echo "$FAKE_BIN_PATH"
  exit 0
fi
case " $* " in
  *" $FAKE_SWIFT_FAIL "*)
    echo "error: simulated failure" >&2
    exit 1
    ;;
esac
if [ "$1" = "build" ]; then
  mkdir -p "$FAKE_BIN_PATH"
  echo "binary" > "$FAKE_BIN_PATH/swift-format"
fi
exit 0
"#;

/// Stand-in for `rsync -a <src> <dest>`.
const FAKE_RSYNC: &str = r#"#!/bin/sh
echo "$*" >> "$FAKE_RSYNC_LOG"
cp "$2" "$3/"
"#;

/// Isolated toolchain, package and install area for one test.
pub struct TestEnv {
  pub temp: TempDir,
  target_info: PathBuf,
  fail_on: Option<String>,
}

impl TestEnv {
  pub fn new(target_info: &str) -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("swift-format")).unwrap();
    write_script(&temp.path().join("toolchain/bin/swift"), FAKE_SWIFT);
    write_script(&temp.path().join("fakebin/rsync"), FAKE_RSYNC);

    let target_info_path = temp.path().join("target-info.json");
    std::fs::write(&target_info_path, target_info).unwrap();

    Self {
      temp,
      target_info: target_info_path,
      fail_on: None,
    }
  }

  /// Make the fake swift fail whenever `arg` is among its arguments.
  pub fn failing_on(mut self, arg: &str) -> Self {
    self.fail_on = Some(arg.to_string());
    self
  }

  pub fn toolchain(&self) -> PathBuf {
    self.temp.path().join("toolchain")
  }

  /// Canonical package path, as the helper reports it.
  pub fn package(&self) -> PathBuf {
    std::fs::canonicalize(self.temp.path().join("swift-format")).unwrap()
  }

  pub fn bin_path(&self) -> PathBuf {
    self.temp.path().join("scratch-bin")
  }

  pub fn prefix(&self, name: &str) -> PathBuf {
    self.temp.path().join("prefixes").join(name)
  }

  /// Lines logged by the fake swift, in call order.
  pub fn swift_log(&self) -> Vec<String> {
    read_lines(&self.temp.path().join("swift.log"))
  }

  /// Lines logged by the fake rsync, in call order.
  pub fn rsync_log(&self) -> Vec<String> {
    read_lines(&self.temp.path().join("rsync.log"))
  }

  /// A helper command running `action` against the fake toolchain.
  pub fn helper_cmd(&self, action: &str) -> Command {
    let path = format!(
      "{}:{}",
      self.temp.path().join("fakebin").display(),
      std::env::var("PATH").unwrap_or_default()
    );

    let mut cmd: Command = cargo_bin_cmd!("build-script-helper");
    cmd
      .arg(action)
      .arg("--package-path")
      .arg(self.temp.path().join("swift-format"))
      .arg("--toolchain")
      .arg(self.toolchain())
      .env("PATH", path)
      .env("FAKE_SWIFT_LOG", self.temp.path().join("swift.log"))
      .env("FAKE_RSYNC_LOG", self.temp.path().join("rsync.log"))
      .env("FAKE_TARGET_INFO", &self.target_info)
      .env("FAKE_BIN_PATH", self.bin_path())
      .env("FAKE_SWIFT_FAIL", self.fail_on.as_deref().unwrap_or("__never__"))
      .env_remove("SWIFTCI_USE_LOCAL_DEPS")
      .env_remove("SWIFTFORMAT_CI_INSTALL");
    cmd
  }
}

fn write_script(path: &Path, content: &str) {
  std::fs::create_dir_all(path.parent().unwrap()).unwrap();
  std::fs::write(path, content).unwrap();
  std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

fn read_lines(path: &Path) -> Vec<String> {
  std::fs::read_to_string(path)
    .map(|s| s.lines().map(String::from).collect())
    .unwrap_or_default()
}
