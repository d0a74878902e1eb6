//! Names shared with the external toolchain and install layout.

/// Product built by `build` and copied by `install`.
pub const PRODUCT_NAME: &str = "swift-format";

/// Suffix SwiftPM appends to a package name to form its test product.
pub const TEST_PRODUCT_SUFFIX: &str = "PackageTests";

/// Default scratch directory name inside the package.
pub const DEFAULT_SCRATCH_DIR: &str = ".build";

/// Makes SwiftPM prefer sibling checkouts over remote dependencies.
pub const LOCAL_DEPS_ENV: &str = "SWIFTCI_USE_LOCAL_DEPS";

/// Tells build-aware dependencies the build is destined for installation.
pub const INSTALL_BUILD_ENV: &str = "SWIFTFORMAT_CI_INSTALL";

/// Archive-copy utility used to place the built product in each prefix.
pub const SYNC_PROGRAM: &str = "rsync";

/// OS segment prefix of the family that gets universal binaries instead of rpaths.
pub const DARWIN_OS_PREFIX: &str = "macosx";

/// Host identifier prefix accepted by `--cross-compile-host`.
pub const DARWIN_HOST_PREFIX: &str = "macosx-";

/// Architectures combined into a universal binary.
pub const UNIVERSAL_ARCHS: [&str; 2] = ["x86_64", "arm64"];
