use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use swiftpm_helper_lib::{Configuration, DispatchError, RequestOptions};

mod cmd;
mod output;

/// Build, test and install swift-format through SwiftPM
#[derive(Parser)]
#[command(name = "build-script-helper")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build swift-format
  Build(SharedArgs),

  /// Build and run the package tests
  Test(SharedArgs),

  /// Build swift-format and copy it into one or more prefixes
  Install(InstallArgs),
}

#[derive(Args, Debug)]
struct SharedArgs {
  /// Path to the package to build
  #[arg(long, default_value = ".")]
  package_path: PathBuf,

  /// Log executed commands and pass --verbose to SwiftPM
  #[arg(short, long)]
  verbose: bool,

  /// Build configuration (debug or release)
  #[arg(long, default_value = "debug")]
  configuration: Configuration,

  /// Scratch directory for build artifacts (default: <package-path>/.build)
  #[arg(long)]
  build_path: Option<PathBuf>,

  /// Xcode workspace data for a unified build with other projects
  #[arg(long)]
  multiroot_data_file: Option<PathBuf>,

  /// Toolchain containing bin/swift
  #[arg(long, required = true)]
  toolchain: PathBuf,

  /// Host to cross-compile for (only macosx-* on macOS, as a universal binary)
  #[arg(long)]
  cross_compile_host: Option<String>,

  /// JSON file whose "target" field overrides the build target
  #[arg(long)]
  cross_compile_config: Option<PathBuf>,

  /// Update SwiftPM dependencies before running the action
  #[arg(long)]
  update: bool,
}

impl SharedArgs {
  fn request_options(&self) -> RequestOptions {
    RequestOptions {
      package_path: self.package_path.clone(),
      build_path: self.build_path.clone(),
      configuration: self.configuration,
      multiroot_data_file: self.multiroot_data_file.clone(),
      toolchain: self.toolchain.clone(),
      cross_compile_host: self.cross_compile_host.clone(),
      cross_compile_config: self.cross_compile_config.clone(),
      verbose: self.verbose,
    }
  }
}

#[derive(Args, Debug)]
struct InstallArgs {
  #[command(flatten)]
  shared: SharedArgs,

  /// Install prefixes; the binary is copied into <prefix>/bin
  #[arg(long = "prefix", value_name = "PREFIX", num_args = 1.., required = true)]
  prefixes: Vec<PathBuf>,
}

impl Commands {
  fn shared(&self) -> &SharedArgs {
    match self {
      Commands::Build(args) | Commands::Test(args) => args,
      Commands::Install(args) => &args.shared,
    }
  }
}

fn main() {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    // Help and version go to stdout and exit 0.
    Err(err) if !err.use_stderr() => err.exit(),
    Err(err) => {
      let _ = err.print();
      std::process::exit(1);
    }
  };

  init_tracing(cli.command.shared().verbose);

  if let Err(err) = run(cli.command) {
    report(&err);
    std::process::exit(1);
  }
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(command: Commands) -> Result<()> {
  match command {
    Commands::Build(args) => cmd::cmd_build(&args.request_options(), args.update),
    Commands::Test(args) => cmd::cmd_test(&args.request_options(), args.update),
    Commands::Install(args) => cmd::cmd_install(&args.shared.request_options(), args.shared.update, args.prefixes),
  }
}

fn report(err: &anyhow::Error) {
  match err.downcast_ref::<DispatchError>() {
    Some(failure) => {
      output::print_error(&format!("FAIL: {}", failure));
      match failure.command_line() {
        Some(cmd) => output::print_error(&format!("Executing: {}", cmd)),
        None => output::print_error(&failure.source.to_string()),
      }
      if let Some(status) = failure.process_status() {
        output::print_error(&status);
      }
    }
    None => output::print_error(&format!("{:#}", err)),
  }
}
