mod cmd;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

/// qcmake - Generate and run make builds for QC projects
#[derive(Parser)]
#[command(name = "qcmake")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose (debug) logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

/// Settings shared by every command that works on a project.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
  /// Project directory holding the QC sources [env: QCMAKE_PROJECT_DIR] [default: .]
  #[arg(short, long)]
  dir: Option<PathBuf>,

  /// Transcompiler executable [env: QCMAKE_TRANSCOMPILER] [default: qc]
  #[arg(long)]
  transcompiler: Option<PathBuf>,

  /// Build executor (a make-compatible tool) [env: QCMAKE_MAKE] [default: make]
  #[arg(long)]
  make: Option<PathBuf>,

  /// Target language, by name or flag (e.g. "C++17", "CS") [env: QCMAKE_LANGUAGE]
  #[arg(short, long)]
  language: Option<String>,

  /// Kill the build executor after this long (e.g. "90s", "5m") [env: QCMAKE_TIMEOUT]
  #[arg(long, value_parser = humantime::parse_duration)]
  timeout: Option<Duration>,

  /// Extra makefile to include in the generated Makefile
  #[arg(long)]
  include: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate the Makefile for the project directory
  Generate {
    #[command(flatten)]
    project: ProjectArgs,

    /// Print the generated rules instead of writing the Makefile
    #[arg(long)]
    print: bool,
  },

  /// Generate the Makefile and build every target
  Build {
    #[command(flatten)]
    project: ProjectArgs,

    /// Use the existing Makefile as-is
    #[arg(long)]
    no_generate: bool,
  },

  /// Generate the Makefile and delete every generated output
  Clean {
    #[command(flatten)]
    project: ProjectArgs,

    /// Use the existing Makefile as-is
    #[arg(long)]
    no_generate: bool,
  },

  /// List the supported target languages
  Languages,
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(err) = run(cli) {
    print_error(&format!("{err:#}"));
    std::process::exit(1);
  }
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Commands::Generate { project, print } => cmd::cmd_generate(&project, print, cli.format),
    Commands::Build { project, no_generate } => cmd::cmd_build(&project, no_generate, cli.format),
    Commands::Clean { project, no_generate } => cmd::cmd_clean(&project, no_generate, cli.format),
    Commands::Languages => cmd::cmd_languages(cli.format),
  }
}
