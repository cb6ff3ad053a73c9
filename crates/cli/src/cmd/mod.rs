mod build;
mod generate;
mod languages;

use std::future::Future;

use anyhow::{Context, Result};
use serde::Serialize;

use qcmake_lib::{BuildConfig, BuildError, ConfigOverrides, ErrorKind};

use crate::ProjectArgs;
use crate::output::{OutputFormat, print_json};

pub use build::{cmd_build, cmd_clean};
pub use generate::cmd_generate;
pub use languages::cmd_languages;

/// Resolve flags, environment and defaults into a project configuration.
///
/// The current directory is the fallback project directory.
fn resolve_config(args: &ProjectArgs) -> Result<BuildConfig> {
  let overrides = ConfigOverrides {
    project_dir: args.dir.clone(),
    transcompiler: args.transcompiler.clone(),
    build_executor: args.make.clone(),
    language: args.language.clone(),
    timeout: args.timeout,
    include: args.include.clone(),
    default_project_dir: std::env::current_dir().ok(),
  };
  overrides.resolve().context("Invalid configuration")
}

/// Drive a library future to completion on a single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output> {
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  Ok(rt.block_on(future))
}

#[derive(Serialize)]
struct ErrorReport<'a> {
  error: String,
  kind: ErrorKind,
  exit_code: Option<i32>,
  stdout: Option<&'a str>,
  stderr: Option<&'a str>,
}

/// Surface a build error: captured tool output goes out verbatim before the
/// error itself is returned for the final message.
fn report_failure(format: OutputFormat, err: BuildError, context: &'static str) -> anyhow::Error {
  let kind = err.kind();
  if format.is_json() {
    let report = ErrorReport {
      error: err.to_string(),
      kind,
      exit_code: err.exit_code(),
      stdout: err.stdout(),
      stderr: err.stderr(),
    };
    if let Err(json_err) = print_json(&report) {
      return json_err;
    }
  } else {
    if let Some(stdout) = err.stdout().filter(|s| !s.is_empty()) {
      print!("{stdout}");
    }
    if let Some(stderr) = err.stderr().filter(|s| !s.is_empty()) {
      eprint!("{stderr}");
    }
  }
  anyhow::Error::new(err).context(format!("{context} ({kind} error)"))
}
