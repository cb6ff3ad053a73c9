//! Implementation of the `qcmake build` and `qcmake clean` commands.
//!
//! Both regenerate the Makefile first (unless told not to) and then hand the
//! named target to the build executor, blocking until it exits.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use qcmake_lib::{BuildOrchestrator, ExecutionResult, Registry};

use super::generate::print_generated;
use super::{block_on, report_failure, resolve_config};
use crate::ProjectArgs;
use crate::output::{OutputFormat, format_duration, print_info, print_json, print_stat, print_success};

#[derive(Clone, Copy)]
enum Target {
  All,
  Clean,
}

#[derive(Serialize)]
struct RunReport<'a> {
  target: &'static str,
  makefile: &'a Path,
  regenerated: bool,
  targets: Option<usize>,
  exit_code: Option<i32>,
  stdout: &'a str,
  stderr: &'a str,
  elapsed_ms: u128,
}

/// Execute the build command: regenerate the Makefile, then `<make> all`.
pub fn cmd_build(args: &ProjectArgs, no_generate: bool, format: OutputFormat) -> Result<()> {
  run(args, no_generate, format, Target::All)
}

/// Execute the clean command: regenerate the Makefile, then `<make> clean`.
pub fn cmd_clean(args: &ProjectArgs, no_generate: bool, format: OutputFormat) -> Result<()> {
  run(args, no_generate, format, Target::Clean)
}

fn run(args: &ProjectArgs, no_generate: bool, format: OutputFormat, target: Target) -> Result<()> {
  let config = resolve_config(args)?;
  let registry = Registry::default();
  let orchestrator = BuildOrchestrator::new(&registry, config);

  let generated = if no_generate {
    None
  } else {
    let generated = orchestrator
      .generate_build_file()
      .map_err(|e| report_failure(format, e, "Generation failed"))?;
    if !format.is_json() {
      print_generated(&generated);
    }
    Some(generated)
  };

  let (name, context) = match target {
    Target::All => ("all", "Build failed"),
    Target::Clean => ("clean", "Clean failed"),
  };
  info!(make_target = name, executor = %orchestrator.config().build_executor.display(), "running build executor");

  let started = Instant::now();
  let result = match target {
    Target::All => block_on(orchestrator.run_all())?,
    Target::Clean => block_on(orchestrator.run_clean())?,
  }
  .map_err(|e| report_failure(format, e, context))?;
  let elapsed = started.elapsed();

  if format.is_json() {
    let makefile = orchestrator.makefile_path();
    return print_json(&RunReport {
      target: name,
      makefile: &makefile,
      regenerated: generated.is_some(),
      targets: generated.as_ref().map(|g| g.document.len()),
      exit_code: result.exit_code,
      stdout: &result.stdout,
      stderr: &result.stderr,
      elapsed_ms: elapsed.as_millis(),
    });
  }

  print_output(&result);
  match target {
    Target::All => print_success("Build complete"),
    Target::Clean => print_success("Clean complete"),
  }
  print_stat("Elapsed", &format_duration(elapsed));
  Ok(())
}

fn print_output(result: &ExecutionResult) {
  if result.stdout.is_empty() && result.stderr.is_empty() {
    return;
  }
  print_info("Build executor output:");
  print!("{}", result.stdout);
  eprint!("{}", result.stderr);
}
