//! Implementation of the `qcmake generate` command.

use anyhow::Result;

use qcmake_lib::{BuildOrchestrator, GeneratedFile, Registry};

use super::{report_failure, resolve_config};
use crate::ProjectArgs;
use crate::output::{OutputFormat, print_json, print_rule, print_success};

/// Execute the generate command.
///
/// Writes `<project>/Makefile`, or with `print` renders it to stdout and
/// leaves the project untouched.
pub fn cmd_generate(args: &ProjectArgs, print: bool, format: OutputFormat) -> Result<()> {
  let config = resolve_config(args)?;
  let registry = Registry::default();
  let orchestrator = BuildOrchestrator::new(&registry, config);

  if print {
    let document = orchestrator
      .render()
      .map_err(|e| report_failure(format, e, "Generation failed"))?;
    if format.is_json() {
      print_json(&document)?;
    } else {
      print!("{document}");
    }
    return Ok(());
  }

  let generated = orchestrator
    .generate_build_file()
    .map_err(|e| report_failure(format, e, "Generation failed"))?;

  if format.is_json() {
    print_json(&generated)?;
  } else {
    print_generated(&generated);
  }
  Ok(())
}

pub(super) fn print_generated(generated: &GeneratedFile) {
  print_success(&format!(
    "Wrote {} ({} target{})",
    generated.path.display(),
    generated.document.len(),
    if generated.document.len() == 1 { "" } else { "s" }
  ));
  for target in &generated.document.targets {
    print_rule(&target.source.file_name, &target.output);
  }
}
