//! Types produced by rule generation.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::consts::{ALL_TARGET, BEGIN_VALUES_VAR, CLEAN_TARGET, ENDING_FLAGS_VAR};
use crate::registry::SourceExtension;

/// A recognized QC source found in the project directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFile {
  /// File name as listed in the directory, e.g. `foo.qc`.
  pub file_name: String,
  /// File name with the recognized extension stripped, e.g. `foo`.
  pub base_name: String,
  pub extension: SourceExtension,
}

/// One source and the single output the transcompiler produces from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildTarget {
  pub source: SourceFile,
  /// Output file name, e.g. `foo.cpp`.
  pub output: String,
}

/// A complete generated build file, ready to render.
///
/// Rendering goes through [`fmt::Display`]; the rendered text is exactly what
/// gets written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildFileDocument {
  /// Transcompiler executable, quoted in the `BEGIN_VALUES` binding.
  pub transcompiler: PathBuf,
  /// Value passed to the transcompiler's `--language` option.
  pub language_flag: String,
  /// Extra makefile pulled in with an `include` line.
  pub include: Option<PathBuf>,
  /// Per-source rules, in generation order.
  pub targets: Vec<BuildTarget>,
  /// Command prefix the `clean` recipe uses to delete outputs.
  pub delete_command: String,
}

impl BuildFileDocument {
  /// Output names in rule order. This is also the `all` prerequisite list.
  pub fn outputs(&self) -> impl Iterator<Item = &str> {
    self.targets.iter().map(|t| t.output.as_str())
  }

  pub fn len(&self) -> usize {
    self.targets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.targets.is_empty()
  }
}

impl fmt::Display for BuildFileDocument {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{BEGIN_VALUES_VAR} = \"{}\" --file", self.transcompiler.display())?;
    writeln!(f, "{ENDING_FLAGS_VAR} = --language {}", self.language_flag)?;
    if let Some(include) = &self.include {
      writeln!(f, "include {}", include.display())?;
    }
    writeln!(f)?;

    // Recipe lines must start with a tab or make rejects them.
    for target in &self.targets {
      writeln!(f, "{}: {}", target.output, target.source.file_name)?;
      writeln!(f, "\t$({BEGIN_VALUES_VAR}) $< $({ENDING_FLAGS_VAR})")?;
      writeln!(f)?;
    }

    writeln!(f, ".PHONY: {ALL_TARGET} {CLEAN_TARGET}")?;
    write!(f, "{ALL_TARGET}:")?;
    for output in self.outputs() {
      write!(f, " {output}")?;
    }
    writeln!(f)?;
    writeln!(f, "\techo \"All done.\"")?;
    writeln!(f)?;

    writeln!(f, "{CLEAN_TARGET}:")?;
    // `del` with no arguments fails, so an empty project gets no recipe.
    if self.is_empty() {
      return Ok(());
    }
    write!(f, "\t{}", self.delete_command)?;
    for output in self.outputs() {
      write!(f, " {output}")?;
    }
    writeln!(f)
  }
}
