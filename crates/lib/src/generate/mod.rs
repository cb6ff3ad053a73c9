//! Build-file generation.
//!
//! [`RuleGenerator`] lists a project directory (non-recursively), keeps the
//! files with a recognized QC extension and turns each one into a single
//! make rule. The result is an in-memory [`BuildFileDocument`]; writing it to
//! disk is the caller's job.

mod types;

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::platform;
use crate::registry::{Registry, RegistryError, SourceExtension, TargetLanguage};

pub use types::{BuildFileDocument, BuildTarget, SourceFile};

/// Errors that can occur while generating a build file.
#[derive(Debug, Error)]
pub enum GenerateError {
  #[error("no target language selected")]
  NoLanguageSelected,

  #[error("cannot list directory {}: {source}", path.display())]
  DirectoryUnavailable { path: PathBuf, source: std::io::Error },

  /// Two sources would produce the same output file.
  #[error("{first} and {second} both generate {output}")]
  DuplicateTarget {
    output: String,
    first: String,
    second: String,
  },

  /// A recognized source whose name make would misread.
  #[error("source file name '{name}' cannot be used in a make rule")]
  UnsafeFileName { name: String },

  #[error("source file name {} is not valid UTF-8", path.display())]
  NonUnicodeFileName { path: PathBuf },

  #[error(transparent)]
  Registry(#[from] RegistryError),
}

/// Characters make treats specially in a rule line.
const MAKE_SPECIAL_CHARS: &[char] = &['#', '$', ':', ';', '=', '%', '\\', '*', '?', '[', ']'];

/// Whether `name` survives verbatim as a make target or prerequisite.
fn is_make_safe(name: &str) -> bool {
  !name.contains(char::is_whitespace) && !name.contains(MAKE_SPECIAL_CHARS)
}

/// Produces [`BuildFileDocument`]s from directory snapshots.
#[derive(Debug, Clone)]
pub struct RuleGenerator<'a> {
  registry: &'a Registry,
  delete_command: String,
  include: Option<PathBuf>,
}

impl<'a> RuleGenerator<'a> {
  /// Create a generator whose `clean` rule uses the host's delete command.
  pub fn new(registry: &'a Registry) -> Self {
    Self {
      registry,
      delete_command: platform::delete_command().to_string(),
      include: None,
    }
  }

  pub fn with_delete_command(mut self, command: impl Into<String>) -> Self {
    self.delete_command = command.into();
    self
  }

  /// Pull an extra makefile into every generated document.
  pub fn with_include(mut self, include: Option<PathBuf>) -> Self {
    self.include = include;
    self
  }

  /// List the recognized QC sources directly inside `directory`.
  ///
  /// Entries are sorted by file name so repeated scans of an unchanged
  /// directory produce identical documents. A recognized source whose name
  /// is not UTF-8 or not usable in a make rule fails the scan.
  pub fn scan(&self, directory: &Path) -> Result<Vec<SourceFile>, GenerateError> {
    let unavailable = |source| GenerateError::DirectoryUnavailable {
      path: directory.to_path_buf(),
      source,
    };
    let recognized = self.registry.recognized_extensions();
    let is_source = |name: &str| {
      SourceExtension::split_file_name(name).is_some_and(|(_, ext)| recognized.contains(&ext))
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(directory).map_err(unavailable)? {
      let entry = entry.map_err(unavailable)?;
      if !entry.path().is_file() {
        continue;
      }
      match entry.file_name().into_string() {
        Ok(name) => names.push(name),
        Err(name) => check_non_unicode(directory, name, &is_source)?,
      }
    }
    names.sort();

    let mut sources = Vec::new();
    for file_name in names {
      let Some((base, extension)) = SourceExtension::split_file_name(&file_name) else {
        continue;
      };
      if !recognized.contains(&extension) {
        continue;
      }
      if !is_make_safe(&file_name) {
        return Err(GenerateError::UnsafeFileName { name: file_name });
      }
      let base_name = base.to_string();
      sources.push(SourceFile {
        file_name,
        base_name,
        extension,
      });
    }

    Ok(sources)
  }

  /// Generate the build file for `directory`.
  ///
  /// Fails with [`GenerateError::NoLanguageSelected`] before touching the
  /// filesystem when `language` is `None`.
  pub fn generate(
    &self,
    directory: &Path,
    transcompiler: &Path,
    language: Option<&TargetLanguage>,
  ) -> Result<BuildFileDocument, GenerateError> {
    let language = language.ok_or(GenerateError::NoLanguageSelected)?;
    let sources = self.scan(directory)?;

    let mut seen: HashMap<String, String> = HashMap::new();
    let mut targets = Vec::with_capacity(sources.len());
    for source in sources {
      let output_ext = self.registry.output_extension(source.extension, language)?;
      let output = format!("{}{}", source.base_name, output_ext);

      if let Some(first) = seen.get(&output) {
        return Err(GenerateError::DuplicateTarget {
          output,
          first: first.clone(),
          second: source.file_name,
        });
      }

      debug!(source = %source.file_name, output = %output, "rule");
      seen.insert(output.clone(), source.file_name.clone());
      targets.push(BuildTarget { source, output });
    }

    info!(
      directory = %directory.display(),
      language = %language,
      targets = targets.len(),
      "generated build file"
    );

    Ok(BuildFileDocument {
      transcompiler: transcompiler.to_path_buf(),
      language_flag: self.registry.language_flag(language).to_string(),
      include: self.include.clone(),
      targets,
      delete_command: self.delete_command.clone(),
    })
  }
}

/// Unrecognized files may have any name; a source must be readable as text.
fn check_non_unicode(
  directory: &Path,
  name: OsString,
  is_source: impl Fn(&str) -> bool,
) -> Result<(), GenerateError> {
  if is_source(&name.to_string_lossy()) {
    return Err(GenerateError::NonUnicodeFileName {
      path: directory.join(name),
    });
  }
  debug!(name = ?name, "skipping non UTF-8 file name");
  Ok(())
}
