//! Source extensions and the target languages they compile to.
//!
//! The registry is plain immutable data: it is built once (usually through
//! [`Registry::default`]) and handed to the generator by reference. Nothing in
//! here touches the filesystem.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors raised by registry lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
  /// The language has no output extension for a recognized source extension.
  #[error("language {language} has no output mapping for {extension}")]
  UnmappedExtension {
    extension: SourceExtension,
    language: String,
  },

  /// No registered language matches the requested name or flag.
  #[error("unknown target language '{name}' (known: {known})")]
  UnknownLanguage { name: String, known: String },
}

/// The closed set of QC source extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceExtension {
  /// Implementation source.
  Qc,
  /// Header source.
  Hqc,
  /// Unit (module) source.
  Uqc,
  /// Interface source.
  Iqc,
}

impl SourceExtension {
  pub const ALL: [SourceExtension; 4] = [Self::Qc, Self::Hqc, Self::Uqc, Self::Iqc];

  /// Canonical extension, including the leading dot.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Qc => ".qc",
      Self::Hqc => ".hqc",
      Self::Uqc => ".uqc",
      Self::Iqc => ".iqc",
    }
  }

  /// Split a file name into its base name and recognized extension.
  ///
  /// Matching is ASCII case-insensitive. Names without a base (`.qc`) and
  /// names with any other extension return `None`.
  pub fn split_file_name(file_name: &str) -> Option<(&str, Self)> {
    let (base, ext) = file_name.rsplit_once('.')?;
    if base.is_empty() {
      return None;
    }
    Self::ALL
      .into_iter()
      .find(|known| known.as_str()[1..].eq_ignore_ascii_case(ext))
      .map(|known| (base, known))
  }
}

impl fmt::Display for SourceExtension {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for SourceExtension {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

/// An output language the transcompiler can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetLanguage {
  name: String,
  flag: String,
  outputs: BTreeMap<SourceExtension, String>,
}

impl TargetLanguage {
  /// Create a language with no output mappings yet.
  pub fn new(name: impl Into<String>, flag: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      flag: flag.into(),
      outputs: BTreeMap::new(),
    }
  }

  /// Map a source extension to the output extension this language produces.
  pub fn with_output(mut self, source: SourceExtension, output: impl Into<String>) -> Self {
    self.outputs.insert(source, output.into());
    self
  }

  /// C++17: implementation-like sources become `.cpp`, header-like ones `.hpp`.
  pub fn cpp17() -> Self {
    Self::new("C++17", "CPP17")
      .with_output(SourceExtension::Qc, ".cpp")
      .with_output(SourceExtension::Hqc, ".hpp")
      .with_output(SourceExtension::Uqc, ".cpp")
      .with_output(SourceExtension::Iqc, ".hpp")
  }

  /// C#: every source becomes a `.cs` file.
  pub fn csharp() -> Self {
    SourceExtension::ALL
      .into_iter()
      .fold(Self::new("C#", "CS"), |lang, ext| lang.with_output(ext, ".cs"))
  }

  /// Human-readable name, e.g. `C++17`.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Token passed to the transcompiler's `--language` option.
  pub fn flag(&self) -> &str {
    &self.flag
  }

  pub fn outputs(&self) -> &BTreeMap<SourceExtension, String> {
    &self.outputs
  }

  /// Output extension for `source`, including the leading dot.
  pub fn output_extension(&self, source: SourceExtension) -> Result<&str, RegistryError> {
    self
      .outputs
      .get(&source)
      .map(String::as_str)
      .ok_or_else(|| RegistryError::UnmappedExtension {
        extension: source,
        language: self.name.clone(),
      })
  }

  fn answers_to(&self, query: &str) -> bool {
    self.name.eq_ignore_ascii_case(query) || self.flag.eq_ignore_ascii_case(query)
  }
}

impl fmt::Display for TargetLanguage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}

/// Immutable lookup table of recognized extensions and registered languages.
#[derive(Debug, Clone)]
pub struct Registry {
  languages: Vec<TargetLanguage>,
}

impl Registry {
  pub fn new(languages: Vec<TargetLanguage>) -> Self {
    Self { languages }
  }

  /// The closed set of extensions treated as generation inputs.
  pub fn recognized_extensions(&self) -> &'static [SourceExtension] {
    &SourceExtension::ALL
  }

  /// Output extension for `source` under `language`.
  pub fn output_extension<'a>(
    &self,
    source: SourceExtension,
    language: &'a TargetLanguage,
  ) -> Result<&'a str, RegistryError> {
    language.output_extension(source)
  }

  /// Transcompiler-facing flag for `language`.
  pub fn language_flag<'a>(&self, language: &'a TargetLanguage) -> &'a str {
    language.flag()
  }

  pub fn languages(&self) -> &[TargetLanguage] {
    &self.languages
  }

  /// Find a language by display name or flag, ignoring ASCII case.
  pub fn language(&self, query: &str) -> Result<&TargetLanguage, RegistryError> {
    let query = query.trim();
    self
      .languages
      .iter()
      .find(|lang| lang.answers_to(query))
      .ok_or_else(|| RegistryError::UnknownLanguage {
        name: query.to_string(),
        known: self
          .languages
          .iter()
          .map(TargetLanguage::name)
          .collect::<Vec<_>>()
          .join(", "),
      })
  }
}

impl Default for Registry {
  fn default() -> Self {
    Self::new(vec![TargetLanguage::cpp17(), TargetLanguage::csharp()])
  }
}
