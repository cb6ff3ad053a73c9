//! Error and result types for the build façade.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::generate::{BuildFileDocument, GenerateError};
use crate::process::ProcessError;
use crate::registry::RegistryError;

/// Coarse classification of a [`BuildError`], for callers that only need to
/// decide how to present or react to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  /// Missing or invalid settings. Nothing was written or executed.
  Configuration,
  /// A directory could not be listed or the build file could not be written.
  Filesystem,
  /// The build executor could not be started.
  Launch,
  /// The build executor (or a recipe it ran) failed.
  ExternalTool,
  /// The extension table is inconsistent.
  Internal,
}

impl ErrorKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Configuration => "configuration",
      Self::Filesystem => "filesystem",
      Self::Launch => "launch",
      Self::ExternalTool => "external tool",
      Self::Internal => "internal",
    }
  }
}

impl fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Errors surfaced by [`BuildOrchestrator`](super::BuildOrchestrator).
#[derive(Debug, Error)]
pub enum BuildError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Registry(#[from] RegistryError),

  #[error(transparent)]
  Generate(#[from] GenerateError),

  #[error("failed to write {}: {source}", path.display())]
  WriteFailed { path: PathBuf, source: std::io::Error },

  #[error(transparent)]
  Process(#[from] ProcessError),

  /// `<make> all` exited unsuccessfully.
  #[error("build failed ({})", describe_exit(*exit_code))]
  BuildFailed {
    exit_code: Option<i32>,
    stdout: String,
    stderr: String,
  },

  /// `<make> clean` exited unsuccessfully.
  #[error("clean failed ({})", describe_exit(*exit_code))]
  CleanFailed {
    exit_code: Option<i32>,
    stdout: String,
    stderr: String,
  },
}

impl BuildError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Config(_) => ErrorKind::Configuration,
      Self::Registry(err) => registry_kind(err),
      Self::Generate(err) => match err {
        GenerateError::NoLanguageSelected
        | GenerateError::DuplicateTarget { .. }
        | GenerateError::UnsafeFileName { .. }
        | GenerateError::NonUnicodeFileName { .. } => ErrorKind::Configuration,
        GenerateError::DirectoryUnavailable { .. } => ErrorKind::Filesystem,
        GenerateError::Registry(err) => registry_kind(err),
      },
      Self::WriteFailed { .. } => ErrorKind::Filesystem,
      Self::Process(err) => match err {
        ProcessError::LaunchFailure { .. } => ErrorKind::Launch,
        ProcessError::TimedOut { .. } | ProcessError::Wait { .. } => ErrorKind::ExternalTool,
      },
      Self::BuildFailed { .. } | Self::CleanFailed { .. } => ErrorKind::ExternalTool,
    }
  }

  /// Captured stderr of a failed build or clean, if any.
  pub fn stderr(&self) -> Option<&str> {
    match self {
      Self::BuildFailed { stderr, .. } | Self::CleanFailed { stderr, .. } => Some(stderr.as_str()),
      _ => None,
    }
  }

  pub fn stdout(&self) -> Option<&str> {
    match self {
      Self::BuildFailed { stdout, .. } | Self::CleanFailed { stdout, .. } => Some(stdout.as_str()),
      _ => None,
    }
  }

  /// Exit code of a failed build or clean.
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      Self::BuildFailed { exit_code, .. } | Self::CleanFailed { exit_code, .. } => *exit_code,
      _ => None,
    }
  }
}

fn registry_kind(err: &RegistryError) -> ErrorKind {
  match err {
    RegistryError::UnknownLanguage { .. } => ErrorKind::Configuration,
    RegistryError::UnmappedExtension { .. } => ErrorKind::Internal,
  }
}

fn describe_exit(code: Option<i32>) -> String {
  match code {
    Some(code) => format!("exit code {code}"),
    None => "terminated by signal".to_string(),
  }
}

/// A build file that was rendered and written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFile {
  pub path: PathBuf,
  pub document: BuildFileDocument,
}
