//! Layered build configuration.
//!
//! Values are resolved with this precedence: explicit overrides (usually CLI
//! flags), then `QCMAKE_*` environment variables, then built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::consts::{
  DEFAULT_MAKE, DEFAULT_TRANSCOMPILER, ENV_LANGUAGE, ENV_MAKE, ENV_PROJECT_DIR, ENV_TIMEOUT,
  ENV_TRANSCOMPILER,
};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("no project directory set (pass --dir or set QCMAKE_PROJECT_DIR)")]
  MissingProjectDir,

  #[error("invalid timeout '{value}': {source}")]
  InvalidTimeout {
    value: String,
    source: humantime::DurationError,
  },
}

/// Fully resolved settings for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
  /// Directory holding the QC sources and the generated `Makefile`.
  pub project_dir: PathBuf,
  pub transcompiler: PathBuf,
  pub build_executor: PathBuf,
  /// Selected language, by display name or flag. `None` fails generation.
  pub language: Option<String>,
  pub timeout: Option<Duration>,
  /// Extra makefile to `include` in the generated file.
  pub include: Option<PathBuf>,
}

/// Explicitly supplied values. Anything left `None` falls back to the
/// environment and then to defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
  pub project_dir: Option<PathBuf>,
  pub transcompiler: Option<PathBuf>,
  pub build_executor: Option<PathBuf>,
  pub language: Option<String>,
  pub timeout: Option<Duration>,
  pub include: Option<PathBuf>,
  /// Used only when neither an override nor the environment names a project.
  pub default_project_dir: Option<PathBuf>,
}

impl ConfigOverrides {
  pub fn resolve(self) -> Result<BuildConfig, ConfigError> {
    let project_dir = self
      .project_dir
      .or_else(|| env_value(ENV_PROJECT_DIR).map(PathBuf::from))
      .or(self.default_project_dir)
      .ok_or(ConfigError::MissingProjectDir)?;
    // A missing directory is reported by generation, with its path.
    let project_dir = dunce::canonicalize(&project_dir).unwrap_or(project_dir);

    let transcompiler = self
      .transcompiler
      .or_else(|| env_value(ENV_TRANSCOMPILER).map(PathBuf::from))
      .unwrap_or_else(|| PathBuf::from(DEFAULT_TRANSCOMPILER));

    let build_executor = self
      .build_executor
      .or_else(|| env_value(ENV_MAKE).map(PathBuf::from))
      .unwrap_or_else(|| PathBuf::from(DEFAULT_MAKE));

    let language = self.language.or_else(|| env_value(ENV_LANGUAGE));

    let timeout = match self.timeout {
      Some(timeout) => Some(timeout),
      None => env_value(ENV_TIMEOUT).map(|v| parse_timeout(&v)).transpose()?,
    };

    // make resolves `include` from the project directory, not from ours.
    let include = self.include.map(|path| absolute_path(&path).unwrap_or(path));

    Ok(BuildConfig {
      project_dir,
      transcompiler,
      build_executor,
      language,
      timeout,
      include,
    })
  }
}

/// Parse a human-readable duration such as `90s` or `5m`.
pub fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
  humantime::parse_duration(value.trim()).map_err(|source| ConfigError::InvalidTimeout {
    value: value.to_string(),
    source,
  })
}

/// Canonical form when the path exists, otherwise joined onto the cwd.
fn absolute_path(path: &Path) -> Option<PathBuf> {
  dunce::canonicalize(path)
    .or_else(|_| std::path::absolute(path))
    .ok()
}

fn env_value(key: &str) -> Option<String> {
  std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
