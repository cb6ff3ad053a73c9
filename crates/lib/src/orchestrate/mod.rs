//! The build façade.
//!
//! [`BuildOrchestrator`] ties the pieces together for one project:
//!
//! - [`generate_build_file`](BuildOrchestrator::generate_build_file) renders
//!   the rules for the current directory contents and overwrites `Makefile`
//! - [`run_all`](BuildOrchestrator::run_all) runs `<make> all` in the project
//! - [`run_clean`](BuildOrchestrator::run_clean) runs `<make> clean`
//!
//! The orchestrator keeps no state between calls. Every generation lists the
//! directory again, and a failed build leaves whatever outputs make already
//! produced on disk.

mod types;

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::BuildConfig;
use crate::consts::{ALL_TARGET, CLEAN_TARGET, MAKEFILE_NAME};
use crate::generate::{BuildFileDocument, RuleGenerator};
use crate::process::{ExecutionResult, ProcessRunner};
use crate::registry::{Registry, TargetLanguage};

pub use types::{BuildError, ErrorKind, GeneratedFile};

/// Generates and runs the build for a single project directory.
#[derive(Debug, Clone)]
pub struct BuildOrchestrator<'a> {
  registry: &'a Registry,
  config: BuildConfig,
  runner: ProcessRunner,
  delete_command: Option<String>,
}

impl<'a> BuildOrchestrator<'a> {
  pub fn new(registry: &'a Registry, config: BuildConfig) -> Self {
    let runner = ProcessRunner::new().with_timeout(config.timeout);
    Self {
      registry,
      config,
      runner,
      delete_command: None,
    }
  }

  /// Override the host-specific delete command used by the `clean` rule.
  pub fn with_delete_command(mut self, command: impl Into<String>) -> Self {
    self.delete_command = Some(command.into());
    self
  }

  pub fn config(&self) -> &BuildConfig {
    &self.config
  }

  /// Where the generated build file lives.
  pub fn makefile_path(&self) -> PathBuf {
    self.config.project_dir.join(MAKEFILE_NAME)
  }

  /// The configured language, or `None` if none was selected.
  pub fn language(&self) -> Result<Option<&'a TargetLanguage>, BuildError> {
    match &self.config.language {
      Some(name) => Ok(Some(self.registry.language(name)?)),
      None => Ok(None),
    }
  }

  /// Render the build file in memory without writing it.
  pub fn render(&self) -> Result<BuildFileDocument, BuildError> {
    let language = self.language()?;

    let mut generator =
      RuleGenerator::new(self.registry).with_include(self.config.include.clone());
    if let Some(command) = &self.delete_command {
      generator = generator.with_delete_command(command.clone());
    }

    let document =
      generator.generate(&self.config.project_dir, &self.config.transcompiler, language)?;
    Ok(document)
  }

  /// Render the build file and overwrite `<project>/Makefile` with it.
  ///
  /// Nothing is written if generation fails.
  pub fn generate_build_file(&self) -> Result<GeneratedFile, BuildError> {
    let document = self.render()?;
    let path = self.makefile_path();

    fs::write(&path, document.to_string()).map_err(|source| BuildError::WriteFailed {
      path: path.clone(),
      source,
    })?;

    info!(path = %path.display(), targets = document.len(), "wrote build file");
    Ok(GeneratedFile { path, document })
  }

  /// Run the `all` target. Fails with [`BuildError::BuildFailed`] on a
  /// non-zero exit.
  pub async fn run_all(&self) -> Result<ExecutionResult, BuildError> {
    let result = self.run_target(ALL_TARGET).await?;
    if !result.success() {
      warn!(exit_code = ?result.exit_code, "build failed");
      return Err(BuildError::BuildFailed {
        exit_code: result.exit_code,
        stdout: result.stdout,
        stderr: result.stderr,
      });
    }
    Ok(result)
  }

  /// Run the `clean` target. Fails with [`BuildError::CleanFailed`] on a
  /// non-zero exit.
  pub async fn run_clean(&self) -> Result<ExecutionResult, BuildError> {
    let result = self.run_target(CLEAN_TARGET).await?;
    if !result.success() {
      warn!(exit_code = ?result.exit_code, "clean failed");
      return Err(BuildError::CleanFailed {
        exit_code: result.exit_code,
        stdout: result.stdout,
        stderr: result.stderr,
      });
    }
    Ok(result)
  }

  async fn run_target(&self, target: &str) -> Result<ExecutionResult, BuildError> {
    let result = self
      .runner
      .run(&self.config.build_executor, target, &self.config.project_dir)
      .await?;
    Ok(result)
  }
}
