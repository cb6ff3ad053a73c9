//! Running external executables.
//!
//! [`ProcessRunner`] launches one program with one argument in a given
//! working directory, captures stdout and stderr, and waits for it to exit.
//! There is no shell in between, so the argument reaches the program as a
//! single argv entry.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

/// Errors that prevent a process from producing an [`ExecutionResult`].
#[derive(Debug, Error)]
pub enum ProcessError {
  /// The executable could not be started at all.
  #[error("failed to launch {}: {source}", program.display())]
  LaunchFailure { program: PathBuf, source: std::io::Error },

  /// The process outlived the configured timeout and was killed.
  #[error("{} did not finish within {}", program.display(), humantime::format_duration(*timeout))]
  TimedOut { program: PathBuf, timeout: Duration },

  /// Reading the child's output or waiting on it failed.
  #[error("failed waiting for {}: {source}", program.display())]
  Wait { program: PathBuf, source: std::io::Error },
}

/// Outcome of a process that ran to completion.
///
/// A non-zero exit code is a normal value here, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
  /// Exit code, or `None` if the process was terminated by a signal.
  pub exit_code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl ExecutionResult {
  pub fn success(&self) -> bool {
    self.exit_code == Some(0)
  }
}

/// Launches external executables and captures their output.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
  timeout: Option<Duration>,
}

impl ProcessRunner {
  /// Create a runner that waits as long as the child runs.
  pub fn new() -> Self {
    Self::default()
  }

  /// Kill the child and fail with [`ProcessError::TimedOut`] after `timeout`.
  pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn timeout(&self) -> Option<Duration> {
    self.timeout
  }

  /// Run `program argument` inside `working_dir` and wait for it to exit.
  ///
  /// # Errors
  ///
  /// - [`ProcessError::LaunchFailure`] if the program is missing, not
  ///   executable, or the working directory does not exist
  /// - [`ProcessError::TimedOut`] if a timeout is set and exceeded
  pub async fn run(
    &self,
    program: &Path,
    argument: &str,
    working_dir: &Path,
  ) -> Result<ExecutionResult, ProcessError> {
    info!(program = %program.display(), argument = %argument, "running");
    debug!(working_dir = ?working_dir, timeout = ?self.timeout, "spawning process");

    let child = Command::new(program)
      .arg(argument)
      .current_dir(working_dir)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .kill_on_drop(true)
      .spawn()
      .map_err(|source| ProcessError::LaunchFailure {
        program: program.to_path_buf(),
        source,
      })?;

    // Dropping the wait future on timeout drops the child, which kills it.
    let output = match self.timeout {
      Some(timeout) => tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| ProcessError::TimedOut {
          program: program.to_path_buf(),
          timeout,
        })?,
      None => child.wait_with_output().await,
    }
    .map_err(|source| ProcessError::Wait {
      program: program.to_path_buf(),
      source,
    })?;

    let result = ExecutionResult {
      exit_code: output.status.code(),
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    if !result.stdout.is_empty() {
      debug!(stdout = %result.stdout, "process stdout");
    }
    if !result.stderr.is_empty() {
      debug!(stderr = %result.stderr, "process stderr");
    }
    info!(program = %program.display(), exit_code = ?result.exit_code, "process exited");

    Ok(result)
  }
}
