//! Fixed names shared across the crate.

/// File name of the generated build file inside the project directory.
pub const MAKEFILE_NAME: &str = "Makefile";

/// Make variable holding the transcompiler invocation prefix.
pub const BEGIN_VALUES_VAR: &str = "BEGIN_VALUES";

/// Make variable holding the language flag suffix.
pub const ENDING_FLAGS_VAR: &str = "ENDING_FLAGS";

/// Aggregate target that depends on every generated output.
pub const ALL_TARGET: &str = "all";

/// Aggregate target that deletes every generated output.
pub const CLEAN_TARGET: &str = "clean";

pub const ENV_PROJECT_DIR: &str = "QCMAKE_PROJECT_DIR";
pub const ENV_TRANSCOMPILER: &str = "QCMAKE_TRANSCOMPILER";
pub const ENV_MAKE: &str = "QCMAKE_MAKE";
pub const ENV_LANGUAGE: &str = "QCMAKE_LANGUAGE";
pub const ENV_TIMEOUT: &str = "QCMAKE_TIMEOUT";

pub const DEFAULT_TRANSCOMPILER: &str = "qc";
pub const DEFAULT_MAKE: &str = "make";
