//! qcmake-lib: Build-file generation and execution for QC projects
//!
//! This crate turns a directory of QC sources into a make-compatible build
//! file and drives an external build executor against it:
//! - `registry`: recognized source extensions and target languages
//! - `generate`: one rule per source, plus aggregate `all` and `clean` rules
//! - `process`: launching the build executor and capturing its output
//! - `orchestrate`: the `generate` / `all` / `clean` façade callers use

pub mod config;
pub mod consts;
pub mod generate;
pub mod orchestrate;
pub mod platform;
pub mod process;
pub mod registry;

pub use config::{BuildConfig, ConfigError, ConfigOverrides};
pub use generate::{BuildFileDocument, BuildTarget, GenerateError, RuleGenerator, SourceFile};
pub use orchestrate::{BuildError, BuildOrchestrator, ErrorKind, GeneratedFile};
pub use process::{ExecutionResult, ProcessError, ProcessRunner};
pub use registry::{Registry, RegistryError, SourceExtension, TargetLanguage};
