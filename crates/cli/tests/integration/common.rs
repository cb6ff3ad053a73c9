//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Transcompiler stand-in: `qc --file <src> --language <FLAG>` writes the
/// output a real transcompiler would, containing the source name.
const FAKE_TRANSCOMPILER: &str = r#"#!/bin/sh
src="$2"
flag="$4"
base="${src%.*}"
case "$flag" in
  CS) ext=cs ;;
  CPP17)
    case "$src" in
      *.hqc|*.iqc) ext=hpp ;;
      *) ext=cpp ;;
    esac ;;
  *) echo "unsupported language $flag" >&2; exit 2 ;;
esac
if grep -q SYNTAX_ERROR "$src"; then
  echo "$src: syntax error" >&2
  exit 1
fi
echo "// generated from $src" > "$base.$ext"
"#;

/// Whether a usable `make` is on PATH.
pub fn make_available() -> bool {
  std::process::Command::new("make")
    .arg("--version")
    .output()
    .map(|o| o.status.success())
    .unwrap_or(false)
}

/// Isolated project directory plus a fake transcompiler next to it.
pub struct TestEnv {
  /// Parent of `project`; owns the directory tree.
  pub temp: TempDir,
  pub project: PathBuf,
  pub transcompiler: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    std::fs::create_dir(&project).unwrap();

    let transcompiler = temp.path().join("qc");
    std::fs::write(&transcompiler, FAKE_TRANSCOMPILER).unwrap();
    std::fs::set_permissions(&transcompiler, std::fs::Permissions::from_mode(0o755)).unwrap();

    Self {
      temp,
      project,
      transcompiler,
    }
  }

  /// Write a source file into the project directory.
  pub fn write_source(&self, name: &str, content: &str) {
    std::fs::write(self.project.join(name), content).unwrap();
  }

  pub fn path(&self, name: &str) -> PathBuf {
    self.project.join(name)
  }

  /// Write a file beside the project directory rather than inside it.
  pub fn write_sibling(&self, name: &str, content: &str) {
    std::fs::write(self.temp.path().join(name), content).unwrap();
  }

  /// A `qcmake <subcommand>` pointed at this project.
  pub fn qcmake(&self, subcommand: &str, language: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("qcmake");
    cmd
      .arg(subcommand)
      .arg("--dir")
      .arg(&self.project)
      .arg("--transcompiler")
      .arg(&self.transcompiler)
      .args(["--language", language, "--make", "make"]);
    cmd
  }
}
