//! Build and clean against real make.

use predicates::prelude::*;

use crate::common::{TestEnv, make_available};

#[test]
fn build_produces_every_output() {
  if !make_available() {
    eprintln!("make not found, skipping");
    return;
  }
  let env = TestEnv::new();
  env.write_source("foo.qc", "module foo");
  env.write_source("bar.hqc", "header bar");
  env.write_source("readme.txt", "not a source");

  env
    .qcmake("build", "C++17")
    .assert()
    .success()
    .stdout(predicate::str::contains("All done."));

  assert!(env.path("foo.cpp").exists());
  assert!(env.path("bar.hpp").exists());
  assert!(!env.path("readme.cpp").exists());
  let generated = std::fs::read_to_string(env.path("foo.cpp")).unwrap();
  assert_eq!(generated, "// generated from foo.qc\n");
}

#[test]
fn clean_removes_outputs() {
  if !make_available() {
    eprintln!("make not found, skipping");
    return;
  }
  let env = TestEnv::new();
  env.write_source("foo.qc", "module foo");
  env.write_source("bar.hqc", "header bar");

  env.qcmake("build", "C#").assert().success();
  assert!(env.path("foo.cs").exists());
  assert!(env.path("bar.cs").exists());

  env.qcmake("clean", "C#").assert().success();
  assert!(!env.path("foo.cs").exists());
  assert!(env.path("foo.qc").exists());
  assert!(env.path("bar.hqc").exists());
}

#[test]
fn failing_recipe_fails_build_and_keeps_earlier_outputs() {
  if !make_available() {
    eprintln!("make not found, skipping");
    return;
  }
  let env = TestEnv::new();
  // Sorted order puts a.qc first, so its output exists before b.qc fails.
  env.write_source("a.qc", "fine");
  env.write_source("b.qc", "SYNTAX_ERROR");

  env
    .qcmake("build", "C++17")
    .assert()
    .failure()
    .stderr(predicate::str::contains("b.qc: syntax error"))
    .stderr(predicate::str::contains("Build failed"));

  assert!(env.path("a.cpp").exists());
  assert!(!env.path("b.cpp").exists());
}

#[test]
fn rebuild_picks_up_new_sources() {
  if !make_available() {
    eprintln!("make not found, skipping");
    return;
  }
  let env = TestEnv::new();
  env.write_source("one.qc", "1");
  env.qcmake("build", "C#").assert().success();

  env.write_source("two.uqc", "2");
  env.qcmake("build", "C#").assert().success();

  assert!(env.path("one.cs").exists());
  assert!(env.path("two.cs").exists());
}

#[test]
fn clean_runs_even_with_a_file_named_clean() {
  if !make_available() {
    eprintln!("make not found, skipping");
    return;
  }
  let env = TestEnv::new();
  env.write_source("foo.qc", "module foo");
  env.qcmake("build", "C#").assert().success();

  env.write_source("clean", "");
  env.qcmake("clean", "C#").assert().success();
  assert!(!env.path("foo.cs").exists());
}

#[test]
fn clean_on_empty_project_succeeds() {
  if !make_available() {
    eprintln!("make not found, skipping");
    return;
  }
  let env = TestEnv::new();
  env.qcmake("clean", "C#").assert().success();
  env.qcmake("build", "C#").assert().success();
}

#[test]
fn relative_include_resolves_from_caller_directory() {
  if !make_available() {
    eprintln!("make not found, skipping");
    return;
  }
  let env = TestEnv::new();
  env.write_source("foo.qc", "module foo");
  env.write_sibling("extra.mk", "EXTRA_NOTE = from extra.mk\n");

  env
    .qcmake("build", "C#")
    .current_dir(env.temp.path())
    .args(["--include", "extra.mk"])
    .assert()
    .success();

  assert!(env.path("foo.cs").exists());
}
