//! End-to-end tests that drive a real make against a fake transcompiler.

#[cfg(unix)]
mod build_tests;
#[cfg(unix)]
mod common;
