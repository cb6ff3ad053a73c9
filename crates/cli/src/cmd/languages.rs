//! Implementation of the `qcmake languages` command.

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};

use qcmake_lib::Registry;

use crate::output::{OutputFormat, print_json, print_rule};

/// List every registered target language with its flag and output mapping.
pub fn cmd_languages(format: OutputFormat) -> Result<()> {
  let registry = Registry::default();

  if format.is_json() {
    return print_json(&registry.languages());
  }

  for language in registry.languages() {
    let flag = format!("(--language {})", language.flag());
    println!(
      "{} {}",
      language.name().if_supports_color(Stream::Stdout, |s| s.bold()),
      flag.if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
    for (source, output) in language.outputs() {
      print_rule(source.as_str(), output);
    }
  }
  Ok(())
}
