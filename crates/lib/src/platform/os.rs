use std::fmt;

/// Host operating system families that need distinct build-file recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Unix,
  Windows,
}

impl Os {
  /// Detect the current operating system family at runtime
  pub fn current() -> Self {
    match std::env::consts::FAMILY {
      "windows" => Self::Windows,
      _ => Self::Unix,
    }
  }

  /// Returns the lowercase string identifier for this OS family
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Unix => "unix",
      Self::Windows => "windows",
    }
  }

  /// Command the `clean` recipe uses to delete generated outputs.
  ///
  /// Both forms tolerate missing files so `clean` can run twice in a row.
  pub fn delete_command(&self) -> &'static str {
    match self {
      Self::Unix => "rm -f",
      Self::Windows => "del /Q",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
