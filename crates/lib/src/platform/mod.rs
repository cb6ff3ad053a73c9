pub mod os;

pub use os::Os;

/// Returns the delete command for the current host
pub fn delete_command() -> &'static str {
  Os::current().delete_command()
}
