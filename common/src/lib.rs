//! Shared subprocess plumbing for the cellar crates.
//!
//! Both the packaging pipeline and the launcher shell out to host tools
//! (`debuild`, `unzip`, `git`, `wine`). They do so through the
//! [`CommandExecutor`] trait so scripted results can stand in for the real
//! tools under test.

pub mod exec;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use exec::{CommandExecutor, SystemCommandExecutor, describe_failure};
