//! Version-control history for the changelog.

use crate::error::{PackagerError, Result};
use cellar_common::{CommandExecutor, describe_failure};
use log::debug;
use std::process::Output;

/// Source of change summaries for the changelog.
#[cfg_attr(test, mockall::automock)]
pub trait VersionHistory {
    /// Returns the name of the checked-out branch.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Git`] if the query fails.
    fn current_branch(&self) -> Result<String>;

    /// Returns one summary per change between `reference` and `branch`.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::Git`] if the query fails, including when
    /// `reference` does not exist.
    fn summaries(&self, reference: &str, branch: &str) -> Result<Vec<String>>;
}

/// [`VersionHistory`] backed by the `git` command line.
pub struct GitHistory<'a> {
    executor: &'a dyn CommandExecutor,
}

impl<'a> GitHistory<'a> {
    /// Creates a history that runs `git` through `executor`.
    #[must_use]
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self { executor }
    }

    fn git(&self, operation: &'static str, args: &[&str]) -> Result<String> {
        debug!("git {}", args.join(" "));
        let output = self
            .executor
            .run("git", args)
            .map_err(|e| PackagerError::Git {
                operation,
                message: e.to_string(),
            })?;
        check_output(operation, &output)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn check_output(operation: &'static str, output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    Err(PackagerError::Git {
        operation,
        message: describe_failure(output),
    })
}

impl VersionHistory for GitHistory<'_> {
    fn current_branch(&self) -> Result<String> {
        let stdout = self.git("rev-parse", &["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(stdout.trim().to_owned())
    }

    fn summaries(&self, reference: &str, branch: &str) -> Result<Vec<String>> {
        let range = format!("{reference}...{branch}");
        let stdout = self.git("shortlog", &["shortlog", &range])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellar_common::test_support::{ExpectedCall, StubExecutor, failure_output, stdout_output};

    #[test]
    fn current_branch_is_trimmed() {
        let stub = StubExecutor::new(vec![
            ExpectedCall::new("git", ["rev-parse", "--abbrev-ref", "HEAD"])
                .returning(stdout_output("feature/launcher\n")),
        ]);

        let branch = GitHistory::new(&stub).current_branch().expect("branch");

        assert_eq!(branch, "feature/launcher");
    }

    #[test]
    fn summaries_keep_non_empty_trimmed_lines() {
        let stub = StubExecutor::new(vec![
            ExpectedCall::new("git", ["shortlog", "master...feature"]).returning(stdout_output(
                "Ada Lovelace (2):\n      Add launcher lookup\n      Fix prefix path\n\n",
            )),
        ]);

        let summaries = GitHistory::new(&stub)
            .summaries("master", "feature")
            .expect("summaries");

        assert_eq!(
            summaries,
            vec!["Ada Lovelace (2):", "Add launcher lookup", "Fix prefix path"]
        );
    }

    #[test]
    fn empty_history_yields_no_summaries() {
        let stub = StubExecutor::new(vec![ExpectedCall::any_args("git")]);
        let summaries = GitHistory::new(&stub)
            .summaries("master", "master")
            .expect("summaries");
        assert!(summaries.is_empty());
    }

    #[test]
    fn missing_reference_is_a_git_error() {
        let stub = StubExecutor::new(vec![ExpectedCall::any_args("git").returning(
            failure_output("fatal: ambiguous argument 'master...main': unknown revision"),
        )]);

        let err = GitHistory::new(&stub)
            .summaries("master", "main")
            .expect_err("missing branch");

        match err {
            PackagerError::Git { operation, message } => {
                assert_eq!(operation, "shortlog");
                assert!(message.contains("unknown revision"));
            }
            other => panic!("expected Git error, got {other:?}"),
        }
    }

    #[test]
    fn spawn_failure_is_a_git_error() {
        let stub = StubExecutor::new(vec![
            ExpectedCall::any_args("git").failing_to_spawn(std::io::ErrorKind::NotFound),
        ]);
        let result = GitHistory::new(&stub).current_branch();
        assert!(matches!(
            result,
            Err(PackagerError::Git {
                operation: "rev-parse",
                ..
            })
        ));
    }
}
