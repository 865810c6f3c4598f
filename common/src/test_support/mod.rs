//! Scripted subprocess results for tests.
//!
//! [`StubExecutor`] replays a queue of expected invocations and records what
//! was actually run, including the working directory at the time of each
//! call, so tests can assert both ordering and placement of tool runs.

use crate::exec::CommandExecutor;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Output};

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Creates a successful command `Output` with empty stdout and stderr.
#[must_use]
pub fn success_output() -> Output {
    stdout_output("")
}

/// Creates a successful command `Output` carrying `stdout`.
#[must_use]
pub fn stdout_output(stdout: &str) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

/// Creates a failed command `Output` with the given stderr message.
#[must_use]
pub fn failure_output(stderr: &str) -> Output {
    Output {
        status: exit_status(1),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Represents an expected command invocation for testing.
#[derive(Debug)]
pub struct ExpectedCall {
    /// The command to execute (e.g., "debuild").
    pub cmd: String,
    /// The arguments to expect, or `None` to accept any.
    pub args: Option<Vec<String>>,
    /// The result to return when this command is invoked.
    pub result: io::Result<Output>,
}

impl ExpectedCall {
    /// Expects `cmd` with exactly `args`, succeeding with empty output.
    pub fn new<I, S>(cmd: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cmd: cmd.to_owned(),
            args: Some(args.into_iter().map(Into::into).collect()),
            result: Ok(success_output()),
        }
    }

    /// Expects `cmd` with any arguments, succeeding with empty output.
    #[must_use]
    pub fn any_args(cmd: &str) -> Self {
        Self {
            cmd: cmd.to_owned(),
            args: None,
            result: Ok(success_output()),
        }
    }

    /// Replaces the scripted result.
    #[must_use]
    pub fn returning(mut self, output: Output) -> Self {
        self.result = Ok(output);
        self
    }

    /// Makes the invocation fail to spawn with `kind`.
    #[must_use]
    pub fn failing_to_spawn(mut self, kind: io::ErrorKind) -> Self {
        self.result = Err(io::Error::new(kind, format!("{} could not be spawned", self.cmd)));
        self
    }
}

/// One invocation observed by [`StubExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// The command that was run.
    pub cmd: String,
    /// The arguments it was given.
    pub args: Vec<String>,
    /// Extra environment passed with the call.
    pub env: Vec<(String, String)>,
    /// The process working directory when the call was made.
    pub cwd: Option<PathBuf>,
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Records expected command invocations and returns predefined results,
/// allowing tests to verify command execution without side effects.
#[derive(Debug, Default)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
    recorded: RefCell<Vec<RecordedCall>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    #[must_use]
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
            recorded: RefCell::new(Vec::new()),
        }
    }

    /// Returns every invocation observed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.recorded.borrow().clone()
    }

    /// Returns the invocations of `cmd`, in order.
    #[must_use]
    pub fn calls_to(&self, cmd: &str) -> Vec<RecordedCall> {
        self.recorded
            .borrow()
            .iter()
            .filter(|call| call.cmd == cmd)
            .cloned()
            .collect()
    }

    /// Asserts that all expected command invocations have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining expected calls that were not invoked.
    pub fn assert_finished(&self) {
        let remaining: Vec<String> = self
            .expected
            .borrow()
            .iter()
            .map(|call| call.cmd.clone())
            .collect();
        assert!(
            remaining.is_empty(),
            "expected no further command invocations, still waiting for {remaining:?}"
        );
    }
}

impl CommandExecutor for StubExecutor {
    fn run_with_env(&self, cmd: &str, args: &[&str], env: &[(&str, &str)]) -> io::Result<Output> {
        let args: Vec<String> = args.iter().map(|arg| (*arg).to_owned()).collect();
        self.recorded.borrow_mut().push(RecordedCall {
            cmd: cmd.to_owned(),
            args: args.clone(),
            env: env
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                .collect(),
            cwd: std::env::current_dir().ok(),
        });

        let call = self
            .expected
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected command invocation: {cmd} {args:?}"));

        assert_eq!(call.cmd, cmd);
        if let Some(expected_args) = &call.args {
            assert_eq!(expected_args, &args);
        }

        call.result
    }
}
