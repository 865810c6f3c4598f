//! External command execution.
//!
//! Commands inherit the working directory of the calling process, so callers
//! that need a particular directory change into it first (the packager uses a
//! scoped directory guard for this).

use log::debug;
use std::io;
use std::process::{Command, Output};

/// Abstraction for running external commands.
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the command.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cellar_common::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let executor = SystemCommandExecutor;
    /// let output = executor.run("git", &["--version"])?;
    /// assert!(output.status.success());
    /// # Ok::<(), std::io::Error>(())
    /// ```
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        self.run_with_env(cmd, args, &[])
    }

    /// Runs a command with extra environment variables layered over the
    /// inherited environment.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the command.
    fn run_with_env(&self, cmd: &str, args: &[&str], env: &[(&str, &str)]) -> io::Result<Output>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run_with_env(&self, cmd: &str, args: &[&str], env: &[(&str, &str)]) -> io::Result<Output> {
        debug!("running `{cmd} {}`", args.join(" "));
        Command::new(cmd)
            .args(args)
            .envs(env.iter().copied())
            .output()
    }
}

/// Summarises a failed command's output for an error message.
///
/// Prefers trimmed stderr, then trimmed stdout, then the exit status.
///
/// # Examples
///
/// ```
/// # #[cfg(unix)]
/// # {
/// use cellar_common::describe_failure;
/// use std::os::unix::process::ExitStatusExt;
/// use std::process::{ExitStatus, Output};
///
/// let output = Output {
///     status: ExitStatus::from_raw(2 << 8),
///     stdout: Vec::new(),
///     stderr: b"dpkg-source: error: no upstream tarball\n".to_vec(),
/// };
/// assert_eq!(describe_failure(&output), "dpkg-source: error: no upstream tarball");
/// # }
/// ```
#[must_use]
pub fn describe_failure(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_owned();
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_owned();
    }

    match output.status.code() {
        Some(code) => format!("exited with status {code}"),
        None => "terminated by signal".to_owned(),
    }
}
