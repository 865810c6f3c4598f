//! Host tool checks run before any side effect.

use crate::config::UnpackerKind;
use crate::error::{PackagerError, Result};
use cellar_common::CommandExecutor;
use log::debug;

/// A host tool the pipeline shells out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostTool {
    /// Executable name.
    pub command: &'static str,
    /// Arguments that make the tool print its version and exit zero.
    pub probe_args: &'static [&'static str],
    /// Debian package that provides the tool.
    pub provided_by: &'static str,
}

const DEBUILD: HostTool = HostTool {
    command: "debuild",
    probe_args: &["--version"],
    provided_by: "devscripts",
};

const GIT: HostTool = HostTool {
    command: "git",
    probe_args: &["--version"],
    provided_by: "git",
};

const UNZIP: HostTool = HostTool {
    command: "unzip",
    probe_args: &["-v"],
    provided_by: "unzip",
};

/// Returns the tools a run needs with the given unpacker, including
/// `debuild` only when the package will be built.
#[must_use]
pub fn required_tools(unpacker: UnpackerKind, build: bool) -> Vec<HostTool> {
    let mut tools = Vec::new();
    if build {
        tools.push(DEBUILD);
    }
    tools.push(GIT);
    if unpacker == UnpackerKind::Unzip {
        tools.push(UNZIP);
    }
    tools
}

/// Probes every tool in `tools` and returns those that are unavailable.
#[must_use]
pub fn missing_tools(executor: &dyn CommandExecutor, tools: &[HostTool]) -> Vec<HostTool> {
    tools
        .iter()
        .copied()
        .filter(|tool| !command_succeeds(executor, tool.command, tool.probe_args))
        .collect()
}

/// Fails if any tool in [`required_tools`] is missing.
///
/// # Errors
///
/// Returns [`PackagerError::MissingTools`] listing each absent tool with
/// the package that provides it.
pub fn check_host_tools(
    executor: &dyn CommandExecutor,
    unpacker: UnpackerKind,
    build: bool,
) -> Result<()> {
    let missing = missing_tools(executor, &required_tools(unpacker, build));
    if missing.is_empty() {
        return Ok(());
    }
    let tools = missing
        .iter()
        .map(|tool| format!("  {} (apt install {})", tool.command, tool.provided_by))
        .collect::<Vec<_>>()
        .join("\n");
    Err(PackagerError::MissingTools { tools })
}

/// Returns true if the given command executes successfully.
fn command_succeeds(executor: &dyn CommandExecutor, cmd: &str, args: &[&str]) -> bool {
    let ok = executor.run(cmd, args).is_ok_and(|o| o.status.success());
    debug!("probe {cmd}: {}", if ok { "found" } else { "missing" });
    ok
}
