//! cellar launcher CLI entrypoint.
//!
//! Runs the editor or player inside the Wine prefix. A launcher that is not
//! installed is reported on stderr with exit code 2; other failures exit
//! with 1.

use cellar_common::{CommandExecutor, SystemCommandExecutor};
use cellar_launcher::cli::{Cli, Command};
use cellar_launcher::dirs::{BaseDirs, SystemBaseDirs};
use cellar_launcher::error::{LauncherError, Result};
use cellar_launcher::launch::Launcher;
use cellar_launcher::prefix::WinePrefix;
use clap::Parser;
use std::error::Error as _;
use std::io::Write;

const NOT_INSTALLED: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stderr = std::io::stderr();
    let dirs = SystemBaseDirs::new();
    let result = run(
        &cli,
        dirs.as_ref().map(|dirs| dirs as &dyn BaseDirs),
        &SystemCommandExecutor,
        &mut stderr,
    );
    let exit_code = exit_code_for_run_result(result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging(cli: &Cli) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level().as_str()),
    )
    .format_timestamp(None)
    .init();
}

fn resolve_prefix(cli: &Cli, dirs: Option<&dyn BaseDirs>) -> Result<WinePrefix> {
    let prefix = match (&cli.prefix, dirs) {
        (Some(root), _) => WinePrefix::new(root.clone()),
        (None, Some(dirs)) => WinePrefix::default_location(dirs)?,
        (None, None) => return Err(LauncherError::NoDataDir),
    };
    Ok(prefix.with_wine(cli.wine.clone()))
}

fn run(
    cli: &Cli,
    dirs: Option<&dyn BaseDirs>,
    executor: &dyn CommandExecutor,
    stderr: &mut dyn Write,
) -> Result<i32> {
    let prefix = resolve_prefix(cli, dirs)?;
    let mut launcher = Launcher::new(&prefix, executor);
    if let Some(versions_dir) = &cli.versions_dir {
        launcher = launcher.with_versions_dir(versions_dir.clone());
    }

    let (ran, application) = match &cli.command {
        Command::Editor { uri } => (launcher.run_editor(uri.as_deref())?, "editor"),
        Command::Player { uri } => (launcher.run_player(uri)?, "player"),
    };
    if ran {
        return Ok(0);
    }

    write_stderr_line(
        stderr,
        format!(
            "The {application} is not installed in {}. Run the installer in this prefix first.",
            launcher.versions_dir()
        ),
    );
    Ok(NOT_INSTALLED)
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

fn exit_code_for_run_result(result: Result<i32>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(code) => code,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            let mut source = err.source();
            while let Some(cause) = source {
                write_stderr_line(stderr, format!("  caused by: {cause}"));
                source = cause.source();
            }
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use cellar_common::test_support::{ExpectedCall, StubExecutor};
    use std::path::PathBuf;

    fn cli(argv: &[&str]) -> Cli {
        Cli::try_parse_from(argv).expect("parse")
    }

    #[test]
    fn absent_launcher_prints_message_and_exits_two() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let cli = cli(&["cellar-launch", "--prefix", root.as_str(), "editor"]);
        let stub = StubExecutor::new(Vec::new());
        let mut stderr = Vec::new();

        let code = run(&cli, None, &stub, &mut stderr).expect("run");

        assert_eq!(code, NOT_INSTALLED);
        let text = String::from_utf8(stderr).expect("utf8");
        assert!(text.contains("The editor is not installed"));
        assert!(stub.calls().is_empty());
    }

    #[test]
    fn installed_player_runs_through_configured_wine() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let build = root.join("Versions/version-a");
        std::fs::create_dir_all(&build).expect("mkdir");
        let player = build.join("RobloxPlayerLauncher.exe");
        std::fs::write(&player, b"MZ").expect("write");
        let versions = root.join("Versions");
        let cli = cli(&[
            "cellar-launch",
            "--prefix",
            root.as_str(),
            "--versions-dir",
            versions.as_str(),
            "--wine",
            "wine64",
            "player",
            "roblox-player:1",
        ]);
        let stub = StubExecutor::new(vec![ExpectedCall::new(
            "wine64",
            [player.as_str(), "roblox-player:1"],
        )]);
        let mut stderr = Vec::new();

        let code = run(&cli, None, &stub, &mut stderr).expect("run");

        assert_eq!(code, 0);
        stub.assert_finished();
    }

    #[test]
    fn missing_prefix_and_data_dir_is_an_error() {
        let cli = cli(&["cellar-launch", "editor"]);
        let stub = StubExecutor::new(Vec::new());
        let mut stderr = Vec::new();

        let code = exit_code_for_run_result(run(&cli, None, &stub, &mut stderr), &mut stderr);

        assert_eq!(code, 1);
        let text = String::from_utf8(stderr).expect("utf8");
        assert!(text.contains("error: could not determine the data directory"));
    }

    #[test]
    fn exit_code_prints_error_chain() {
        let err = LauncherError::Spawn {
            tool: "wine".to_owned(),
            source: std::io::Error::other("No such file or directory"),
        };
        let mut stderr = Vec::new();

        let code = exit_code_for_run_result(Err(err), &mut stderr);

        assert_eq!(code, 1);
        let text = String::from_utf8(stderr).expect("utf8");
        assert!(text.contains("error: failed to run wine"));
        assert!(text.contains("caused by: No such file or directory"));
    }

    struct FixedDirs(PathBuf);

    impl BaseDirs for FixedDirs {
        fn cellar_data_dir(&self) -> Option<PathBuf> {
            Some(self.0.clone())
        }
    }

    #[test]
    fn default_prefix_comes_from_data_dir() {
        let cli = cli(&["cellar-launch", "editor"]);
        let dirs = FixedDirs(PathBuf::from("/data/cellar"));

        let prefix = resolve_prefix(&cli, Some(&dirs)).expect("prefix");

        assert_eq!(prefix.root(), "/data/cellar/wineprefix");
    }
}
