//! cellar packager CLI entrypoint.
//!
//! This binary stages pre-built artifacts, writes Debian metadata and runs
//! `debuild`, or prints one of the rendered control records.

use cellar_common::SystemCommandExecutor;
use cellar_packager::cli::{Cli, Command};
use cellar_packager::error::Result;
use cellar_packager::output::{outcome_json, success_message, write_stderr_line, write_stdout_line};
use cellar_packager::pipeline::{run_build, run_show};
use clap::Parser;
use std::error::Error as _;
use std::io::Write;
use time::OffsetDateTime;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
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

fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    let now = OffsetDateTime::now_utc();

    if let Some(Command::Show(args)) = &cli.command {
        return run_show(args, now, stdout);
    }

    let args = cli.build_args();
    let Some(outcome) = run_build(args, &SystemCommandExecutor, now, stderr)? else {
        return Ok(());
    };

    if args.json {
        write_stdout_line(stdout, outcome_json(&outcome)?)
    } else {
        if !args.quiet {
            write_stderr_line(stderr, "");
            write_stderr_line(stderr, success_message(&outcome));
        }
        Ok(())
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
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
