//! Tests for packager CLI parsing and default behaviours.

use super::*;
use rstest::rstest;

#[test]
fn cli_parses_defaults() {
    let cli = Cli::parse_from(["cellar-package"]);
    assert!(cli.command.is_none());
    let args = cli.build_args();
    assert_eq!(args.config, Utf8PathBuf::from("packaging.toml"));
    assert_eq!(args.dist_dir, Utf8PathBuf::from("dist"));
    assert!(args.artifact.is_empty());
    assert!(args.containment_dish.is_none());
    assert!(args.unpacker.is_none());
    assert!(!args.skip_preflight);
    assert!(!args.dry_run);
    assert!(!args.no_build);
    assert!(!args.json);
    assert_eq!(args.verbosity, 0);
    assert!(!args.quiet);
}

#[test]
fn cli_parses_repeated_artifacts() {
    let cli = Cli::parse_from([
        "cellar-package",
        "-a",
        "dist/a.whl",
        "--artifact",
        "dist/b.whl",
    ]);
    assert_eq!(cli.build_args().artifact.len(), 2);
}

#[test]
fn build_subcommand_takes_precedence() {
    let cli = Cli::parse_from([
        "cellar-package",
        "build",
        "--unpacker",
        "builtin",
        "--containment-dish",
        "/srv/dish",
        "--json",
    ]);
    let args = cli.build_args();
    assert!(matches!(cli.command, Some(Command::Build(_))));
    assert_eq!(args.unpacker, Some(UnpackerKind::Builtin));
    assert_eq!(args.containment_dish, Some(Utf8PathBuf::from("/srv/dish")));
    assert!(args.json);
}

#[rstest]
#[case::control("control", Record::Control)]
#[case::copyright("copyright", Record::Copyright)]
#[case::dsc("dsc", Record::Dsc)]
fn show_parses_record(#[case] name: &str, #[case] expected: Record) {
    let cli = Cli::parse_from(["cellar-package", "show", name]);
    match cli.command {
        Some(Command::Show(args)) => assert_eq!(args.record, expected),
        _ => panic!("expected Show command"),
    }
}

#[test]
fn show_rejects_unknown_record() {
    let result = Cli::try_parse_from(["cellar-package", "show", "changelog"]);
    assert!(result.is_err());
}

#[test]
fn verbose_and_quiet_conflict() {
    let result = Cli::try_parse_from(["cellar-package", "-v", "-q"]);
    assert!(result.is_err());
}

#[rstest]
#[case::default(&["cellar-package"], LevelFilter::Warn)]
#[case::verbose(&["cellar-package", "-v"], LevelFilter::Info)]
#[case::very_verbose(&["cellar-package", "-vv"], LevelFilter::Debug)]
#[case::trace(&["cellar-package", "-vvvv"], LevelFilter::Trace)]
#[case::quiet(&["cellar-package", "--quiet"], LevelFilter::Error)]
#[case::subcommand(&["cellar-package", "build", "-v"], LevelFilter::Info)]
fn verbosity_maps_to_log_level(#[case] argv: &[&str], #[case] expected: LevelFilter) {
    let cli = Cli::parse_from(argv);
    assert_eq!(cli.log_level(), expected);
}

#[test]
fn default_build_args_match_parser_defaults() {
    let parsed = Cli::parse_from(["cellar-package"]);
    let defaults = BuildArgs::default();
    assert_eq!(parsed.build.config, defaults.config);
    assert_eq!(parsed.build.dist_dir, defaults.dist_dir);
}
