//! CLI argument definitions for the cellar launcher.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use log::LevelFilter;

/// Run the editor or player inside the cellar Wine prefix.
#[derive(Parser, Debug)]
#[command(name = "cellar-launch")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Open the editor:\n",
    "    $ cellar-launch editor\n\n",
    "  Join a game from a protocol URI:\n",
    "    $ cellar-launch player 'roblox-player:1+launchmode:play'",
))]
pub struct Cli {
    /// Wine prefix to use [default: <data dir>/cellar/wineprefix].
    #[arg(long, value_name = "DIR", global = true)]
    pub prefix: Option<Utf8PathBuf>,

    /// Directory holding versioned installs [default: inside the prefix].
    #[arg(long, value_name = "DIR", global = true)]
    pub versions_dir: Option<Utf8PathBuf>,

    /// Wine binary to run.
    #[arg(long, value_name = "CMD", default_value = crate::prefix::DEFAULT_WINE, global = true)]
    pub wine: String,

    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet", global = true)]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Application to launch.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Returns the log filter implied by the verbosity flags.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Launchable applications.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the editor, optionally with a protocol URI.
    Editor {
        /// Protocol URI handed to the launcher.
        uri: Option<String>,
    },

    /// Start the player with a protocol URI.
    Player {
        /// Protocol URI handed to the launcher.
        uri: String,
    },
}
