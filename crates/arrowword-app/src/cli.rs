//! Command-line arguments.

use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, Subcommand};

use crate::highscores::DEFAULT_ADDR;

/// Base URL used for share links when none is given.
pub const DEFAULT_SHARE_BASE: &str = "https://arrowword.example/";

#[derive(Debug, Parser)]
#[command(name = "arrowword", version, about = "Build and solve 12x12 arrowword puzzles")]
pub struct Cli {
    /// Directory holding the autosaved draft.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Start an interactive session in edit mode (the default).
    Edit,
    /// Start an interactive session in play mode.
    Play,
    /// Discard the draft and start from an empty grid.
    New,
    /// Print the current draft.
    Show,
    /// Print a share link for the current draft.
    Share {
        /// Produce a solve-only link with the letters stripped.
        #[arg(long)]
        lock: bool,
        #[arg(long, default_value = DEFAULT_SHARE_BASE)]
        base: String,
    },
    /// Open a share link (a full URL or just its fragment).
    Open { link: String },
    /// Export the current draft as a JSON file.
    Export {
        /// Output file; defaults to a timestamped name in the current directory.
        path: Option<PathBuf>,
    },
    /// Import a previously exported JSON file as the new draft.
    Import { path: PathBuf },
    /// Delete the draft.
    Clear,
    /// Run the highscore placeholder server.
    Serve {
        #[arg(long, default_value_t = DEFAULT_ADDR)]
        addr: SocketAddr,
    },
}

impl Cli {
    /// Returns the draft directory: `--data-dir`, else the platform data
    /// directory, else `.arrowword` in the working directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir().map_or_else(|| PathBuf::from(".arrowword"), |d| d.join("arrowword"))
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::parse_from(["arrowword", "share", "--lock", "--data-dir", "/tmp/aw"]);
        assert_eq!(cli.data_dir(), PathBuf::from("/tmp/aw"));
        assert!(matches!(
            cli.command,
            Some(CliCommand::Share { lock: true, ref base }) if base == DEFAULT_SHARE_BASE
        ));

        let cli = Cli::parse_from(["arrowword"]);
        assert!(cli.command.is_none());

        let cli = Cli::parse_from(["arrowword", "serve", "--addr", "0.0.0.0:8080"]);
        assert!(matches!(cli.command, Some(CliCommand::Serve { addr }) if addr.port() == 8080));
    }
}
