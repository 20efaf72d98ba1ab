//! Arrowword terminal application.
//!
//! Builds and solves 12x12 arrowword puzzles from the command line.

use std::process::ExitCode;

use arrowword_app::{app, cli::Cli, version::build_version};
use clap::Parser;

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();
    log::info!("arrowword {}", build_version());

    let cli = Cli::parse();
    match app::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
