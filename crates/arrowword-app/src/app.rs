//! Runs one `arrowword` invocation against the draft directory.

use std::{
    fs,
    io::{self, BufRead, Write},
};

use arrowword_game::{Game, GameError, Mode, SystemClock};
use arrowword_share::{
    Autosave, AutosaveSettings, DraftStore, FileDraftStore, ImportError, LzStringCodec,
    ShareError, decode_fragment, export_file, export_file_name, import_file, load_draft,
    share_url,
};
use chrono::Utc;

use crate::{
    cli::{Cli, CliCommand},
    driver::Driver,
    highscores, render,
};

#[derive(
    Debug, derive_more::Display, derive_more::Error, derive_more::From, derive_more::IsVariant,
)]
pub enum AppError {
    #[display("{_0}")]
    Io(io::Error),
    #[display("cannot encode puzzle: {_0}")]
    Json(serde_json::Error),
    #[display("{_0}")]
    Share(ShareError),
    #[display("cannot import file: {_0}")]
    Import(ImportError),
    #[display("{_0}")]
    Game(GameError),
    #[display("the link carries no puzzle")]
    #[from(ignore)]
    NoPayload,
}

/// Runs the parsed command line on the terminal.
pub fn run(cli: &Cli) -> Result<(), AppError> {
    let stdin = io::stdin();
    run_with(cli, stdin.lock(), io::stdout().lock())
}

/// Runs the parsed command line with explicit input and output.
pub fn run_with(cli: &Cli, input: impl BufRead, mut out: impl Write) -> Result<(), AppError> {
    let store = FileDraftStore::new(cli.data_dir());
    log::debug!("draft directory: {}", store.dir().display());

    let default = CliCommand::Edit;
    let command = cli.command.as_ref().unwrap_or(&default);
    match command {
        CliCommand::Edit => interactive(store, Mode::Edit, input, out),
        CliCommand::Play => interactive(store, Mode::Play, input, out),
        CliCommand::New => {
            let mut autosave = Autosave::new(store, AutosaveSettings::default());
            autosave.discard();
            let game = Game::new(SystemClock);
            Driver::new(game, autosave, out).run(input)?;
            Ok(())
        }
        CliCommand::Show => {
            let game = load_game(&store);
            write!(out, "{}", render::render(&game))?;
            Ok(())
        }
        CliCommand::Share { lock, base } => {
            let grid = load_draft(&store).unwrap_or_default();
            writeln!(out, "{}", share_url(base, &grid, *lock, &LzStringCodec)?)?;
            Ok(())
        }
        CliCommand::Open { link } => {
            let shared = decode_fragment(link, &LzStringCodec)?.ok_or(AppError::NoPayload)?;
            log::info!("opened shared puzzle (locked: {})", shared.locked);
            let mut game = Game::new(SystemClock);
            game.load_shared(shared.grid, shared.locked);
            let mut autosave = Autosave::new(store, AutosaveSettings::default());
            if !shared.locked {
                autosave.save_now(game.grid());
            }
            Driver::new(game, autosave, out).run(input)?;
            Ok(())
        }
        CliCommand::Export { path } => {
            let grid = load_draft(&store).unwrap_or_default();
            let now = Utc::now();
            let path = path.clone().unwrap_or_else(|| export_file_name(now).into());
            fs::write(&path, export_file(&grid, now)?)?;
            log::info!("exported draft to {}", path.display());
            writeln!(out, "exported to {}", path.display())?;
            Ok(())
        }
        CliCommand::Import { path } => {
            let grid = import_file(&fs::read_to_string(path)?)?;
            let mut game = Game::new(SystemClock);
            game.load_grid(grid);
            let mut autosave = Autosave::new(store, AutosaveSettings::default());
            autosave.save_now(game.grid());
            if let Some(warning) = autosave.take_warning() {
                writeln!(out, "warning: {warning}")?;
            }
            log::info!("imported {}", path.display());
            writeln!(out, "imported {}", path.display())?;
            Ok(())
        }
        CliCommand::Clear => {
            let mut autosave = Autosave::new(store, AutosaveSettings::default());
            autosave.discard();
            writeln!(out, "draft cleared")?;
            Ok(())
        }
        CliCommand::Serve { addr } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(highscores::serve(*addr))?;
            Ok(())
        }
    }
}

fn load_game(store: &impl DraftStore) -> Game<SystemClock> {
    let mut game = Game::new(SystemClock);
    if let Some(grid) = load_draft(store) {
        game.load_grid(grid);
    }
    game
}

fn interactive(
    store: FileDraftStore,
    mode: Mode,
    input: impl BufRead,
    out: impl Write,
) -> Result<(), AppError> {
    let mut game = load_game(&store);
    game.set_mode(mode)?;
    let autosave = Autosave::new(store, AutosaveSettings::default());
    Driver::new(game, autosave, out).run(input)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use arrowword_core::{Position, Variant, testing::GridBuilder};
    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    fn temp_dir() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("data");
        (temp, dir)
    }

    fn run_args(dir: &Path, args: &[&str], input: &str) -> Result<String, AppError> {
        let mut argv = vec!["arrowword", "--data-dir", dir.to_str().unwrap()];
        argv.extend_from_slice(args);
        let cli = Cli::parse_from(argv);
        let mut out = Vec::new();
        run_with(&cli, input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn draft(dir: &Path) -> Option<arrowword_core::Grid> {
        load_draft(&FileDraftStore::new(dir))
    }

    #[test]
    fn test_edit_session_saves_draft() {
        let (_temp, dir) = temp_dir();
        run_args(&dir, &["edit"], "clue 0 0 right PARIS Capital of France\nquit\n").unwrap();
        let grid = draft(&dir).unwrap();
        assert_eq!(grid.clue(Position::new(0, 0)).unwrap().answer(), Some("PARIS"));
    }

    #[test]
    fn test_share_and_open() {
        let (_temp, dir) = temp_dir();
        run_args(&dir, &[], "clue 0 0 right AB Test\n").unwrap();

        let url = run_args(&dir, &["share", "--base", "https://x.test/"], "").unwrap();
        assert!(url.starts_with("https://x.test/#p="));
        assert!(!url.contains("lock=1"));
        let locked = run_args(&dir, &["share", "--lock"], "").unwrap();
        assert!(locked.trim_end().ends_with("&lock=1"));

        run_args(&dir, &["clear"], "").unwrap();
        assert!(draft(&dir).is_none());

        // Locked links are never written to the draft.
        run_args(&dir, &["open", locked.trim_end()], "quit\n").unwrap();
        assert!(draft(&dir).is_none());

        run_args(&dir, &["open", url.trim_end()], "quit\n").unwrap();
        assert!(draft(&dir).unwrap().is_clue(Position::new(0, 0)));
    }

    #[test]
    fn test_open_without_payload() {
        let (_temp, dir) = temp_dir();
        let err = run_args(&dir, &["open", "https://x.test/#other=1"], "").unwrap_err();
        assert!(err.is_no_payload());
        let err = run_args(&dir, &["open", "#p=%%%"], "").unwrap_err();
        assert!(err.is_share());
    }

    #[test]
    fn test_export_import() {
        let (_temp, dir) = temp_dir();
        let grid = GridBuilder::new()
            .clue((0, 0), "Capital of France", Variant::LeftThenRight, "PARIS")
            .build();
        let text = export_file(&grid, Utc::now()).unwrap();
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("puzzle.json");
        fs::write(&file, text).unwrap();

        run_args(&dir, &["import", file.to_str().unwrap()], "").unwrap();
        assert_eq!(draft(&dir).unwrap(), grid);

        let exported = dir.join("out.json");
        run_args(&dir, &["export", exported.to_str().unwrap()], "").unwrap();
        let back = import_file(&fs::read_to_string(&exported).unwrap()).unwrap();
        assert_eq!(back, grid);

        let bad = dir.join("bad.json");
        fs::write(&bad, r#"{"version":2,"n":12,"grid":[]}"#).unwrap();
        let err = run_args(&dir, &["import", bad.to_str().unwrap()], "").unwrap_err();
        assert!(err.is_import());
        assert_eq!(draft(&dir).unwrap(), grid);
    }
}
