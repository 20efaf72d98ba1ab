//! Plain-text rendering of a puzzle.

use std::{collections::HashMap, fmt::Write as _};

use arrowword_core::{Cell, Direction, GRID_SIZE, Position, Variant};
use arrowword_game::{Clock, CountdownDisplay, Game, Mode, format_elapsed};

const EMPTY: char = '·';

fn variant_arrow(variant: Variant) -> char {
    match variant {
        Variant::LeftThenRight => '→',
        Variant::AboveThenDown => '↓',
        Variant::LeftThenDown => '↳',
    }
}

fn start_hint(direction: Direction) -> char {
    match direction {
        Direction::Right => '›',
        Direction::Down => '⌄',
    }
}

/// Renders the grid, the clue list and the status line.
#[must_use]
pub fn render<C: Clock>(game: &Game<C>) -> String {
    let mut out = String::new();
    render_status(&mut out, game);
    render_grid(&mut out, game);
    render_clues(&mut out, game);
    out
}

fn render_status<C: Clock>(out: &mut String, game: &Game<C>) {
    let mode = match (game.mode(), game.is_locked()) {
        (Mode::Edit, _) => "edit",
        (Mode::Play, false) => "play",
        (Mode::Play, true) => "play (solve only)",
    };
    let _ = write!(out, "mode: {mode}  time: {}", format_elapsed(game.elapsed()));
    if game.mode().is_edit() && game.solution_mode() {
        let _ = write!(out, "  numbering: next {}", game.next_solution_index());
    }
    out.push('\n');

    if game.session().phase().is_awaiting_start() && game.mode().is_play() {
        out.push_str("type `start` to begin\n");
    }
    match game.countdown() {
        Some(CountdownDisplay::Number(n)) => {
            let _ = writeln!(out, "{n}...");
        }
        Some(CountdownDisplay::Go) => out.push_str("go!\n"),
        None => {}
    }

    let word = game.solution_word();
    if !word.is_empty() {
        let word: String = word
            .iter()
            .map(|letter| letter.map_or('_', |l| l.as_char()))
            .collect();
        let _ = writeln!(out, "solution word: {word}");
    }
}

fn render_grid<C: Clock>(out: &mut String, game: &Game<C>) {
    let grid = game.grid();
    let hints: HashMap<Position, Direction> = game.segments().arrow_starts().collect();
    let cursor = game.cursor_position();

    out.push_str("   ");
    for col in 0..GRID_SIZE {
        let _ = write!(out, "{col:^3}");
    }
    out.push('\n');

    for (row, cells) in grid.rows().enumerate() {
        let _ = write!(out, "{row:>2} ");
        for (col, cell) in cells.iter().enumerate() {
            let pos = Position::from_index(row * GRID_SIZE + col);
            let (left, right) = if cursor == Some(pos) {
                ('[', ']')
            } else if game.is_wrong(pos) {
                ('!', '!')
            } else {
                (' ', ' ')
            };
            let mark = match cell {
                Cell::Clue(clue) => variant_arrow(clue.variant()),
                Cell::Answer(answer) => match (answer.letter, hints.get(&pos)) {
                    (Some(letter), _) => letter.as_char(),
                    (None, Some(&direction)) => start_hint(direction),
                    (None, None) => EMPTY,
                },
            };
            out.push(left);
            out.push(mark);
            out.push(right);
        }
        out.push('\n');
    }
}

fn render_clues<C: Clock>(out: &mut String, game: &Game<C>) {
    if game.grid().clues().next().is_none() {
        return;
    }
    if game.clues_hidden() {
        out.push_str("clues are hidden until the timer starts\n");
        return;
    }
    for segment in game.segments() {
        let Some(clue) = game.grid().clue(segment.origin()) else {
            continue;
        };
        let origin = segment.origin();
        let solved = if game.progress().is_solved(segment.id()) {
            " ✓"
        } else {
            ""
        };
        let _ = write!(
            out,
            "{},{} {} {} ({}){solved}",
            origin.row(),
            origin.col(),
            variant_arrow(clue.variant()),
            clue.text(),
            segment.len(),
        );
        if game.mode().is_edit()
            && let Some(answer) = clue.answer()
        {
            let _ = write!(out, " = {answer}");
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use arrowword_core::testing::GridBuilder;
    use arrowword_game::ManualClock;

    use super::*;

    fn game() -> (Game<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let mut game = Game::new(clock.clone());
        game.load_grid(
            GridBuilder::new()
                .clue((0, 0), "Capital of France", Variant::LeftThenRight, "PARIS")
                .blank_clue((0, 6), Variant::AboveThenDown)
                .build(),
        );
        (game, clock)
    }

    // row label plus the first five cells
    fn row_start(out: &str, line: usize) -> String {
        out.lines().nth(line).unwrap().chars().take(18).collect()
    }

    #[test]
    fn test_edit_view_shows_clues_and_answers() {
        let (game, _clock) = game();
        let out = render(&game);
        assert!(out.starts_with("mode: edit  time: 0:00.00\n"));
        assert_eq!(row_start(&out, 2), " 0  →  ›  ·  ·  · ");
        assert!(out.contains("0,0 → Capital of France (5) = PARIS\n"));
        assert!(out.contains("0,6 ↓ ? (11)\n"));
    }

    #[test]
    fn test_play_view_hides_clues_until_start() {
        let (mut game, clock) = game();
        game.set_mode(Mode::Play).unwrap();
        let out = render(&game);
        assert!(out.contains("type `start` to begin"));
        assert!(out.contains("clues are hidden"));
        assert!(!out.contains("Capital"));

        game.begin_countdown().unwrap();
        clock.advance(Duration::from_millis(1_200));
        assert!(render(&game).contains("4..."));

        clock.advance(Duration::from_millis(5_300));
        game.tick();
        game.click(Position::new(0, 1)).unwrap();
        for ch in "PX".chars() {
            game.enter_letter(ch).unwrap();
        }
        let out = render(&game);
        assert_eq!(row_start(&out, 2), " 0  →  P  X [·] · ");
        assert!(out.contains("0,0 → Capital of France (5)\n"));
        assert!(!out.contains("= PARIS"));
    }

    #[test]
    fn test_wrong_cells_and_solution_word() {
        let (mut game, _clock) = game();
        game.set_solution_mode(true);
        game.click(Position::new(0, 2)).unwrap();
        game.click(Position::new(0, 1)).unwrap();
        let out = render(&game);
        assert!(out.contains("numbering: next 3"));
        assert!(out.contains("solution word: __\n"));

        let grid = GridBuilder::from(game.grid().clone())
            .letters((0, 1), Direction::Right, "PXRIS")
            .build();
        game.load_grid(grid);
        let out = render(&game);
        assert!(out.contains("solution word: XP\n"));
        assert_eq!(row_start(&out, 3), " 0  →  P !X! R  I ");
    }
}
