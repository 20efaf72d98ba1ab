//! Test utilities for building grids.
//!
//! [`GridBuilder`] places clues and letters with a fluent API so tests can
//! describe a puzzle in a few lines.
//!
//! # Example
//!
//! ```
//! use arrowword_core::{Direction, Position, Variant, testing::GridBuilder};
//!
//! let grid = GridBuilder::new()
//!     .clue((0, 0), "Capital of France", Variant::LeftThenRight, "PARIS")
//!     .letters((0, 1), Direction::Right, "PAR")
//!     .build();
//!
//! assert!(grid.is_clue(Position::new(0, 0)));
//! assert_eq!(grid.letter(Position::new(0, 3)).map(|l| l.as_char()), Some('R'));
//! ```

use std::num::NonZero;

use crate::{Cell, Clue, Direction, Grid, Letter, Position, Variant};

/// A fluent builder for test grids.
///
/// All methods panic on invalid input (off-grid positions, letters outside
/// the alphabet), using `#[track_caller]` to point at the offending test line.
#[derive(Debug, Default, Clone)]
pub struct GridBuilder {
    grid: Grid,
}

impl GridBuilder {
    /// Starts from an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a clue with an answer. An empty `answer` stores no answer.
    #[must_use]
    #[track_caller]
    pub fn clue(mut self, (row, col): (u8, u8), text: &str, variant: Variant, answer: &str) -> Self {
        let answer = (!answer.is_empty()).then_some(answer);
        self.grid.set_cell(
            Position::new(row, col),
            Cell::Clue(Clue::new(text, variant, answer)),
        );
        self
    }

    /// Places a clue without an answer.
    #[must_use]
    #[track_caller]
    pub fn blank_clue(self, pos: (u8, u8), variant: Variant) -> Self {
        self.clue(pos, "?", variant, "")
    }

    /// Enters `letters` starting at `start` and stepping in `direction`.
    ///
    /// A space skips a cell without touching it.
    ///
    /// # Panics
    ///
    /// Panics if the letters run off the grid or contain a non-alphabet character.
    #[must_use]
    #[track_caller]
    pub fn letters(mut self, (row, col): (u8, u8), direction: Direction, letters: &str) -> Self {
        let mut pos = Some(Position::new(row, col));
        for ch in letters.chars() {
            let current = pos.expect("letters run off the grid");
            if ch != ' ' {
                let letter = Letter::new(ch).expect("letter in alphabet");
                assert!(
                    self.grid.set_letter(current, Some(letter)),
                    "cannot enter a letter into clue cell {current}"
                );
            }
            pos = current.step(direction);
        }
        self
    }

    /// Assigns a solution-word index to an answer cell.
    #[must_use]
    #[track_caller]
    pub fn solution_index(mut self, (row, col): (u8, u8), index: u32) -> Self {
        let pos = Position::new(row, col);
        assert!(
            self.grid.set_solution_index(pos, NonZero::new(index)),
            "cannot number clue cell {pos}"
        );
        self
    }

    /// Returns the built grid.
    #[must_use]
    pub fn build(self) -> Grid {
        self.grid
    }
}

impl From<Grid> for GridBuilder {
    fn from(grid: Grid) -> Self {
        Self { grid }
    }
}
