//! Core data types for arrowword puzzles.
//!
//! An arrowword (Swedish-style crossword) keeps its clues inside the grid: a
//! clue cell holds the clue text and an arrow pointing at the run of answer
//! cells it governs. This crate provides the fixed-size [`Grid`] model and the
//! small value types it is built from.
//!
//! # Overview
//!
//! - [`Position`] - a bounds-checked `(row, col)` coordinate on the 12×12 grid
//! - [`Direction`] - the direction an answer run extends in
//! - [`Letter`] - a single letter of the puzzle alphabet (`A`-`Z`, `Ä`, `Ö`, `Ü`, `ß`)
//! - [`Clue`] and [`Variant`] - clue text, arrow layout and optional answer
//! - [`Cell`] and [`AnswerCell`] - the two kinds of grid cells
//! - [`Grid`] - the 12×12 row-major cell matrix
//!
//! # Examples
//!
//! ```
//! use arrowword_core::{Cell, Clue, Grid, Position, Variant};
//!
//! let mut grid = Grid::new();
//! let clue = Clue::new("Capital of France", Variant::LeftThenRight, Some("Paris"));
//! grid.set_cell(Position::new(0, 0), Cell::Clue(clue));
//!
//! assert!(grid.cell(Position::new(0, 0)).is_clue());
//! assert_eq!(grid.clue(Position::new(0, 0)).and_then(|c| c.answer()), Some("PARIS"));
//! ```

pub use self::{cell::*, clue::*, grid::*, letter::*, position::*};

mod cell;
mod clue;
mod grid;
mod letter;
mod position;
pub mod testing;
