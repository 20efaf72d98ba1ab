//! Derived puzzle layout: answer segments, expectations and progress.
//!
//! Everything in this crate is a pure function of a [`Grid`] snapshot.
//! Callers rebuild the derived data after each mutation instead of patching
//! it in place:
//!
//! 1. [`build_segments`] scans the grid for clue cells and walks each clue's
//!    answer run.
//! 2. [`map_expectations`] distributes each clue's answer over its run.
//! 3. [`Progress::derive`] classifies segments as complete or solved, flags
//!    wrong cells and decides global correctness.
//!
//! # Examples
//!
//! ```
//! use arrowword_core::{Direction, Position, Variant, testing::GridBuilder};
//! use arrowword_layout::{Progress, build_segments, map_expectations};
//!
//! let grid = GridBuilder::new()
//!     .clue((0, 0), "Capital of France", Variant::LeftThenRight, "PARIS")
//!     .blank_clue((0, 6), Variant::AboveThenDown)
//!     .letters((0, 1), Direction::Right, "PARIS")
//!     .build();
//!
//! let segments = build_segments(&grid);
//! let grid = map_expectations(&grid, &segments);
//! let progress = Progress::derive(&grid, &segments);
//!
//! let paris = segments.at_origin(Position::new(0, 0)).unwrap();
//! assert_eq!(paris.len(), 5);
//! assert!(progress.is_solved(paris.id()));
//! assert!(progress.all_correct());
//! ```
//!
//! [`Grid`]: arrowword_core::Grid

pub use self::{expectation::*, progress::*, segment::*, solution_word::*};

mod expectation;
mod progress;
mod segment;
mod solution_word;
