//! Arrowword puzzle state and session flow.
//!
//! [`Game`] owns the live grid together with everything derived from it
//! (segments, expectations, progress), the edit/play [`Mode`], the input
//! [`Cursor`], the editing tools and the timed [`Session`]. Front ends forward
//! user input to it and read back state and [`GameEvent`]s.
//!
//! Every grid mutation builds a new snapshot and recomputes the derived data
//! from it, so the grid and its derived views can never drift apart.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use arrowword_core::{Position, Variant};
//! use arrowword_game::{ClueDraft, Game, GameEvent, ManualClock, Mode};
//!
//! let clock = ManualClock::new();
//! let mut game = Game::new(clock.clone());
//!
//! let mut draft = game.open_clue_editor(Position::new(0, 0)).unwrap();
//! draft.text = "Capital of France".into();
//! draft.answer = "Paris".into();
//! game.apply_clue(&draft).unwrap();
//!
//! game.set_mode(Mode::Play).unwrap();
//! game.begin_countdown().unwrap();
//! clock.advance(Duration::from_millis(6_500));
//! game.tick();
//!
//! game.click(Position::new(0, 1)).unwrap();
//! for ch in "paris".chars() {
//!     game.enter_letter(ch).unwrap();
//! }
//! assert!(game.progress().all_correct());
//! assert!(game.take_events().iter().any(|e| e.is_won()));
//! ```

pub use self::{
    clock::*, cursor::*, editor::*, error::*, event::*, game::*, session::*, settings::*,
};

mod clock;
mod cursor;
mod editor;
mod error;
mod event;
mod game;
mod session;
mod settings;
