use std::num::NonZero;

use crate::{Clue, Letter};

/// One cell of a grid.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Cell {
    /// An answer slot that receives a letter.
    Answer(AnswerCell),
    /// A clue holder; it never carries a letter.
    Clue(Clue),
}

impl Default for Cell {
    fn default() -> Self {
        Self::Answer(AnswerCell::default())
    }
}

impl Cell {
    /// Returns the answer slot, if this is one.
    #[must_use]
    pub fn as_answer(&self) -> Option<&AnswerCell> {
        match self {
            Self::Answer(answer) => Some(answer),
            Self::Clue(_) => None,
        }
    }

    /// Returns the mutable answer slot, if this is one.
    pub fn as_answer_mut(&mut self) -> Option<&mut AnswerCell> {
        match self {
            Self::Answer(answer) => Some(answer),
            Self::Clue(_) => None,
        }
    }

    /// Returns the clue, if this is a clue cell.
    #[must_use]
    pub fn as_clue(&self) -> Option<&Clue> {
        match self {
            Self::Answer(_) => None,
            Self::Clue(clue) => Some(clue),
        }
    }

    /// Returns the entered letter; clue cells have none.
    #[must_use]
    pub fn letter(&self) -> Option<Letter> {
        self.as_answer().and_then(|a| a.letter)
    }

    /// Returns the expected letter; clue cells have none.
    #[must_use]
    pub fn expected(&self) -> Option<Letter> {
        self.as_answer().and_then(|a| a.expected)
    }
}

/// An answer slot.
///
/// `expected` is derived data: it is recomputed from the clue answers
/// whenever the grid structure changes and is never persisted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnswerCell {
    /// The letter entered by the player.
    pub letter: Option<Letter>,
    /// Position of this cell within the solution word (1-based).
    pub solution_index: Option<NonZero<u32>>,
    /// The letter this cell must hold to be correct.
    pub expected: Option<Letter>,
}

impl AnswerCell {
    /// Returns an answer slot holding `letter` and nothing else.
    #[must_use]
    pub fn with_letter(letter: Letter) -> Self {
        Self {
            letter: Some(letter),
            ..Self::default()
        }
    }
}
