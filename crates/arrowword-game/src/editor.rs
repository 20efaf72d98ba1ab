use arrowword_core::{Clue, Position, Variant};

/// Editable form of a clue cell, as shown in the clue dialog.
///
/// Obtained from [`Game::open_clue_editor`](crate::Game::open_clue_editor),
/// edited freely by the front end and written back with
/// [`Game::apply_clue`](crate::Game::apply_clue).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueDraft {
    /// The cell being edited.
    pub pos: Position,
    /// Clue text; trimmed when applied.
    pub text: String,
    /// Arrow layout.
    pub variant: Variant,
    /// Free-form answer; normalized when applied.
    pub answer: String,
}

impl ClueDraft {
    pub(crate) fn for_cell(pos: Position, clue: Option<&Clue>) -> Self {
        match clue {
            Some(clue) => Self {
                pos,
                text: clue.text().to_owned(),
                variant: clue.variant(),
                answer: clue.answer().unwrap_or_default().to_owned(),
            },
            None => Self {
                pos,
                text: String::new(),
                variant: Variant::default(),
                answer: String::new(),
            },
        }
    }

    pub(crate) fn to_clue(&self) -> Clue {
        Clue::new(&self.text, self.variant, Some(&self.answer))
    }
}
