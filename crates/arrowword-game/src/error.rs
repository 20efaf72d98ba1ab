/// Errors reported by [`Game`](crate::Game) operations.
///
/// None of these are fatal. Front ends typically ignore them, which turns the
/// rejected input into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameError {
    /// The puzzle was opened from a solve-only link.
    #[display("the puzzle is locked for solving")]
    Locked,
    /// The action is only available in edit mode.
    #[display("not in edit mode")]
    NotEditing,
    /// The action is only available in play mode.
    #[display("not in play mode")]
    NotPlaying,
    /// Input arrived while the start prompt or countdown was showing.
    #[display("the session has not started")]
    NotStarted,
    /// The session is not waiting for the start button.
    #[display("the session is not awaiting start")]
    NotAwaitingStart,
    /// The character is not part of the puzzle alphabet.
    #[display("{ch:?} is not a puzzle letter")]
    InvalidLetter {
        /// Rejected character.
        ch: char,
    },
}

/// The effect an input had on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum InputOperation {
    /// Nothing changed.
    NoOp,
    /// A value was set.
    Set,
    /// A value was removed.
    Removed,
}
