use crate::{Direction, Position, normalize_answer};

/// Arrow layout of a clue cell.
///
/// The variant decides where the clue's answer run starts relative to the
/// clue cell and which way it extends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Variant {
    /// Clue on the left, answer runs to the right.
    #[default]
    LeftThenRight,
    /// Clue above, answer runs down.
    AboveThenDown,
    /// Clue on the left, answer starts to the right and runs down.
    LeftThenDown,
}

impl Variant {
    /// All variants in editor order.
    pub const ALL: [Self; 3] = [Self::LeftThenRight, Self::AboveThenDown, Self::LeftThenDown];

    /// Returns the direction the answer run extends in.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::LeftThenRight => Direction::Right,
            Self::AboveThenDown | Self::LeftThenDown => Direction::Down,
        }
    }

    /// Returns the first answer position for a clue at `origin`, or `None` if
    /// it would fall off the grid.
    #[must_use]
    pub fn start(self, origin: Position) -> Option<Position> {
        match self {
            Self::LeftThenRight | Self::LeftThenDown => origin.right(),
            Self::AboveThenDown => origin.down(),
        }
    }
}

/// A clue stored in a clue cell.
///
/// The text is trimmed and the answer normalized (see [`normalize_answer`])
/// on construction; an answer that normalizes to nothing is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    text: String,
    variant: Variant,
    answer: Option<String>,
}

impl Clue {
    /// Creates a clue.
    #[must_use]
    pub fn new(text: &str, variant: Variant, answer: Option<&str>) -> Self {
        let answer = answer.map(normalize_answer).filter(|a| !a.is_empty());
        Self {
            text: text.trim().to_owned(),
            variant,
            answer,
        }
    }

    /// Returns the clue text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the arrow layout.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Returns the normalized answer, if one was given.
    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_start_and_direction() {
        let origin = Position::new(4, 4);
        assert_eq!(Variant::LeftThenRight.start(origin), Some(Position::new(4, 5)));
        assert_eq!(Variant::LeftThenRight.direction(), Direction::Right);
        assert_eq!(Variant::AboveThenDown.start(origin), Some(Position::new(5, 4)));
        assert_eq!(Variant::AboveThenDown.direction(), Direction::Down);
        assert_eq!(Variant::LeftThenDown.start(origin), Some(Position::new(4, 5)));
        assert_eq!(Variant::LeftThenDown.direction(), Direction::Down);
    }

    #[test]
    fn test_variant_start_off_grid() {
        assert_eq!(Variant::LeftThenRight.start(Position::new(0, 11)), None);
        assert_eq!(Variant::LeftThenDown.start(Position::new(0, 11)), None);
        assert_eq!(Variant::AboveThenDown.start(Position::new(11, 0)), None);
    }

    #[test]
    fn test_clue_normalizes_inputs() {
        let clue = Clue::new("  Capital of France ", Variant::LeftThenRight, Some(" paris"));
        assert_eq!(clue.text(), "Capital of France");
        assert_eq!(clue.answer(), Some("PARIS"));

        let clue = Clue::new("Nothing", Variant::AboveThenDown, Some(" 42 "));
        assert_eq!(clue.answer(), None);
    }
}
