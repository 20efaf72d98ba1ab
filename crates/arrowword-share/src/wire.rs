use std::num::NonZero;

use arrowword_core::{AnswerCell, CELL_COUNT, Cell, Clue, Grid, GridShapeError, Letter, Variant};
use serde::{Deserialize, Serialize};

/// JSON form of a cell, shared by links, files and drafts.
///
/// Expectations are never written; they are derived again after loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireCell {
    /// Cell kind.
    #[serde(rename = "type")]
    pub kind: WireCellKind,
    /// Clue of a clue cell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<WireClue>,
    /// Entered letter; empty for none.
    #[serde(default)]
    pub letter: Option<String>,
    /// Solution-word index.
    #[serde(default)]
    pub solution_index: Option<u32>,
}

/// Kind of a [`WireCell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireCellKind {
    /// A clue cell.
    Clue,
    /// An answer cell; unknown kinds read as this.
    #[serde(other)]
    Empty,
}

/// JSON form of a clue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireClue {
    /// Clue text.
    pub text: String,
    /// Arrow layout.
    pub variant: WireVariant,
    /// Normalized answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

/// JSON names of [`Variant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WireVariant {
    /// [`Variant::LeftThenRight`]
    LeftClueRight,
    /// [`Variant::AboveThenDown`]
    AboveClueDown,
    /// [`Variant::LeftThenDown`]
    LeftClueDown,
}

impl From<Variant> for WireVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::LeftThenRight => Self::LeftClueRight,
            Variant::AboveThenDown => Self::AboveClueDown,
            Variant::LeftThenDown => Self::LeftClueDown,
        }
    }
}

impl From<WireVariant> for Variant {
    fn from(variant: WireVariant) -> Self {
        match variant {
            WireVariant::LeftClueRight => Self::LeftThenRight,
            WireVariant::AboveClueDown => Self::AboveThenDown,
            WireVariant::LeftClueDown => Self::LeftThenDown,
        }
    }
}

/// Errors raised when wire cells do not describe a valid grid.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ShapeError {
    /// Wrong number of rows or columns.
    #[display("{_0}")]
    #[from]
    Grid(GridShapeError),
    /// A letter is not a single puzzle letter.
    #[display("invalid letter {letter:?}")]
    InvalidLetter {
        /// Offending value.
        letter: String,
    },
    /// A clue cell carries no clue.
    #[display("clue cell without clue")]
    MissingClue,
    /// A solution index larger than the number of cells.
    #[display("solution index {index} out of range")]
    SolutionIndex {
        /// Offending value.
        index: u32,
    },
}

impl From<&Cell> for WireCell {
    fn from(cell: &Cell) -> Self {
        match cell {
            Cell::Answer(answer) => Self {
                kind: WireCellKind::Empty,
                clue: None,
                letter: Some(answer.letter.map(|l| l.to_string()).unwrap_or_default()),
                solution_index: answer.solution_index.map(NonZero::get),
            },
            Cell::Clue(clue) => Self {
                kind: WireCellKind::Clue,
                clue: Some(WireClue {
                    text: clue.text().to_owned(),
                    variant: clue.variant().into(),
                    answer: clue.answer().map(str::to_owned),
                }),
                letter: Some(String::new()),
                solution_index: None,
            },
        }
    }
}

impl TryFrom<WireCell> for Cell {
    type Error = ShapeError;

    fn try_from(cell: WireCell) -> Result<Self, Self::Error> {
        match cell.kind {
            WireCellKind::Clue => {
                let clue = cell.clue.ok_or(ShapeError::MissingClue)?;
                Ok(Self::Clue(Clue::new(
                    &clue.text,
                    clue.variant.into(),
                    clue.answer.as_deref(),
                )))
            }
            WireCellKind::Empty => {
                let letter = match cell.letter.as_deref().map(str::trim) {
                    None | Some("") => None,
                    Some(text) => Some(parse_letter(text)?),
                };
                let solution_index = match cell.solution_index {
                    Some(index) if usize::try_from(index).is_ok_and(|i| i > CELL_COUNT) => {
                        return Err(ShapeError::SolutionIndex { index });
                    }
                    index => index.and_then(NonZero::new),
                };
                Ok(Self::Answer(AnswerCell {
                    letter,
                    solution_index,
                    expected: None,
                }))
            }
        }
    }
}

fn parse_letter(text: &str) -> Result<Letter, ShapeError> {
    let mut chars = text.chars();
    match (chars.next().and_then(Letter::new), chars.next()) {
        (Some(letter), None) => Ok(letter),
        _ => Err(ShapeError::InvalidLetter {
            letter: text.to_owned(),
        }),
    }
}

/// Converts a grid into nested wire rows.
#[must_use]
pub fn grid_to_wire(grid: &Grid) -> Vec<Vec<WireCell>> {
    grid.rows()
        .map(|row| row.iter().map(WireCell::from).collect())
        .collect()
}

/// Builds a grid from nested wire rows.
///
/// # Errors
///
/// Returns [`ShapeError`] unless the rows form a 12×12 grid of valid cells.
pub fn grid_from_wire(rows: Vec<Vec<WireCell>>) -> Result<Grid, ShapeError> {
    let rows = rows
        .into_iter()
        .map(|row| row.into_iter().map(Cell::try_from).collect::<Result<Vec<_>, _>>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Grid::from_rows(rows)?)
}
