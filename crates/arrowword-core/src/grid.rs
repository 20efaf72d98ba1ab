use std::{num::NonZero, ops::Index};

use crate::{AnswerCell, CELL_COUNT, Cell, Clue, GRID_SIZE, Letter, Position};

/// The 12×12 puzzle grid.
///
/// Cells are stored row-major. The dimensions are fixed: every constructor
/// yields exactly [`GRID_SIZE`] rows of [`GRID_SIZE`] cells.
///
/// Mutating methods take `&mut self`; callers that want snapshot semantics
/// clone the grid first or use [`Grid::with_cell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Box<[Cell]>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Creates a grid of empty answer cells.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::default(); CELL_COUNT].into_boxed_slice(),
        }
    }

    /// Builds a grid from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`GridShapeError`] unless there are exactly [`GRID_SIZE`] rows
    /// of exactly [`GRID_SIZE`] cells.
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Result<Self, GridShapeError>
    where
        R: IntoIterator<Item = Cell>,
    {
        let mut cells = Vec::with_capacity(CELL_COUNT);
        let mut row_count = 0;
        for (row, row_cells) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(row_cells);
            let cols = cells.len() - before;
            if cols != GRID_SIZE {
                return Err(GridShapeError::WrongColumnCount { row, cols });
            }
            row_count += 1;
        }
        if row_count != GRID_SIZE {
            return Err(GridShapeError::WrongRowCount { rows: row_count });
        }
        Ok(Self {
            cells: cells.into_boxed_slice(),
        })
    }

    /// Returns the cell at `pos`.
    #[must_use]
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.index()]
    }

    /// Returns the mutable cell at `pos`.
    pub fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        &mut self.cells[pos.index()]
    }

    /// Replaces the cell at `pos`.
    pub fn set_cell(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    /// Returns a copy of this grid with the cell at `pos` replaced.
    #[must_use]
    pub fn with_cell(&self, pos: Position, cell: Cell) -> Self {
        let mut next = self.clone();
        next.set_cell(pos, cell);
        next
    }

    /// Returns the clue at `pos`, if it is a clue cell.
    #[must_use]
    pub fn clue(&self, pos: Position) -> Option<&Clue> {
        self.cell(pos).as_clue()
    }

    /// Returns `true` if `pos` holds a clue.
    #[must_use]
    pub fn is_clue(&self, pos: Position) -> bool {
        self.cell(pos).is_clue()
    }

    /// Returns the letter at `pos`.
    #[must_use]
    pub fn letter(&self, pos: Position) -> Option<Letter> {
        self.cell(pos).letter()
    }

    /// Returns the expected letter at `pos`.
    #[must_use]
    pub fn expected(&self, pos: Position) -> Option<Letter> {
        self.cell(pos).expected()
    }

    /// Sets or clears the letter at `pos`.
    ///
    /// Returns `false` (and changes nothing) if `pos` is a clue cell.
    pub fn set_letter(&mut self, pos: Position, letter: Option<Letter>) -> bool {
        match self.cell_mut(pos).as_answer_mut() {
            Some(answer) => {
                answer.letter = letter;
                true
            }
            None => false,
        }
    }

    /// Sets or clears the solution-word index at `pos`.
    ///
    /// Returns `false` (and changes nothing) if `pos` is a clue cell.
    pub fn set_solution_index(&mut self, pos: Position, index: Option<NonZero<u32>>) -> bool {
        match self.cell_mut(pos).as_answer_mut() {
            Some(answer) => {
                answer.solution_index = index;
                true
            }
            None => false,
        }
    }

    /// Iterates over all cells with their positions in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        Position::ALL.iter().copied().zip(self.cells.iter())
    }

    /// Iterates over the answer cells with their positions in row-major order.
    pub fn answers(&self) -> impl Iterator<Item = (Position, &AnswerCell)> + '_ {
        self.iter()
            .filter_map(|(pos, cell)| cell.as_answer().map(|answer| (pos, answer)))
    }

    /// Iterates over the answer cells mutably.
    pub fn answers_mut(&mut self) -> impl Iterator<Item = &mut AnswerCell> + '_ {
        self.cells.iter_mut().filter_map(Cell::as_answer_mut)
    }

    /// Iterates over the clue cells with their positions in row-major order.
    pub fn clues(&self) -> impl Iterator<Item = (Position, &Clue)> + '_ {
        self.iter()
            .filter_map(|(pos, cell)| cell.as_clue().map(|c| (pos, c)))
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(GRID_SIZE)
    }

    /// Clears every entered letter, keeping structure and expectations.
    pub fn clear_letters(&mut self) {
        for answer in self.answers_mut() {
            answer.letter = None;
        }
    }

    /// Returns a copy of this grid without any entered letters.
    #[must_use]
    pub fn without_letters(&self) -> Self {
        let mut next = self.clone();
        next.clear_letters();
        next
    }

    /// Returns a copy of this grid with every expectation cleared.
    #[must_use]
    pub fn without_expectations(&self) -> Self {
        let mut next = self.clone();
        for answer in next.answers_mut() {
            answer.expected = None;
        }
        next
    }
}

impl Index<Position> for Grid {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Self::Output {
        self.cell(pos)
    }
}

/// Errors raised when building a [`Grid`] from nested rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridShapeError {
    /// The number of rows differs from [`GRID_SIZE`].
    #[display("expected 12 rows, found {rows}")]
    WrongRowCount {
        /// Rows found.
        rows: usize,
    },
    /// A row's length differs from [`GRID_SIZE`].
    #[display("expected 12 cells in row {row}, found {cols}")]
    WrongColumnCount {
        /// Offending row.
        row: usize,
        /// Cells found in that row.
        cols: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Variant;

    fn letter(ch: char) -> Letter {
        Letter::new(ch).unwrap()
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        assert_eq!(grid.rows().len(), GRID_SIZE);
        assert!(grid.rows().all(|row| row.len() == GRID_SIZE));
        assert_eq!(grid.answers().count(), CELL_COUNT);
        assert_eq!(grid.clues().count(), 0);
    }

    #[test]
    fn test_set_letter_ignores_clue_cells() {
        let mut grid = Grid::new();
        let pos = Position::new(2, 3);
        grid.set_cell(pos, Cell::Clue(Clue::new("x", Variant::LeftThenRight, None)));
        assert!(!grid.set_letter(pos, Some(letter('A'))));
        assert!(!grid.set_solution_index(pos, NonZero::new(1)));
        assert_eq!(grid.letter(pos), None);

        let other = Position::new(2, 4);
        assert!(grid.set_letter(other, Some(letter('B'))));
        assert_eq!(grid.letter(other), Some(letter('B')));
    }

    #[test]
    fn test_with_cell_leaves_original_untouched() {
        let grid = Grid::new();
        let pos = Position::new(0, 0);
        let next = grid.with_cell(pos, Cell::Answer(AnswerCell::with_letter(letter('Q'))));
        assert_eq!(grid.letter(pos), None);
        assert_eq!(next.letter(pos), Some(letter('Q')));
    }

    #[test]
    fn test_from_rows_checks_shape() {
        let rows = vec![vec![Cell::default(); GRID_SIZE]; GRID_SIZE];
        assert_eq!(Grid::from_rows(rows), Ok(Grid::new()));

        let rows = vec![vec![Cell::default(); GRID_SIZE]; GRID_SIZE - 1];
        assert_eq!(
            Grid::from_rows(rows),
            Err(GridShapeError::WrongRowCount { rows: GRID_SIZE - 1 })
        );

        let mut rows = vec![vec![Cell::default(); GRID_SIZE]; GRID_SIZE];
        rows[5].pop();
        assert_eq!(
            Grid::from_rows(rows),
            Err(GridShapeError::WrongColumnCount {
                row: 5,
                cols: GRID_SIZE - 1
            })
        );
    }

    #[test]
    fn test_clear_letters_keeps_structure() {
        let mut grid = Grid::new();
        let clue_pos = Position::new(0, 0);
        grid.set_cell(clue_pos, Cell::Clue(Clue::new("c", Variant::AboveThenDown, None)));
        grid.set_letter(Position::new(1, 0), Some(letter('Z')));
        grid.set_solution_index(Position::new(1, 0), NonZero::new(3));

        let cleared = grid.without_letters();
        assert!(cleared.is_clue(clue_pos));
        assert_eq!(cleared.letter(Position::new(1, 0)), None);
        assert_eq!(
            cleared.cell(Position::new(1, 0)).as_answer().unwrap().solution_index,
            NonZero::new(3)
        );
    }
}
