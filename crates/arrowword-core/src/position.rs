use std::fmt::{self, Display};

/// Number of rows and columns of every grid.
pub const GRID_SIZE: usize = 12;

/// Number of cells of every grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// The direction an answer run extends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::IsVariant)]
pub enum Direction {
    /// Left to right along a row.
    Right,
    /// Top to bottom along a column.
    Down,
}

/// A cell position on the grid.
///
/// Both coordinates are zero-based and always lie within `0..GRID_SIZE`.
///
/// # Examples
///
/// ```
/// use arrowword_core::{Direction, Position};
///
/// let pos = Position::new(3, 11);
/// assert_eq!(pos.step(Direction::Down), Some(Position::new(4, 11)));
/// assert_eq!(pos.step(Direction::Right), None);
///
/// assert_eq!(Position::try_new(12, 0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// All positions in row-major order.
    pub const ALL: [Self; CELL_COUNT] = {
        let mut all = [Self { row: 0, col: 0 }; CELL_COUNT];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < CELL_COUNT {
            all[i] = Self {
                row: (i / GRID_SIZE) as u8,
                col: (i % GRID_SIZE) as u8,
            };
            i += 1;
        }
        all
    };

    /// Creates a position.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in the range `0..GRID_SIZE`.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!((row as usize) < GRID_SIZE && (col as usize) < GRID_SIZE);
        Self { row, col }
    }

    /// Creates a position from untrusted coordinates, returning `None` when
    /// either coordinate lies outside the grid.
    #[must_use]
    pub fn try_new(row: usize, col: usize) -> Option<Self> {
        if row < GRID_SIZE && col < GRID_SIZE {
            u8::try_from(row)
                .ok()
                .zip(u8::try_from(col).ok())
                .map(|(row, col)| Self { row, col })
        } else {
            None
        }
    }

    /// Creates a position from a row-major cell index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`CELL_COUNT`].
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index]
    }

    /// Returns the row (0-11).
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0-11).
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the row-major cell index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * GRID_SIZE + self.col as usize
    }

    /// Returns the neighbouring position one step in `direction`, if it is on the grid.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Right => self.right(),
            Direction::Down => self.down(),
        }
    }

    /// Returns the position above, if any.
    #[must_use]
    pub fn up(self) -> Option<Self> {
        let row = self.row.checked_sub(1)?;
        Some(Self { row, ..self })
    }

    /// Returns the position below, if any.
    #[must_use]
    pub fn down(self) -> Option<Self> {
        Self::try_new(usize::from(self.row) + 1, usize::from(self.col))
    }

    /// Returns the position to the left, if any.
    #[must_use]
    pub fn left(self) -> Option<Self> {
        let col = self.col.checked_sub(1)?;
        Some(Self { col, ..self })
    }

    /// Returns the position to the right, if any.
    #[must_use]
    pub fn right(self) -> Option<Self> {
        Self::try_new(usize::from(self.row), usize::from(self.col) + 1)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
