use arrowword_core::{CELL_COUNT, Grid, Letter};

/// Collects the solution word spelled by numbered cells.
///
/// The word is as long as the highest solution index on the grid. Slot `i`
/// holds the letter of the cell numbered `i + 1`, or `None` when that cell
/// is empty or no cell carries that number. If two cells share a number the
/// later one in row-major order wins. Numbers above the cell count are
/// ignored.
///
/// # Examples
///
/// ```
/// use arrowword_core::{Direction, Letter, testing::GridBuilder};
/// use arrowword_layout::solution_word;
///
/// let grid = GridBuilder::new()
///     .letters((0, 0), Direction::Right, "AB")
///     .solution_index((0, 0), 3)
///     .solution_index((0, 1), 1)
///     .build();
///
/// assert_eq!(solution_word(&grid), [Letter::new('B'), None, Letter::new('A')]);
/// ```
#[must_use]
pub fn solution_word(grid: &Grid) -> Vec<Option<Letter>> {
    let numbered: Vec<_> = grid
        .answers()
        .filter_map(|(_, cell)| {
            let index = usize::try_from(cell.solution_index?.get()).ok()?;
            (index <= CELL_COUNT).then_some((index, cell.letter))
        })
        .collect();
    let len = numbered.iter().map(|&(index, _)| index).max().unwrap_or(0);
    let mut word = vec![None; len];
    for (index, letter) in numbered {
        word[index - 1] = letter;
    }
    word
}
