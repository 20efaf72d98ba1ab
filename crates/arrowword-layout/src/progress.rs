use std::collections::BTreeSet;

use arrowword_core::{Grid, Position};

use crate::{Segment, SegmentId, Segments};

/// Completion and correctness derived from a grid snapshot.
///
/// Expects a grid whose expectations were produced by
/// [`map_expectations`](crate::map_expectations) for the same segments.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Progress {
    complete: BTreeSet<SegmentId>,
    solved: BTreeSet<SegmentId>,
    wrong: BTreeSet<Position>,
    all_correct: bool,
}

impl Progress {
    /// Derives the progress of `grid`.
    #[must_use]
    pub fn derive(grid: &Grid, segments: &Segments) -> Self {
        let mut complete = BTreeSet::new();
        let mut solved = BTreeSet::new();
        let mut wrong = BTreeSet::new();

        for segment in segments {
            if is_segment_complete(grid, segment) {
                complete.insert(segment.id());
                wrong.extend(segment.cells().iter().copied().filter(|&pos| {
                    let cell = &grid[pos];
                    matches!((cell.letter(), cell.expected()), (Some(l), Some(e)) if l != e)
                }));
            }
            if is_segment_solved(grid, segment) {
                solved.insert(segment.id());
            }
        }

        Self {
            complete,
            solved,
            wrong,
            all_correct: is_all_correct(grid),
        }
    }

    /// Returns `true` if every cell of the segment holds a letter.
    #[must_use]
    pub fn is_complete(&self, id: SegmentId) -> bool {
        self.complete.contains(&id)
    }

    /// Returns `true` if the segment holds exactly its expected letters.
    #[must_use]
    pub fn is_solved(&self, id: SegmentId) -> bool {
        self.solved.contains(&id)
    }

    /// Returns `true` if the cell should be highlighted as wrong.
    #[must_use]
    pub fn is_wrong(&self, pos: Position) -> bool {
        self.wrong.contains(&pos)
    }

    /// Returns the ids of complete segments.
    #[must_use]
    pub fn complete(&self) -> &BTreeSet<SegmentId> {
        &self.complete
    }

    /// Returns the ids of solved segments.
    #[must_use]
    pub fn solved(&self) -> &BTreeSet<SegmentId> {
        &self.solved
    }

    /// Returns the cells highlighted as wrong.
    #[must_use]
    pub fn wrong(&self) -> &BTreeSet<Position> {
        &self.wrong
    }

    /// Returns `true` if the whole grid is correctly filled.
    #[must_use]
    pub fn all_correct(&self) -> bool {
        self.all_correct
    }

    /// Iterates over segments solved now but not in `previous`.
    pub fn newly_solved<'a>(&'a self, previous: &'a Self) -> impl Iterator<Item = SegmentId> + 'a {
        self.solved.difference(&previous.solved).copied()
    }
}

/// A segment is complete when it has cells and each of them holds a letter.
fn is_segment_complete(grid: &Grid, segment: &Segment) -> bool {
    !segment.is_empty() && segment.cells().iter().all(|&pos| grid.letter(pos).is_some())
}

/// A segment is solved when it carries at least one expectation, every
/// expected cell matches, and every cell without expectation is empty.
fn is_segment_solved(grid: &Grid, segment: &Segment) -> bool {
    let mut has_expected = false;
    for &pos in segment.cells() {
        let cell = &grid[pos];
        match cell.expected() {
            Some(expected) => {
                has_expected = true;
                if cell.letter() != Some(expected) {
                    return false;
                }
            }
            None => {
                if cell.letter().is_some() {
                    return false;
                }
            }
        }
    }
    has_expected
}

/// Returns `true` when at least one cell carries an expectation and every
/// such cell holds its expected letter.
#[must_use]
pub fn is_all_correct(grid: &Grid) -> bool {
    let mut has_expected = false;
    for (_, cell) in grid.answers() {
        if let Some(expected) = cell.expected {
            has_expected = true;
            if cell.letter != Some(expected) {
                return false;
            }
        }
    }
    has_expected
}

#[cfg(test)]
mod tests {
    use arrowword_core::{Direction, Letter, Variant, testing::GridBuilder};

    use super::*;
    use crate::{build_segments, map_expectations};

    fn derive(grid: &Grid) -> (Grid, Segments, Progress) {
        let segments = build_segments(grid);
        let grid = map_expectations(grid, &segments);
        let progress = Progress::derive(&grid, &segments);
        (grid, segments, progress)
    }

    fn paris() -> GridBuilder {
        GridBuilder::new()
            .clue((0, 0), "Capital of France", Variant::LeftThenRight, "PARIS")
            .blank_clue((0, 6), Variant::AboveThenDown)
    }

    const PARIS_ID: SegmentId = SegmentId::new(Position::new(0, 0));

    #[test]
    fn test_empty_grid_is_not_correct() {
        let (_, _, progress) = derive(&Grid::new());
        assert!(!progress.all_correct());
        assert!(progress.complete().is_empty());
        assert!(progress.solved().is_empty());
    }

    #[test]
    fn test_partial_fill_is_neither_complete_nor_solved() {
        let (_, _, progress) = derive(&paris().letters((0, 1), Direction::Right, "PAR").build());
        assert!(!progress.is_complete(PARIS_ID));
        assert!(!progress.is_solved(PARIS_ID));
        assert!(!progress.all_correct());
        assert!(progress.wrong().is_empty());
    }

    #[test]
    fn test_correct_fill_solves_and_wins() {
        let (_, _, progress) = derive(&paris().letters((0, 1), Direction::Right, "PARIS").build());
        assert!(progress.is_complete(PARIS_ID));
        assert!(progress.is_solved(PARIS_ID));
        assert!(progress.all_correct());
        assert!(progress.wrong().is_empty());
    }

    #[test]
    fn test_wrong_cells_only_in_complete_segments() {
        let (_, _, progress) = derive(&paris().letters((0, 1), Direction::Right, "PXRI").build());
        assert!(progress.wrong().is_empty());

        let (_, _, progress) = derive(&paris().letters((0, 1), Direction::Right, "PXRIZ").build());
        assert!(progress.is_complete(PARIS_ID));
        assert!(!progress.is_solved(PARIS_ID));
        assert_eq!(
            progress.wrong().iter().copied().collect::<Vec<_>>(),
            [Position::new(0, 2), Position::new(0, 5)]
        );
    }

    #[test]
    fn test_letters_beyond_answer_block_solved() {
        let grid = GridBuilder::new()
            .clue((0, 0), "Opposite of yes", Variant::LeftThenRight, "NO")
            .blank_clue((0, 4), Variant::AboveThenDown)
            .letters((0, 1), Direction::Right, "NO")
            .build();
        let (_, _, progress) = derive(&grid);
        let id = SegmentId::new(Position::new(0, 0));
        assert!(progress.is_solved(id));
        assert!(!progress.is_complete(id));
        assert!(progress.all_correct());

        let grid = GridBuilder::from(grid)
            .letters((0, 3), Direction::Right, "X")
            .build();
        let (_, _, progress) = derive(&grid);
        assert!(progress.is_complete(id));
        assert!(!progress.is_solved(id));
        // the extra letter has no expectation so it is not flagged
        assert!(progress.wrong().is_empty());
        assert!(progress.all_correct());
    }

    #[test]
    fn test_segment_without_answer_is_never_solved() {
        let grid = GridBuilder::new()
            .blank_clue((0, 0), Variant::LeftThenRight)
            .letters((0, 1), Direction::Right, "ABCDEFGHIJK")
            .build();
        let (_, segments, progress) = derive(&grid);
        let id = segments.iter().next().unwrap().id();
        assert!(progress.is_complete(id));
        assert!(!progress.is_solved(id));
        assert!(!progress.all_correct());
    }

    #[test]
    fn test_newly_solved() {
        let (_, _, before) = derive(&paris().letters((0, 1), Direction::Right, "PARI").build());
        let (grid, _, after) = derive(&paris().letters((0, 1), Direction::Right, "PARIS").build());
        assert_eq!(after.newly_solved(&before).collect::<Vec<_>>(), [PARIS_ID]);
        assert_eq!(after.newly_solved(&after).count(), 0);
        assert_eq!(grid.letter(Position::new(0, 5)), Letter::new('S'));
    }
}
