use arrowword_core::{Direction, Grid, Position};

/// Identifier of a segment.
///
/// Derived solely from the origin clue's position, so it survives
/// re-derivation after edits elsewhere on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("{}-{}", _0.row(), _0.col())]
pub struct SegmentId(Position);

impl SegmentId {
    /// Returns the id of the segment governed by the clue at `origin`.
    #[must_use]
    pub const fn new(origin: Position) -> Self {
        Self(origin)
    }

    /// Returns the origin clue position.
    #[must_use]
    pub const fn origin(self) -> Position {
        self.0
    }
}

/// The run of answer cells governed by one clue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    id: SegmentId,
    direction: Direction,
    start: Option<Position>,
    cells: Vec<Position>,
}

impl Segment {
    /// Returns the segment id.
    #[must_use]
    pub fn id(&self) -> SegmentId {
        self.id
    }

    /// Returns the clue cell that governs this segment.
    #[must_use]
    pub fn origin(&self) -> Position {
        self.id.origin()
    }

    /// Returns the direction the run extends in.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the position the run starts at, or `None` if it would lie off the grid.
    ///
    /// The start may be a clue cell, in which case the segment is empty.
    #[must_use]
    pub fn start(&self) -> Option<Position> {
        self.start
    }

    /// Returns the answer cells in run order.
    #[must_use]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Returns the cell at `index` within the run.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<Position> {
        self.cells.get(index).copied()
    }

    /// Returns the number of answer cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the run has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the index of `pos` within the run.
    #[must_use]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.cells.iter().position(|&p| p == pos)
    }

    /// Returns `true` if `pos` is part of the run.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.index_of(pos).is_some()
    }
}

/// All segments of a grid, ordered by origin in row-major order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Segments {
    segments: Vec<Segment>,
}

impl Segments {
    /// Returns the number of segments (one per clue cell).
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the grid has no clues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over the segments in row-major origin order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Looks up a segment by id.
    #[must_use]
    pub fn get(&self, id: SegmentId) -> Option<&Segment> {
        self.segments
            .binary_search_by_key(&id, Segment::id)
            .ok()
            .map(|i| &self.segments[i])
    }

    /// Looks up the segment governed by the clue at `origin`.
    #[must_use]
    pub fn at_origin(&self, origin: Position) -> Option<&Segment> {
        self.get(SegmentId::new(origin))
    }

    /// Iterates over the segments that contain `pos`.
    ///
    /// An answer cell belongs to at most one segment per direction in
    /// well-formed puzzles, but crossing runs of the same direction are not
    /// rejected and all matches are yielded in origin order.
    pub fn containing(&self, pos: Position) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().filter(move |s| s.contains(pos))
    }

    /// Iterates over the first cell of every non-empty segment with its direction.
    ///
    /// Renderers use this to draw the arrow into the first answer cell.
    pub fn arrow_starts(&self) -> impl Iterator<Item = (Position, Direction)> + '_ {
        self.segments
            .iter()
            .filter_map(|s| s.cell(0).map(|pos| (pos, s.direction)))
    }
}

impl<'a> IntoIterator for &'a Segments {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Derives the answer segments of `grid`, one per clue cell in row-major order.
///
/// Each run starts at the cell given by the clue's [`Variant`] and extends in
/// its direction until the grid edge or the next clue cell, which is never
/// included. A run whose start is off the grid or a clue cell is empty.
///
/// [`Variant`]: arrowword_core::Variant
#[must_use]
pub fn build_segments(grid: &Grid) -> Segments {
    let segments = grid
        .clues()
        .map(|(origin, clue)| {
            let variant = clue.variant();
            let direction = variant.direction();
            let start = variant.start(origin);
            let mut cells = Vec::new();
            let mut next = start;
            while let Some(pos) = next {
                if grid.is_clue(pos) {
                    break;
                }
                cells.push(pos);
                next = pos.step(direction);
            }
            Segment {
                id: SegmentId::new(origin),
                direction,
                start,
                cells,
            }
        })
        .collect();
    Segments { segments }
}

#[cfg(test)]
mod tests {
    use arrowword_core::{Cell, Clue, GRID_SIZE, Variant, testing::GridBuilder};
    use proptest::prelude::*;

    use super::*;

    fn arb_grid() -> impl Strategy<Value = Grid> {
        let cell = prop::option::weighted(0.3, 0..Variant::ALL.len());
        prop::collection::vec(cell, GRID_SIZE * GRID_SIZE).prop_map(|cells| {
            let mut grid = Grid::new();
            for (pos, variant) in Position::ALL.into_iter().zip(cells) {
                if let Some(v) = variant {
                    grid.set_cell(pos, Cell::Clue(Clue::new("?", Variant::ALL[v], None)));
                }
            }
            grid
        })
    }

    #[test]
    fn test_left_then_right_runs_to_edge() {
        let grid = GridBuilder::new()
            .blank_clue((3, 4), Variant::LeftThenRight)
            .build();
        let segments = build_segments(&grid);
        assert_eq!(segments.len(), 1);
        let seg = segments.at_origin(Position::new(3, 4)).unwrap();
        assert_eq!(seg.direction(), Direction::Right);
        assert_eq!(seg.start(), Some(Position::new(3, 5)));
        assert_eq!(
            seg.cells(),
            (5..12).map(|c| Position::new(3, c)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_runs_stop_before_next_clue() {
        let grid = GridBuilder::new()
            .blank_clue((0, 0), Variant::AboveThenDown)
            .blank_clue((4, 0), Variant::LeftThenDown)
            .build();
        let segments = build_segments(&grid);

        let first = segments.at_origin(Position::new(0, 0)).unwrap();
        assert_eq!(
            first.cells(),
            [Position::new(1, 0), Position::new(2, 0), Position::new(3, 0)]
        );

        let second = segments.at_origin(Position::new(4, 0)).unwrap();
        assert_eq!(second.direction(), Direction::Down);
        assert_eq!(second.start(), Some(Position::new(4, 1)));
        assert_eq!(second.len(), 8);
        assert_eq!(second.cell(7), Some(Position::new(11, 1)));
    }

    #[test]
    fn test_degenerate_segments_are_empty() {
        let grid = GridBuilder::new()
            .blank_clue((0, 11), Variant::LeftThenRight)
            .blank_clue((11, 5), Variant::AboveThenDown)
            .blank_clue((5, 5), Variant::LeftThenDown)
            .blank_clue((5, 6), Variant::LeftThenRight)
            .build();
        let segments = build_segments(&grid);
        assert_eq!(segments.len(), 4);

        let off_right = segments.at_origin(Position::new(0, 11)).unwrap();
        assert!(off_right.is_empty());
        assert_eq!(off_right.start(), None);

        let off_bottom = segments.at_origin(Position::new(11, 5)).unwrap();
        assert!(off_bottom.is_empty());

        let blocked = segments.at_origin(Position::new(5, 5)).unwrap();
        assert!(blocked.is_empty());
        assert_eq!(blocked.start(), Some(Position::new(5, 6)));

        assert_eq!(segments.arrow_starts().count(), 1);
    }

    #[test]
    fn test_segments_are_in_row_major_order() {
        let grid = GridBuilder::new()
            .blank_clue((6, 2), Variant::LeftThenRight)
            .blank_clue((0, 9), Variant::AboveThenDown)
            .blank_clue((6, 0), Variant::AboveThenDown)
            .build();
        let origins: Vec<_> = build_segments(&grid).iter().map(Segment::origin).collect();
        assert_eq!(
            origins,
            [Position::new(0, 9), Position::new(6, 0), Position::new(6, 2)]
        );
    }

    #[test]
    fn test_containing_finds_intersections() {
        let grid = GridBuilder::new()
            .blank_clue((2, 0), Variant::LeftThenRight)
            .blank_clue((0, 3), Variant::AboveThenDown)
            .build();
        let segments = build_segments(&grid);
        let crossing = Position::new(2, 3);
        let ids: Vec<_> = segments.containing(crossing).map(Segment::id).collect();
        assert_eq!(
            ids,
            [
                SegmentId::new(Position::new(0, 3)),
                SegmentId::new(Position::new(2, 0))
            ]
        );
        assert_eq!(segments.containing(Position::new(11, 11)).count(), 0);
    }

    #[test]
    fn test_segment_id_display() {
        assert_eq!(SegmentId::new(Position::new(3, 10)).to_string(), "3-10");
    }

    proptest! {
        #[test]
        fn prop_segments_never_contain_clues(grid in arb_grid()) {
            for seg in &build_segments(&grid) {
                for &pos in seg.cells() {
                    prop_assert!(!grid.is_clue(pos));
                }
            }
        }

        #[test]
        fn prop_segments_are_contiguous_and_maximal(grid in arb_grid()) {
            let segments = build_segments(&grid);
            prop_assert_eq!(segments.len(), grid.clues().count());
            for seg in &segments {
                if let Some(&first) = seg.cells().first() {
                    prop_assert_eq!(Some(first), seg.start());
                }
                for pair in seg.cells().windows(2) {
                    prop_assert_eq!(pair[0].step(seg.direction()), Some(pair[1]));
                }
                let after = match seg.cells().last() {
                    Some(&last) => last.step(seg.direction()),
                    None => None,
                };
                if let Some(next) = after {
                    prop_assert!(grid.is_clue(next));
                }
            }
        }
    }
}
