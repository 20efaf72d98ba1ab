use arrowword_core::Position;
use arrowword_layout::{SegmentId, Segments};

/// The cell that receives the next keystroke: a segment and an index into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Active segment.
    pub segment: SegmentId,
    /// Index within the segment's cells.
    pub index: usize,
}

impl Cursor {
    /// Resolves the cursor to a grid position, if the segment still reaches that far.
    #[must_use]
    pub fn position(self, segments: &Segments) -> Option<Position> {
        segments.get(self.segment)?.cell(self.index)
    }
}
