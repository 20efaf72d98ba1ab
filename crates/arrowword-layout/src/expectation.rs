use arrowword_core::{Grid, answer_letters};

use crate::Segments;

/// Returns a copy of `grid` whose answer cells carry the expected letter of
/// their segment's clue answer.
///
/// All expectations are cleared first. Then, for every segment whose clue
/// has an answer, the normalized answer letters are laid over the segment's
/// cells in order. An answer shorter than its segment leaves the trailing
/// cells without expectation; extra letters of a longer answer are dropped.
/// Where two segments cross, the later segment in row-major origin order
/// decides the shared cell.
///
/// The transform is pure and idempotent.
#[must_use]
pub fn map_expectations(grid: &Grid, segments: &Segments) -> Grid {
    let mut mapped = grid.without_expectations();
    for segment in segments {
        let Some(answer) = grid.clue(segment.origin()).and_then(|clue| clue.answer()) else {
            continue;
        };
        for (&pos, letter) in segment.cells().iter().zip(answer_letters(answer)) {
            if let Some(cell) = mapped.cell_mut(pos).as_answer_mut() {
                cell.expected = Some(letter);
            }
        }
    }
    mapped
}
