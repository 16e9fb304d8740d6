use core::cmp;

use crate::size::SizeModel;
use crate::{IndexRange, Viewport};

/// Smallest contiguous index range whose items intersect the viewport.
///
/// Overscrolled offsets (e.g. after the collection shrank) are clamped back so the
/// range always lands on valid indices. Empty model or degenerate viewport → empty.
pub(crate) fn visible_range(model: &SizeModel, viewport: Viewport) -> IndexRange {
    let len = model.len();
    if len == 0 || viewport.is_degenerate() {
        return IndexRange::EMPTY;
    }

    let total = model.extent();
    if total == 0 {
        return IndexRange::EMPTY;
    }
    let offset = viewport.offset.min(total.saturating_sub(viewport.size as u64));
    let end_exclusive = offset.saturating_add(viewport.size as u64);
    let last_covered = cmp::max(end_exclusive.saturating_sub(1), offset);

    let start = model.index_at(offset).unwrap_or(len);
    let end = model.index_at(last_covered).map(|i| i + 1).unwrap_or(len);
    IndexRange::new(start.min(len), end.min(len))
}

/// Widens both edges by `overscan`, clamped to `[0, len]`. Empty ranges stay empty.
pub(crate) fn apply_overscan(range: IndexRange, overscan: usize, len: usize) -> IndexRange {
    if range.is_empty() {
        return range;
    }
    IndexRange::new(
        range.start.saturating_sub(overscan),
        cmp::min(len, range.end.saturating_add(overscan)),
    )
}
