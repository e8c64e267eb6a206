//! `user` strategy: one tubing segment per completion-design interval.
//!
//! The design grid may extend past the reservoir connections; the first and
//! last segments are clipped to the reservoir's overall extent, and a
//! boundary segment that collapses to non-positive length is dropped.

use crate::types::{CompletionRow, MdInterval, ReservoirCell};

pub(super) fn intervals(
    completion: &[CompletionRow],
    reservoir: &[ReservoirCell],
) -> Vec<MdInterval> {
    let mut intervals: Vec<MdInterval> = completion.iter().map(|row| row.interval).collect();
    if intervals.is_empty() {
        return intervals;
    }

    if let (Some(first_cell), Some(last_cell)) = (reservoir.first(), reservoir.last()) {
        let first = 0;
        intervals[first].start = intervals[first].start.max(first_cell.interval.start);
        let last = intervals.len() - 1;
        intervals[last].end = intervals[last].end.min(last_cell.interval.end);
    }

    if intervals[0].start >= intervals[0].end {
        intervals.remove(0);
    }
    if let Some(last) = intervals.last() {
        if last.start >= last.end {
            intervals.pop();
        }
    }
    intervals
}
