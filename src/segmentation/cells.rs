//! `cells` strategy: one tubing segment per reservoir connection.
//!
//! Two refinements on the one-cell-one-segment default:
//! - when every connection carries a pre-existing grouping id, contiguous
//!   runs sharing an id merge into one segment;
//! - when a minimum-segment-length floor is configured, cells accumulate
//!   greedily until the floor is met. The trailing group always closes even
//!   when short of the floor; there is no backtracking.

use crate::error::{Result, SegmentationError};
use crate::types::{MdInterval, ReservoirCell};

pub(super) fn intervals(
    reservoir: &[ReservoirCell],
    minimum_segment_length: f64,
) -> Result<Vec<MdInterval>> {
    if minimum_segment_length < 0.0 {
        return Err(SegmentationError::InvalidMinimumLength(
            minimum_segment_length,
        ));
    }

    let mut intervals = if reservoir.iter().all(|cell| cell.segment_group.is_some())
        && !reservoir.is_empty()
    {
        merge_groups(reservoir)
    } else {
        reservoir.iter().map(|cell| cell.interval).collect()
    };

    if minimum_segment_length > 0.0 {
        intervals = enforce_minimum_length(&intervals, minimum_segment_length);
    }
    Ok(intervals)
}

/// Merge contiguous connections sharing a grouping id into one interval.
fn merge_groups(reservoir: &[ReservoirCell]) -> Vec<MdInterval> {
    let mut merged: Vec<MdInterval> = Vec::new();
    let mut current = reservoir[0].interval;
    let mut current_group = reservoir[0].segment_group;
    for cell in &reservoir[1..] {
        if cell.segment_group == current_group {
            current.end = cell.interval.end;
        } else {
            merged.push(current);
            current = cell.interval;
            current_group = cell.segment_group;
        }
    }
    merged.push(current);
    merged
}

/// Greedy walk accumulating cell lengths until the floor is met.
fn enforce_minimum_length(intervals: &[MdInterval], floor: f64) -> Vec<MdInterval> {
    let mut out: Vec<MdInterval> = Vec::new();
    let mut group_start: Option<f64> = None;
    let mut accumulated = 0.0;
    for interval in intervals {
        let start = group_start.get_or_insert(interval.start);
        accumulated += interval.length();
        if accumulated >= floor {
            out.push(MdInterval::new(*start, interval.end));
            group_start = None;
            accumulated = 0.0;
        }
    }
    // trailing group closes regardless of the floor
    if let Some(start) = group_start {
        if let Some(last) = intervals.last() {
            out.push(MdInterval::new(start, last.end));
        }
    }
    out
}
