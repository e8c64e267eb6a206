//! `fix` strategy: constant-length segments across the reservoir extent.
//!
//! Segments start at the reservoir's minimum MD and step by the configured
//! length; the final segment is truncated at the maximum MD, never overshot.

use crate::error::{Result, SegmentationError};
use crate::types::{MdInterval, ReservoirCell};

pub(super) fn intervals(
    reservoir: &[ReservoirCell],
    segment_length: f64,
) -> Result<Vec<MdInterval>> {
    if !(segment_length.is_finite() && segment_length > 0.0) {
        return Err(SegmentationError::InvalidFixLength(segment_length));
    }

    let min_md = reservoir
        .iter()
        .map(|cell| cell.interval.start)
        .fold(f64::INFINITY, f64::min);
    let max_md = reservoir
        .iter()
        .map(|cell| cell.interval.end)
        .fold(f64::NEG_INFINITY, f64::max);
    if reservoir.is_empty() {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    let mut step = 0u64;
    loop {
        // multiplication, not accumulation, to keep boundaries exact
        let start = min_md + step as f64 * segment_length;
        if start >= max_md {
            break;
        }
        let end = (start + segment_length).min(max_md);
        out.push(MdInterval::new(start, end));
        step += 1;
    }
    Ok(out)
}
