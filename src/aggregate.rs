//! Completion aggregation: map each tubing segment to its completion
//! properties.
//!
//! Every tubing segment must be covered by the completion design from start
//! to end. Device counts accumulate across every covered design interval;
//! geometry, device identity and annulus zone come from the covered interval
//! with the largest overlap seen so far (the first one wins ties).

use tracing::warn;

use crate::error::{Result, SegmentationError};
use crate::types::{
    covering_index, CompletionRow, DeviceType, MdInterval, TubingSegment,
    WellSegmentRow,
};

/// Geometry and identity carried by the dominant covered interval.
struct DominantInterval {
    inner_diameter: f64,
    outer_diameter: f64,
    roughness: f64,
    device_type: DeviceType,
    device_number: i32,
    annulus_zone: u32,
}

/// Aggregate completion properties over every tubing segment.
pub fn aggregate_completion(
    well: &str,
    branch: i32,
    segments: &[TubingSegment],
    completion: &[CompletionRow],
    joint_length: f64,
) -> Result<Vec<WellSegmentRow>> {
    let completion_intervals: Vec<MdInterval> =
        completion.iter().map(|row| row.interval).collect();

    segments
        .iter()
        .map(|segment| {
            aggregate_segment(
                well,
                branch,
                segment,
                completion,
                &completion_intervals,
                joint_length,
            )
        })
        .collect()
}

fn aggregate_segment(
    well: &str,
    branch: i32,
    segment: &TubingSegment,
    completion: &[CompletionRow],
    completion_intervals: &[MdInterval],
    joint_length: f64,
) -> Result<WellSegmentRow> {
    let (start, end) = (segment.interval.start, segment.interval.end);
    let Some((idx0, idx1)) = covering_index(completion_intervals, start, end) else {
        return Err(SegmentationError::MissingCompletion {
            well: well.to_string(),
            branch,
            start,
            end,
        });
    };
    // unreachable with a sorted design table, but the slice below must not invert
    if idx0 > idx1 {
        return Err(SegmentationError::CoverageIndexInverted {
            well: well.to_string(),
            start,
            end,
        });
    }

    let mut device_count = 0.0;
    let mut dominant: Option<DominantInterval> = None;
    let mut dominant_overlap = 0.0;

    for row in &completion[idx0..=idx1] {
        let overlap = row.interval.overlap(&segment.interval);
        if overlap <= 0.0 {
            warn!(
                well,
                branch,
                completion_start = row.interval.start,
                completion_end = row.interval.end,
                overlap,
                "completion interval has zero or negative overlap with segment"
            );
        }
        device_count += (overlap / joint_length) * row.valves_per_joint;

        if overlap > dominant_overlap {
            if row.outer_diameter <= row.inner_diameter {
                return Err(SegmentationError::InvalidDiameters {
                    well: well.to_string(),
                    outer: row.outer_diameter,
                    inner: row.inner_diameter,
                });
            }
            dominant = Some(DominantInterval {
                inner_diameter: row.inner_diameter,
                // annular-area-equivalent diameter of the screen/casing gap
                outer_diameter: (row.outer_diameter.powi(2) - row.inner_diameter.powi(2)).sqrt(),
                roughness: row.roughness,
                device_type: row.device_type,
                device_number: row.device_number,
                annulus_zone: row.annulus_zone,
            });
            dominant_overlap = overlap;
        }
    }

    // No covered interval had positive overlap: the design rows covering this
    // span are degenerate.
    let Some(dominant) = dominant else {
        return Err(SegmentationError::InvalidCompletionRows {
            well: well.to_string(),
            start,
            end,
        });
    };

    let scaling_factor = if device_count > 0.0 {
        -1.0 / device_count
    } else {
        0.0
    };
    Ok(WellSegmentRow {
        md: segment.md,
        tvd: segment.tvd,
        length: segment.interval.length(),
        kind: segment.kind,
        device_count,
        device_type: dominant.device_type,
        device_number: dominant.device_number,
        inner_diameter: dominant.inner_diameter,
        outer_diameter: dominant.outer_diameter,
        roughness: dominant.roughness,
        annulus_zone: dominant.annulus_zone,
        scaling_factor,
    })
}
