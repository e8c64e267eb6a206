//! Gap synthesis for the tubing segment grid.
//!
//! Inactive or unconnected cells leave holes in the grid built by the
//! segmentation strategies. Each hole gets a synthesized `Additional`
//! segment spanning exactly the gap, so device scaling stays correct when
//! the lumper later folds the filler's contribution into a real neighbor.

use tracing::debug;

use crate::error::{Result, SegmentationError};
use crate::trajectory::Trajectory;
use crate::types::{MdInterval, SegmentKind, TubingSegment};

/// Fill depth gaps in the tubing segment table.
///
/// Re-sorts by start MD and tags every incoming row `Original`; for each
/// consecutive pair with a hole between them, inserts an `Additional` row
/// spanning exactly that hole. An empty input table means the schedule has
/// no data for this well/branch, which is fatal.
pub fn fill_gaps(
    well: &str,
    branch: i32,
    mut segments: Vec<TubingSegment>,
    trajectory: &Trajectory,
) -> Result<Vec<TubingSegment>> {
    if segments.is_empty() {
        return Err(SegmentationError::EmptySegments {
            well: well.to_string(),
            branch,
        });
    }

    segments.sort_by(|a, b| a.interval.start.total_cmp(&b.interval.start));
    for segment in &mut segments {
        segment.kind = SegmentKind::Original;
    }

    let mut fillers: Vec<TubingSegment> = Vec::new();
    for pair in segments.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if next.interval.start > current.interval.end {
            let interval = MdInterval::new(current.interval.end, next.interval.start);
            let md = interval.midpoint();
            fillers.push(TubingSegment {
                interval,
                md,
                tvd: trajectory.tvd_at(md),
                kind: SegmentKind::Additional,
            });
        }
    }
    if !fillers.is_empty() {
        debug!(well, branch, count = fillers.len(), "synthesized filler segments");
        segments.extend(fillers);
        segments.sort_by(|a, b| a.interval.start.total_cmp(&b.interval.start));
    }
    Ok(segments)
}
