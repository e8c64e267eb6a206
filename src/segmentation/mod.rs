//! Tubing-segment construction.
//!
//! Four strategies build the tubing-layer interval grid; one file per
//! strategy, dispatched here. All strategies converge on the same output
//! shape: sorted intervals with midpoint MD and trajectory-interpolated TVD,
//! every segment tagged [`SegmentKind::Original`].

mod cells;
mod fix;
mod user;
mod welsegs;

use tracing::debug;

use crate::config::CaseConfig;
use crate::error::Result;
use crate::trajectory::Trajectory;
use crate::types::{CompletionRow, MdInterval, Method, ReservoirCell, SegmentKind, TubingSegment};

/// Build the tubing-segment grid with the given strategy.
///
/// `completion` must already have annulus zones assigned (packers removed);
/// only the `user` strategy reads it.
pub fn create_tubing_segments(
    reservoir: &[ReservoirCell],
    completion: &[CompletionRow],
    trajectory: &Trajectory,
    method: Method,
    config: &CaseConfig,
) -> Result<Vec<TubingSegment>> {
    let intervals = match method {
        Method::Cells => cells::intervals(reservoir, config.minimum_segment_length)?,
        Method::User => user::intervals(completion, reservoir),
        Method::Fix => fix::intervals(reservoir, config.segment_length)?,
        Method::Welsegs => welsegs::intervals(reservoir, trajectory),
    };
    debug!(%method, segments = intervals.len(), "built tubing segment grid");
    Ok(resolve(intervals, trajectory))
}

/// Attach midpoint MD/TVD to every interval.
fn resolve(intervals: Vec<MdInterval>, trajectory: &Trajectory) -> Vec<TubingSegment> {
    intervals
        .into_iter()
        .map(|interval| {
            let md = interval.midpoint();
            TubingSegment {
                interval,
                md,
                tvd: trajectory.tvd_at(md),
                kind: SegmentKind::Original,
            }
        })
        .collect()
}
