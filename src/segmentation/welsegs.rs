//! `welsegs` strategy: segments derived from the wellbore segment tree.
//!
//! Trajectory samples are interpreted as segment *midpoint* markers. The
//! midpoint-to-midpoint grid is reconciled against the reservoir-connection
//! intervals: gaps between connections pull in the nearest candidate
//! boundaries, markers outside the reservoir extent are appended, residual
//! gaps are closed with synthesized boundary pairs, and zero-length pairs
//! are discarded.

use crate::depth::{nearest_index, same_depth, symmetric_difference};
use crate::trajectory::Trajectory;
use crate::types::{MdInterval, ReservoirCell};

pub(super) fn intervals(reservoir: &[ReservoirCell], trajectory: &Trajectory) -> Vec<MdInterval> {
    let mut starts: Vec<f64> = reservoir.iter().map(|cell| cell.interval.start).collect();
    let mut ends: Vec<f64> = reservoir.iter().map(|cell| cell.interval.end).collect();
    if starts.is_empty() {
        return Vec::new();
    }

    // Trajectory sample depths are segment midpoints; derive the implied
    // boundary grid. The very first boundary is the first sample itself.
    let mds = trajectory.measured_depths();
    let end_markers: Vec<f64> = mds.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
    let mut start_markers: Vec<f64> = Vec::with_capacity(end_markers.len());
    if let Some(&first_md) = mds.first() {
        start_markers.push(first_md);
        if end_markers.len() > 1 {
            start_markers.extend_from_slice(&end_markers[..end_markers.len() - 1]);
        }
    }

    // Gaps between consecutive reservoir connections.
    let mut gap_starts: Vec<f64> = Vec::new();
    let mut gap_ends: Vec<f64> = Vec::new();
    for idx in 0..starts.len() - 1 {
        if !same_depth(starts[idx + 1], ends[idx]) {
            gap_starts.push(ends[idx]);
            gap_ends.push(starts[idx + 1]);
        }
    }

    // Nearest candidate boundary for each gap edge; the symmetric difference
    // keeps markers that fit only one side of a gap.
    let matched_starts: Vec<f64> = gap_starts
        .iter()
        .filter_map(|&gap| nearest_index(&start_markers, gap).map(|i| start_markers[i]))
        .collect();
    let matched_ends: Vec<f64> = gap_ends
        .iter()
        .filter_map(|&gap| nearest_index(&end_markers, gap).map(|i| end_markers[i]))
        .collect();
    let mut to_add = symmetric_difference(&matched_starts, &matched_ends);

    // Markers lying outside the reservoir's overall extent.
    let first_start = starts[0];
    let last_end = ends[ends.len() - 1];
    to_add.extend(start_markers.iter().copied().filter(|&m| m < first_start));
    to_add.extend(end_markers.iter().copied().filter(|&m| m > last_end));

    // Each added depth acts as both a start and an end boundary.
    for &boundary in &to_add {
        starts.push(boundary);
        ends.push(boundary);
    }
    starts.sort_by(f64::total_cmp);
    ends.sort_by(f64::total_cmp);

    // Close any residual gap with a synthesized boundary pair.
    let count = starts.len();
    let mut filler_starts: Vec<f64> = Vec::new();
    let mut filler_ends: Vec<f64> = Vec::new();
    for idx in 0..count.saturating_sub(1) {
        let next_start = starts[idx + 1];
        if next_start > ends[idx] && !same_depth(next_start, ends[idx]) {
            filler_starts.push(ends[idx]);
            filler_ends.push(next_start);
        }
    }
    starts.extend_from_slice(&filler_starts);
    ends.extend_from_slice(&filler_ends);
    starts.sort_by(f64::total_cmp);
    ends.sort_by(f64::total_cmp);

    // Discard zero-length pairs.
    starts
        .iter()
        .zip(ends.iter())
        .filter(|(s, e)| !same_depth(**s, **e))
        .map(|(&s, &e)| MdInterval::new(s, e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::TrajectoryPoint;

    fn cell(start: f64, end: f64) -> ReservoirCell {
        ReservoirCell {
            interval: MdInterval::new(start, end),
            segment_group: None,
        }
    }

    fn trajectory(mds: &[f64]) -> Trajectory {
        let points: Vec<TrajectoryPoint> = mds
            .iter()
            .map(|&md| TrajectoryPoint { md, tvd: md * 0.9 })
            .collect();
        Trajectory::build("A-1", points[0], &points[1..])
    }

    #[test]
    fn test_contiguous_connections_pass_through() {
        let traj = trajectory(&[0.0, 100.0, 200.0]);
        let reservoir = vec![cell(0.0, 100.0), cell(100.0, 200.0)];
        let result = intervals(&reservoir, &traj);
        assert_eq!(
            result,
            vec![MdInterval::new(0.0, 100.0), MdInterval::new(100.0, 200.0)]
        );
    }

    #[test]
    fn test_gap_is_closed() {
        let traj = trajectory(&[0.0, 100.0, 200.0, 300.0]);
        let reservoir = vec![cell(0.0, 100.0), cell(220.0, 300.0)];
        let result = intervals(&reservoir, &traj);
        // whatever boundaries get pulled into the gap, the result must be
        // sorted, contiguous and cover the full extent
        assert!((result[0].start - 0.0).abs() < 1e-9);
        assert!((result.last().unwrap().end - 300.0).abs() < 1e-9);
        for pair in result.windows(2) {
            assert!(
                same_depth(pair[0].end, pair[1].start),
                "expected contiguous grid, got {} then {}",
                pair[0],
                pair[1]
            );
        }
        assert!(result.iter().all(|iv| iv.length() > 0.0));
    }

    #[test]
    fn test_markers_outside_extent_are_appended() {
        let traj = trajectory(&[0.0, 100.0, 200.0, 300.0, 400.0]);
        let reservoir = vec![cell(100.0, 300.0)];
        let result = intervals(&reservoir, &traj);
        assert!(
            result[0].start < 100.0,
            "marker above the reservoir extends the grid upward"
        );
        assert!(
            result.last().unwrap().end > 300.0,
            "marker below the reservoir extends the grid downward"
        );
    }

    #[test]
    fn test_empty_reservoir_yields_no_segments() {
        let traj = trajectory(&[0.0, 100.0]);
        assert!(intervals(&[], &traj).is_empty());
    }
}
