//! Wellbore trajectory: the measured-depth to true-vertical-depth relation.
//!
//! Built once per well/branch from the wellbore segment-tree header and
//! content records, then used read-only for midpoint interpolation.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// One `(MD, TVD)` sample of the wellbore path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub md: f64,
    pub tvd: f64,
}

/// Ordered `(MD, TVD)` samples, sorted ascending by measured depth.
///
/// Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    /// Build the trajectory from the segment-tree header point and content.
    ///
    /// The header point is prepended to the content and the whole sequence
    /// sorted by `(md, tvd)`. Depths must already be absolute; incremental
    /// input is the parsing stage's problem.
    pub fn build(well: &str, header: TrajectoryPoint, content: &[TrajectoryPoint]) -> Self {
        if content.windows(2).any(|w| w[1].md < w[0].md) {
            warn!(
                well,
                "wellbore segment tree contains negative-length segments; \
                 check measured depths of the tubing layer"
            );
        }
        let mut points = Vec::with_capacity(content.len() + 1);
        points.push(header);
        points.extend_from_slice(content);
        points.sort_by(|a, b| a.md.total_cmp(&b.md).then(a.tvd.total_cmp(&b.tvd)));
        Self { points }
    }

    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    /// Measured depths of all samples, ascending.
    pub fn measured_depths(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.md).collect()
    }

    /// True vertical depth at `md` by linear interpolation.
    ///
    /// Clamped at both ends: depths outside the sampled range take the
    /// first/last sample's TVD rather than extrapolating.
    pub fn tvd_at(&self, md: f64) -> f64 {
        let points = &self.points;
        match points.as_slice() {
            [] => 0.0,
            [only] => only.tvd,
            _ => {
                let first = points[0];
                let last = points[points.len() - 1];
                if md <= first.md {
                    return first.tvd;
                }
                if md >= last.md {
                    return last.tvd;
                }
                for pair in points.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    if md <= b.md {
                        let dx = b.md - a.md;
                        if dx <= 0.0 {
                            return b.tvd;
                        }
                        return a.tvd + (b.tvd - a.tvd) * (md - a.md) / dx;
                    }
                }
                last.tvd
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(md: f64, tvd: f64) -> TrajectoryPoint {
        TrajectoryPoint { md, tvd }
    }

    #[test]
    fn test_header_prepended_and_sorted() {
        let header = point(500.0, 480.0);
        let content = vec![point(1500.0, 1400.0), point(1000.0, 950.0)];
        let traj = Trajectory::build("A-1", header, &content);
        let mds = traj.measured_depths();
        assert_eq!(mds, vec![500.0, 1000.0, 1500.0]);
    }

    #[test]
    fn test_interpolation_between_samples() {
        let traj = Trajectory::build("A-1", point(0.0, 0.0), &[point(100.0, 50.0)]);
        assert!((traj.tvd_at(50.0) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_extrapolation_beyond_ends() {
        let traj = Trajectory::build("A-1", point(100.0, 90.0), &[point(200.0, 150.0)]);
        assert!((traj.tvd_at(0.0) - 90.0).abs() < 1e-12, "clamped at shallow end");
        assert!((traj.tvd_at(300.0) - 150.0).abs() < 1e-12, "clamped at deep end");
    }

    #[test]
    fn test_duplicate_md_samples() {
        let traj = Trajectory::build(
            "A-1",
            point(0.0, 0.0),
            &[point(100.0, 80.0), point(100.0, 90.0), point(200.0, 180.0)],
        );
        // exact hit on a duplicated md takes the first sample at that depth
        let tvd = traj.tvd_at(100.0);
        assert!((80.0..=90.0).contains(&tvd));
    }
}
