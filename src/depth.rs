//! Depth comparison conventions shared by every stage.
//!
//! The reference workflows this crate slots into mix three depth-matching
//! styles: exact equality on authored boundaries, nearest-distance joins, and
//! a fixed device-layer shift applied by the output stage. Everything
//! tolerance-related is centralized here so the pipeline never re-derives a
//! comparison rule ad hoc.

/// Snap tolerance for treating two measured depths as the same boundary.
///
/// Depth grids in this pipeline are authored values, not accumulated sums,
/// so the tolerance only has to absorb float round-off from midpoint and
/// clipping arithmetic.
pub const DEPTH_EPSILON: f64 = 1e-6;

/// Fixed depth shift between the tubing layer and the device layer.
///
/// The output stage places each device-layer segment this far below its
/// tubing-layer parent, and junction alignment elsewhere in the system
/// assumes the same shift. Keep in sync with that convention; the value is
/// not consumed numerically inside this crate.
pub const DEVICE_LAYER_DEPTH_OFFSET: f64 = 0.1;

/// Whether two measured depths denote the same boundary.
pub fn same_depth(a: f64, b: f64) -> bool {
    (a - b).abs() <= DEPTH_EPSILON
}

/// Index of the sample closest to `target` by absolute distance.
///
/// The first (shallowest) sample wins ties. Returns `None` on an empty slice.
pub fn nearest_index(samples: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &sample) in samples.iter().enumerate() {
        let dist = (sample - target).abs();
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Sorted depths present in exactly one of the two inputs.
///
/// Duplicates within one input collapse to a single value; depths within
/// [`DEPTH_EPSILON`] of each other count as equal.
pub fn symmetric_difference(a: &[f64], b: &[f64]) -> Vec<f64> {
    let dedup_sorted = |values: &[f64]| -> Vec<f64> {
        let mut v = values.to_vec();
        v.sort_by(f64::total_cmp);
        v.dedup_by(|x, y| same_depth(*x, *y));
        v
    };
    let ua = dedup_sorted(a);
    let ub = dedup_sorted(b);

    let mut out: Vec<f64> = ua
        .iter()
        .filter(|&&x| !ub.iter().any(|&y| same_depth(x, y)))
        .chain(ub.iter().filter(|&&y| !ua.iter().any(|&x| same_depth(x, y))))
        .copied()
        .collect();
    out.sort_by(f64::total_cmp);
    out
}
