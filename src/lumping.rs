//! Lumping of synthetic filler segments.
//!
//! An `Additional` segment exists only to keep the depth grid contiguous; it
//! has no tubing connection of its own. When it sits in a real annulus zone
//! its device contribution is folded into an adjacent `Original` segment of
//! the same zone, so the zone's total device count is conserved. The filler
//! rows are then dropped from the table.

use crate::types::{SegmentKind, WellSegmentRow};

/// Fold `Additional` rows' device counts into a same-zone neighbor, drop the
/// fillers and recompute scaling factors.
///
/// The immediate predecessor is tried first, then the successor; a filler
/// whose neighbors belong to other zones simply loses its count (it never
/// had a connection). Scaling factors are recomputed because folding changes
/// neighbor counts.
pub fn lump_segments(mut rows: Vec<WellSegmentRow>) -> Vec<WellSegmentRow> {
    let count = rows.len();
    for idx in 0..count {
        if rows[idx].kind != SegmentKind::Additional {
            continue;
        }
        if rows[idx].annulus_zone > 0 {
            let zone = rows[idx].annulus_zone;
            let devices = rows[idx].device_count;
            let mut lumped = false;
            if idx > 0 && rows[idx - 1].annulus_zone == zone {
                rows[idx - 1].device_count += devices;
                lumped = true;
            }
            if !lumped && idx + 1 < count && rows[idx + 1].annulus_zone == zone {
                rows[idx + 1].device_count += devices;
            }
        }
        // lumped away, or zone 0 with no connection either way
        rows[idx].device_count = 0.0;
    }

    rows.retain(|row| row.kind == SegmentKind::Original);
    for row in &mut rows {
        row.scaling_factor = if row.device_count > 0.0 {
            -1.0 / row.device_count
        } else {
            0.0
        };
    }
    rows
}
