//! Cell-to-segment linkage.
//!
//! After lumping, each reservoir-connection cell must be associated with
//! exactly one final tubing segment so the output stage can emit the
//! connection table. The `user` strategy honors design-intended boundaries
//! by interval membership; every other strategy joins on nearest midpoint.

use tracing::warn;

use crate::depth::nearest_index;
use crate::types::{CellLink, Method, ReservoirCell, SegmentKind, TubingSegment, WellSegmentRow};

/// Associate each reservoir cell with its owning final tubing segment.
///
/// `tubing` is the gap-filled segment grid; its `Original` rows correspond
/// one-to-one, in order, with `rows` (the lumped final table).
pub fn connect_cells_to_segments(
    reservoir: &[ReservoirCell],
    rows: &[WellSegmentRow],
    tubing: &[TubingSegment],
    method: Method,
) -> Vec<CellLink> {
    match method {
        Method::User => link_by_membership(reservoir, rows, tubing),
        _ => link_by_nearest_midpoint(reservoir, rows),
    }
}

/// Partition cells into buckets by interval membership of the cell midpoint.
///
/// Boundaries shared by two segments resolve to the deeper one. Cells whose
/// midpoint lies outside every segment interval are dropped with a warning.
fn link_by_membership(
    reservoir: &[ReservoirCell],
    rows: &[WellSegmentRow],
    tubing: &[TubingSegment],
) -> Vec<CellLink> {
    let originals: Vec<&TubingSegment> = tubing
        .iter()
        .filter(|segment| segment.kind == SegmentKind::Original)
        .collect();

    let mut links = Vec::with_capacity(reservoir.len());
    for cell in reservoir {
        let md = cell.midpoint();
        let mut owner: Option<usize> = None;
        for (idx, segment) in originals.iter().enumerate() {
            if segment.interval.contains(md) {
                owner = Some(idx);
            }
        }
        match owner {
            Some(idx) if idx < rows.len() => links.push(make_link(cell, idx, &rows[idx])),
            _ => {
                warn!(
                    cell_start = cell.interval.start,
                    cell_end = cell.interval.end,
                    "reservoir cell midpoint lies outside every tubing segment; dropping"
                );
            }
        }
    }
    links
}

/// Join each cell to the segment with the closest midpoint MD.
fn link_by_nearest_midpoint(reservoir: &[ReservoirCell], rows: &[WellSegmentRow]) -> Vec<CellLink> {
    let midpoints: Vec<f64> = rows.iter().map(|row| row.md).collect();
    reservoir
        .iter()
        .filter_map(|cell| {
            nearest_index(&midpoints, cell.midpoint()).map(|idx| make_link(cell, idx, &rows[idx]))
        })
        .collect()
}

fn make_link(cell: &ReservoirCell, segment_index: usize, row: &WellSegmentRow) -> CellLink {
    CellLink {
        cell: cell.interval,
        md: cell.midpoint(),
        segment_index,
        segment_md: row.md,
        device_count: row.device_count,
        device_type: row.device_type,
        annulus_zone: row.annulus_zone,
    }
}
