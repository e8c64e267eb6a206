//! Annulus zone assignment and correction.
//!
//! A zone is a maximal run of hydraulically connected open annulus, bounded
//! by packers, gravel-pack intervals, or the ends of the completion. Zone 0
//! means "no distinct zone": gravel-packed, isolated, or demoted later by
//! [`correct_annulus_zones`] when nothing in the zone connects to tubing.

use tracing::debug;

use crate::depth::same_depth;
use crate::error::{Result, SegmentationError};
use crate::types::{
    covering_index, AnnulusContent, CompletionRow, DeviceType, MdInterval, WellSegmentRow,
};

/// Partition the completion design into integer annulus zones.
///
/// Packer rows (zero-length isolators) are removed permanently. When no open
/// annulus exists every surviving row gets zone 0. Otherwise zone boundaries
/// are the well start/end, every packer boundary and every gravel-pack
/// boundary; each boundary pair becomes a new zone unless it coincides
/// exactly with a gravel-pack interval, and each completion row copies the
/// zone of the unique boundary pair containing it.
pub fn assign_annulus_zones(well: &str, completion: &[CompletionRow]) -> Result<Vec<CompletionRow>> {
    let Some(first) = completion.first() else {
        return Ok(Vec::new());
    };
    // taken from the raw table, before packer rows are dropped
    let well_start = first.interval.start;
    let well_end = completion[completion.len() - 1].interval.end;

    let gravel_packs: Vec<MdInterval> = completion
        .iter()
        .filter(|row| row.annulus == AnnulusContent::GravelPack)
        .map(|row| row.interval)
        .collect();
    let packers: Vec<MdInterval> = completion
        .iter()
        .filter(|row| row.annulus == AnnulusContent::Packer)
        .map(|row| row.interval)
        .collect();

    let mut rows: Vec<CompletionRow> = completion
        .iter()
        .filter(|row| row.annulus != AnnulusContent::Packer)
        .cloned()
        .map(|mut row| {
            row.annulus_zone = 0;
            row
        })
        .collect();

    let has_open_annulus = rows
        .iter()
        .any(|row| row.annulus == AnnulusContent::OpenAnnulus);
    if !has_open_annulus {
        return Ok(rows);
    }

    let mut boundaries = vec![well_start, well_end];
    for packer in &packers {
        boundaries.push(packer.start);
        boundaries.push(packer.end);
    }
    for gp in &gravel_packs {
        boundaries.push(gp.start);
        boundaries.push(gp.end);
    }
    boundaries.sort_by(f64::total_cmp);
    boundaries.dedup_by(|a, b| same_depth(*a, *b));

    let mut zone_intervals: Vec<MdInterval> = Vec::with_capacity(boundaries.len().saturating_sub(1));
    let mut zone_ids: Vec<u32> = Vec::with_capacity(zone_intervals.capacity());
    let mut next_zone = 0u32;
    for pair in boundaries.windows(2) {
        let interval = MdInterval::new(pair[0], pair[1]);
        let is_gravel_pack = gravel_packs
            .iter()
            .any(|gp| same_depth(gp.start, interval.start) && same_depth(gp.end, interval.end));
        let zone = if is_gravel_pack {
            0
        } else {
            next_zone += 1;
            next_zone
        };
        zone_intervals.push(interval);
        zone_ids.push(zone);
    }

    for row in &mut rows {
        let (start, end) = (row.interval.start, row.interval.end);
        let containment = covering_index(&zone_intervals, start, end);
        match containment {
            Some((idx0, idx1)) if idx0 == idx1 => row.annulus_zone = zone_ids[idx0],
            _ => {
                return Err(SegmentationError::AnnulusZoneContainment {
                    well: well.to_string(),
                    start,
                    end,
                })
            }
        }
    }
    Ok(rows)
}

/// Demote annulus zones with no tubing connection back to zone 0.
///
/// A zone survives only if some row in it has a positive device count or a
/// plain perforation; otherwise nothing flows between that annulus and the
/// tubing and the zone is meaningless.
pub fn correct_annulus_zones(rows: &mut [WellSegmentRow]) {
    let mut zones: Vec<u32> = rows
        .iter()
        .map(|row| row.annulus_zone)
        .filter(|&zone| zone != 0)
        .collect();
    zones.sort_unstable();
    zones.dedup();

    for zone in zones {
        let connected = rows.iter().any(|row| {
            row.annulus_zone == zone
                && (row.device_count > 0.0 || row.device_type == DeviceType::Perf)
        });
        if !connected {
            debug!(zone, "annulus zone has no tubing connection; demoting to zone 0");
            for row in rows.iter_mut().filter(|row| row.annulus_zone == zone) {
                row.annulus_zone = 0;
            }
        }
    }
}
