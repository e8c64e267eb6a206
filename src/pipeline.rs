//! Per-well pipeline driver.
//!
//! Runs the eight stages in dependency order for one well/branch: trajectory,
//! annulus zones, tubing segmentation, gap filling, completion aggregation,
//! lumping, zone correction, cell linkage. Each lateral is an independent
//! unit of work over its own owned tables; processing distinct laterals in
//! parallel is the caller's choice.

use tracing::{debug, info};

use crate::aggregate::aggregate_completion;
use crate::annulus::{assign_annulus_zones, correct_annulus_zones};
use crate::config::CaseConfig;
use crate::error::Result;
use crate::gaps::fill_gaps;
use crate::linkage::connect_cells_to_segments;
use crate::lumping::lump_segments;
use crate::segmentation::create_tubing_segments;
use crate::trajectory::{Trajectory, TrajectoryPoint};
use crate::types::{
    AnnulusContent, CellLink, CompletionRow, DeviceType, Method, ReservoirCell, WellSegmentRow,
};

/// Parsed inputs for one well branch.
#[derive(Debug, Clone)]
pub struct LateralInput {
    pub well: String,
    pub branch: i32,
    /// Completion design rows for this branch, sorted by start MD.
    pub completion: Vec<CompletionRow>,
    /// Wellbore segment-tree header record.
    pub welsegs_header: TrajectoryPoint,
    /// Wellbore segment-tree content records (absolute depths).
    pub welsegs_content: Vec<TrajectoryPoint>,
    /// Reservoir-connection intervals for this branch, sorted by start MD.
    pub reservoir: Vec<ReservoirCell>,
}

/// Fully resolved model for one well branch.
#[derive(Debug, Clone)]
pub struct LateralModel {
    pub well: String,
    pub branch: i32,
    /// Final tubing segment table, ready for the formatting stage.
    pub segments: Vec<WellSegmentRow>,
    /// Reservoir cells joined to their owning segments.
    pub links: Vec<CellLink>,
}

/// Build the resolved segment model for one well branch.
pub fn build_lateral(input: &LateralInput, config: &CaseConfig) -> Result<LateralModel> {
    debug!(well = %input.well, branch = input.branch, "building lateral model");

    let trajectory = Trajectory::build(&input.well, input.welsegs_header, &input.welsegs_content);
    let completion = assign_annulus_zones(&input.well, &input.completion)?;
    let method = effective_method(&completion, config.method);

    let segments =
        create_tubing_segments(&input.reservoir, &completion, &trajectory, method, config)?;
    let segments = fill_gaps(&input.well, input.branch, segments, &trajectory)?;

    let rows = aggregate_completion(
        &input.well,
        input.branch,
        &segments,
        &completion,
        config.joint_length,
    )?;
    let mut rows = lump_segments(rows);
    correct_annulus_zones(&mut rows);

    let links = connect_cells_to_segments(&input.reservoir, &rows, &segments, method);

    info!(
        well = %input.well,
        branch = input.branch,
        segments = rows.len(),
        cells = links.len(),
        "lateral model complete"
    );
    Ok(LateralModel {
        well: input.well.clone(),
        branch: input.branch,
        segments: rows,
        links,
    })
}

/// Build every branch of one well, in branch order.
pub fn build_well(laterals: &[LateralInput], config: &CaseConfig) -> Result<Vec<LateralModel>> {
    laterals
        .iter()
        .map(|input| build_lateral(input, config))
        .collect()
}

/// Whether this well needs a device layer at all.
///
/// A completion that is entirely gravel-packed perforations is left alone
/// unless the case explicitly asks for a device layer on such wells.
pub fn is_active_well(completion: &[CompletionRow], gp_perf_devicelayer: bool) -> bool {
    if gp_perf_devicelayer {
        return true;
    }
    completion.iter().any(|row| {
        row.annulus == AnnulusContent::OpenAnnulus || row.device_type != DeviceType::Perf
    })
}

/// ICV completions always lump to the design grid: when every completion row
/// carries an inflow-control valve, the `user` strategy overrides the
/// configured method for segmentation and linkage alike.
fn effective_method(completion: &[CompletionRow], configured: Method) -> Method {
    if !completion.is_empty()
        && completion
            .iter()
            .all(|row| row.device_type == DeviceType::Icv)
    {
        return Method::User;
    }
    configured
}
