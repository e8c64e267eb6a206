//! Core data model for the multi-segment well builder.
//!
//! Everything here is a plain value type. Inputs (completion rows, reservoir
//! cells, trajectory points) arrive from the parsing stage and are read-only
//! to the pipeline; intermediate and output tables are owned `Vec`s produced
//! fresh by each stage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SegmentationError;

// ============================================================================
// Depth intervals
// ============================================================================

/// One `[start, end]` interval along a wellbore's measured-depth axis.
///
/// Invariant: `start <= end`. Zero-length intervals are legal (packers).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MdInterval {
    pub start: f64,
    pub end: f64,
}

impl MdInterval {
    pub fn new(start: f64, end: f64) -> Self {
        debug_assert!(start <= end, "interval start {start} exceeds end {end}");
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.start + self.end)
    }

    /// Signed overlap length with another interval. Negative means disjoint.
    pub fn overlap(&self, other: &Self) -> f64 {
        self.end.min(other.end) - self.start.max(other.start)
    }

    /// Whether this interval covers a segment start at `md`.
    /// Half-open on the deep side: an interval ending exactly at `md` does not cover it.
    pub fn covers_start(&self, md: f64) -> bool {
        self.start <= md && self.end > md
    }

    /// Whether this interval covers a segment end at `md`.
    /// Half-open on the shallow side, mirror of [`covers_start`](Self::covers_start).
    pub fn covers_end(&self, md: f64) -> bool {
        self.start < md && self.end >= md
    }

    pub fn contains(&self, md: f64) -> bool {
        self.start <= md && md <= self.end
    }
}

impl fmt::Display for MdInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Find the indices of the intervals covering `start` and `end`.
///
/// Returns `None` when either depth has no covering interval. The two
/// indices may differ when the span `[start, end]` crosses interval
/// boundaries; callers decide whether that is legal.
pub fn covering_index(intervals: &[MdInterval], start: f64, end: f64) -> Option<(usize, usize)> {
    let first = intervals.iter().position(|iv| iv.covers_start(start))?;
    let last = intervals.iter().position(|iv| iv.covers_end(end))?;
    Some((first, last))
}

// ============================================================================
// Completion design
// ============================================================================

/// Annulus classification of one completion interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnulusContent {
    /// Open annulus (`OA`) — hydraulically connected along the interval.
    #[serde(rename = "OA")]
    OpenAnnulus,
    /// Gravel pack (`GP`) — annulus filled, no distinct zone.
    #[serde(rename = "GP")]
    GravelPack,
    /// Packer (`PA`) — zero-length isolator between zones.
    #[serde(rename = "PA")]
    Packer,
}

/// Inflow-control hardware type assigned to a completion interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceType {
    Aicd,
    Icd,
    Dar,
    Valve,
    Aicv,
    Icv,
    /// Plain perforation, no active device.
    Perf,
}

/// One row of the analyst-authored completion design.
///
/// `annulus_zone` is 0 on input; the annulus-zone assigner fills it in and
/// permanently removes packer rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRow {
    pub interval: MdInterval,
    pub inner_diameter: f64,
    pub outer_diameter: f64,
    pub roughness: f64,
    pub annulus: AnnulusContent,
    pub valves_per_joint: f64,
    pub device_type: DeviceType,
    pub device_number: i32,
    #[serde(default)]
    pub annulus_zone: u32,
}

// ============================================================================
// Reservoir connections
// ============================================================================

/// One reservoir-connection interval (a grid cell pierced by the well).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReservoirCell {
    pub interval: MdInterval,
    /// Pre-existing segment-grouping id, when the input carries one.
    #[serde(default)]
    pub segment_group: Option<i64>,
}

impl ReservoirCell {
    pub fn midpoint(&self) -> f64 {
        self.interval.midpoint()
    }
}

// ============================================================================
// Tubing segments and output rows
// ============================================================================

/// Segmentation strategy for the tubing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// One segment per reservoir connection (honoring grouping ids).
    #[serde(alias = "CELLS")]
    Cells,
    /// One segment per completion-design interval.
    #[serde(alias = "USER")]
    User,
    /// Constant-length segments across the reservoir extent.
    #[serde(alias = "FIX")]
    Fix,
    /// Segments derived from the wellbore segment tree midpoints.
    #[serde(alias = "WELSEGS")]
    Welsegs,
}

impl FromStr for Method {
    type Err = SegmentationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cells" => Ok(Self::Cells),
            "user" => Ok(Self::User),
            "fix" => Ok(Self::Fix),
            "welsegs" => Ok(Self::Welsegs),
            _ => Err(SegmentationError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cells => "cells",
            Self::User => "user",
            Self::Fix => "fix",
            Self::Welsegs => "welsegs",
        };
        f.write_str(name)
    }
}

/// Origin of a tubing segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// Produced by the chosen segmentation strategy.
    Original,
    /// Synthesized by the gap filler for unconnected depth ranges.
    Additional,
}

/// One interval of the tubing layer with its interpolated midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubingSegment {
    pub interval: MdInterval,
    /// Midpoint measured depth.
    pub md: f64,
    /// True vertical depth at the midpoint, from the trajectory.
    pub tvd: f64,
    pub kind: SegmentKind,
}

/// Final per-segment output row, ready for the formatting stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellSegmentRow {
    pub md: f64,
    pub tvd: f64,
    pub length: f64,
    pub kind: SegmentKind,
    /// Accumulated device count over the segment, fractional by design.
    pub device_count: f64,
    pub device_type: DeviceType,
    pub device_number: i32,
    pub inner_diameter: f64,
    /// Annular-area-equivalent outer diameter, `sqrt(outer^2 - inner^2)`.
    pub outer_diameter: f64,
    pub roughness: f64,
    pub annulus_zone: u32,
    pub scaling_factor: f64,
}

/// Association of one reservoir cell with its owning final segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellLink {
    pub cell: MdInterval,
    /// Cell midpoint measured depth.
    pub md: f64,
    /// Index into the final segment table.
    pub segment_index: usize,
    pub segment_md: f64,
    pub device_count: f64,
    pub device_type: DeviceType,
    pub annulus_zone: u32,
}
