//! mswell: multi-segment well completion segmentation engine.
//!
//! Converts an analyst-authored completion design plus a reservoir
//! simulator's wellbore description (segment tree and connection intervals,
//! indexed by measured depth) into a fully resolved multi-segment well
//! model: tubing segments, per-segment device counts and scaling factors,
//! and annulus-zone connectivity, ready for an external formatting stage.
//!
//! ## Pipeline
//!
//! - **Trajectory**: MD→TVD relation from the wellbore segment tree
//! - **Annulus zones**: packer/gravel-pack partitioning of the design
//! - **Tubing segmentation**: four strategies (`cells`, `user`, `fix`, `welsegs`)
//! - **Gap filling**: synthetic segments for unconnected depth ranges
//! - **Aggregation**: per-segment device counts and geometry
//! - **Lumping / zone correction**: fold fillers, demote dead zones
//! - **Cell linkage**: reservoir connections joined to final segments

pub mod aggregate;
pub mod annulus;
pub mod config;
pub mod depth;
pub mod error;
pub mod gaps;
pub mod linkage;
pub mod lumping;
pub mod pipeline;
pub mod segmentation;
pub mod trajectory;
pub mod types;

// Re-export the configuration and error types
pub use config::{CaseConfig, ConfigError};
pub use error::{Result, SegmentationError};

// Re-export the data model
pub use types::{
    AnnulusContent, CellLink, CompletionRow, DeviceType, MdInterval, Method, ReservoirCell,
    SegmentKind, TubingSegment, WellSegmentRow,
};

// Re-export the pipeline entry points
pub use pipeline::{build_lateral, build_well, is_active_well, LateralInput, LateralModel};
pub use trajectory::{Trajectory, TrajectoryPoint};
