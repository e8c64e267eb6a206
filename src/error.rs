//! Error taxonomy for the segmentation pipeline.
//!
//! Two classes of fatal error exist: configuration errors (bad method,
//! bad lengths, impossible geometry) and data-consistency errors (the case
//! and schedule inputs disagree in a way no segment table can reconcile).
//! Both abort the per-well pipeline; messages carry well name, branch and
//! depth range so the failing input row can be located. Data-quality issues
//! such as zero-length overlaps are logged as warnings and never raised.

use thiserror::Error;

/// Fatal errors raised while building a multi-segment well model.
#[derive(Debug, Error)]
pub enum SegmentationError {
    #[error("Unknown segmentation method '{0}'.")]
    UnknownMethod(String),

    #[error("Segment length must be positive when using the fix method (was {0}).")]
    InvalidFixLength(f64),

    #[error("Minimum segment length must be non-negative (was {0}).")]
    InvalidMinimumLength(f64),

    #[error(
        "Check screen/tubing and well/casing diameters for well {well}: \
         outer diameter {outer} must exceed inner diameter {inner}."
    )]
    InvalidDiameters {
        well: String,
        outer: f64,
        inner: f64,
    },

    #[error(
        "Schedule data is missing segments for well {well} branch {branch}. \
         Check that every branch in the case file has reservoir connections."
    )]
    EmptySegments { well: String, branch: i32 },

    #[error(
        "Could not determine a unique annulus zone for completion interval \
         {start}-{end} on well {well}."
    )]
    AnnulusZoneContainment {
        well: String,
        start: f64,
        end: f64,
    },

    #[error("No completion is defined on well {well} branch {branch} from {start} to {end}.")]
    MissingCompletion {
        well: String,
        branch: i32,
        start: f64,
        end: f64,
    },

    #[error(
        "Completion data for well {well} contains invalid rows covering {start}-{end}; \
         check that their start measured depth lies above their end."
    )]
    InvalidCompletionRows {
        well: String,
        start: f64,
        end: f64,
    },

    #[error(
        "Internal invariant violated for well {well}: completion coverage indices \
         inverted over {start}-{end}."
    )]
    CoverageIndexInverted {
        well: String,
        start: f64,
        end: f64,
    },
}

impl SegmentationError {
    /// True for errors caused by the run configuration rather than the data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownMethod(_)
                | Self::InvalidFixLength(_)
                | Self::InvalidMinimumLength(_)
                | Self::InvalidDiameters { .. }
        )
    }

    /// True for errors caused by inconsistent case/schedule input data.
    pub fn is_data_consistency(&self) -> bool {
        !self.is_configuration()
    }
}

/// Convenience alias used throughout the pipeline.
pub type Result<T> = std::result::Result<T, SegmentationError>;
