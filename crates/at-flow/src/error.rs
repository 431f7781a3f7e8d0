//! Compressible-flow errors.

use crate::mach::FlowBranch;
use at_core::CoreError;
use thiserror::Error;

/// Result type for flow calculations.
pub type FlowResult<T> = Result<T, FlowError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Invalid argument: {what}")]
    InvalidArgument { what: String },

    /// No Mach number on the requested branch produces this area ratio.
    #[error("No {branch} solution for area ratio {area_ratio}")]
    NoSolution {
        area_ratio: f64,
        branch: FlowBranch,
    },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Numeric error: {0}")]
    Core(#[from] CoreError),
}
