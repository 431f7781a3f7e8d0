//! Error types for conduction operations.

use at_core::CoreError;
use at_results::ResultsError;
use thiserror::Error;

/// Errors that can occur while setting up or post-processing a conduction solve.
///
/// Failing to reach the tolerance is not an error: the solution reports its
/// iteration count and final sweep error instead.
#[derive(Error, Debug)]
pub enum ConductionError {
    #[error("Invalid argument: {what}")]
    InvalidArgument { what: String },

    #[error("Numeric error: {0}")]
    Core(#[from] CoreError),

    #[error("Export error: {0}")]
    Export(#[from] ResultsError),
}

pub type ConductionResult<T> = Result<T, ConductionError>;

impl ConductionError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        Self::InvalidArgument { what: what.into() }
    }
}
