//! Error types for the at-app service layer.

use std::path::PathBuf;

/// Backend errors flattened to strings for the front ends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read project file: {path}")]
    ProjectFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write project file: {path}")]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Case not found: {0}")]
    CaseNotFound(String),

    #[error("Conduction error: {0}")]
    Conduction(String),

    #[error("Flow error: {0}")]
    Flow(String),

    #[error("Combustion error: {0}")]
    Combustion(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<at_project::ProjectError> for AppError {
    fn from(err: at_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<at_project::ValidationError> for AppError {
    fn from(err: at_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<at_conduction::ConductionError> for AppError {
    fn from(err: at_conduction::ConductionError) -> Self {
        AppError::Conduction(err.to_string())
    }
}

impl From<at_flow::FlowError> for AppError {
    fn from(err: at_flow::FlowError) -> Self {
        AppError::Flow(err.to_string())
    }
}

impl From<at_combustion::CombustionError> for AppError {
    fn from(err: at_combustion::CombustionError) -> Self {
        AppError::Combustion(err.to_string())
    }
}

impl From<at_core::CoreError> for AppError {
    fn from(err: at_core::CoreError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<at_results::ResultsError> for AppError {
    fn from(err: at_results::ResultsError) -> Self {
        match err {
            at_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
