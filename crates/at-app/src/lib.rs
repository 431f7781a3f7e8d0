//! Shared application service layer for aerotherm.
//!
//! Front ends go through this crate to load case files, execute cases and
//! read back stored runs.

pub mod cases;
pub mod error;
pub mod project_service;
pub mod run_service;

pub use cases::{CaseOutput, execute_case};
pub use error::{AppError, AppResult};
pub use project_service::{
    CaseSummary, get_case, list_cases, load_project, save_project, validate_project,
};
pub use run_service::{RunOptions, RunRequest, RunResponse, ensure_run, list_runs, load_run};
