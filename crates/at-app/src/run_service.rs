//! Run execution and caching service.

use at_results::{RunManifest, RunStore, compute_run_id, timestamp_now};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use crate::cases::execute_case;
use crate::error::{AppError, AppResult};
use crate::project_service;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub solver_version: String,
    /// Store runs here instead of next to the project file.
    pub store_dir: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            solver_version: env!("CARGO_PKG_VERSION").to_string(),
            store_dir: None,
        }
    }
}

pub struct RunRequest<'a> {
    pub project_path: &'a Path,
    pub case_id: &'a str,
    pub options: RunOptions,
}

#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    /// Directory holding the manifest and output files
    pub run_dir: PathBuf,
    pub loaded_from_cache: bool,
    pub elapsed_s: f64,
}

fn open_store(project_path: &Path, options: &RunOptions) -> AppResult<RunStore> {
    let store = match &options.store_dir {
        Some(dir) => RunStore::new(dir.clone())?,
        None => RunStore::for_project(project_path)?,
    };
    Ok(store)
}

/// Execute a case, or load it from the store when an identical run exists.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    let started = Instant::now();

    let project = project_service::load_project(request.project_path)?;
    project_service::validate_project(&project)?;
    let case = project_service::get_case(&project, request.case_id)?;

    let run_id = compute_run_id(case, &request.options.solver_version);
    let store = open_store(request.project_path, &request.options)?;

    if request.options.use_cache && store.has_run(&run_id) {
        let manifest = store.load_manifest(&run_id)?;
        info!(run_id = %run_id, case_id = request.case_id, "loaded cached run");
        return Ok(RunResponse {
            run_dir: store.run_dir(&run_id),
            run_id,
            manifest,
            loaded_from_cache: true,
            elapsed_s: started.elapsed().as_secs_f64(),
        });
    }

    // Stale files from an earlier run with the same id must not linger.
    store.delete_run(&run_id)?;
    let run_dir = store.prepare_run_dir(&run_id)?;
    let output = execute_case(&case.kind, Some(&run_dir))?;

    let manifest = RunManifest {
        run_id: run_id.clone(),
        case_id: case.id.clone(),
        timestamp: timestamp_now(),
        case_kind: case.kind.type_name().to_string(),
        solver_version: request.options.solver_version.clone(),
        files: output.files,
        summary: output.summary,
    };
    store.save_manifest(&manifest)?;

    let elapsed_s = started.elapsed().as_secs_f64();
    info!(run_id = %run_id, case_id = request.case_id, elapsed_s, "run completed");

    Ok(RunResponse {
        run_id,
        manifest,
        run_dir,
        loaded_from_cache: false,
        elapsed_s,
    })
}

/// Stored runs for a project, oldest first.
pub fn list_runs(
    project_path: &Path,
    case_id: Option<&str>,
    options: &RunOptions,
) -> AppResult<Vec<RunManifest>> {
    let store = open_store(project_path, options)?;
    Ok(store.list_runs(case_id)?)
}

pub fn load_run(project_path: &Path, run_id: &str, options: &RunOptions) -> AppResult<RunManifest> {
    let store = open_store(project_path, options)?;
    if !store.has_run(run_id) {
        return Err(AppError::RunNotFound(run_id.to_string()));
    }
    Ok(store.load_manifest(run_id)?)
}
