//! Project loading, saving, validation, and introspection.

use at_project::schema::{CaseDef, Project};
use std::path::Path;

use crate::error::{AppError, AppResult};

/// One line of `cases` output.
#[derive(Debug, Clone)]
pub struct CaseSummary {
    pub id: String,
    pub name: String,
    pub kind: &'static str,
}

/// Load a project from YAML without validating it.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ProjectFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let project: Project = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Project(format!("Failed to parse project YAML: {}", e)))?;

    Ok(project)
}

pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    validate_project(project)?;
    let content = serde_yaml::to_string(project)
        .map_err(|e| AppError::Project(format!("Failed to serialize project: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::ProjectFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

pub fn validate_project(project: &Project) -> AppResult<()> {
    at_project::validate_project(project)?;
    Ok(())
}

pub fn list_cases(project: &Project) -> Vec<CaseSummary> {
    project
        .cases
        .iter()
        .map(|case| CaseSummary {
            id: case.id.clone(),
            name: case.name.clone(),
            kind: case.kind.type_name(),
        })
        .collect()
}

pub fn get_case<'a>(project: &'a Project, case_id: &str) -> AppResult<&'a CaseDef> {
    project
        .case(case_id)
        .ok_or_else(|| AppError::CaseNotFound(case_id.to_string()))
}
