use std::path::{Path, PathBuf};

use at_app::{RunOptions, RunRequest, load_run, run_service};
use at_project::schema::{CaseDef, CaseKindDef, Project};

fn write_project(dir: &Path) -> PathBuf {
    let _ = std::fs::remove_dir_all(dir);
    std::fs::create_dir_all(dir).unwrap();

    let project = Project {
        version: at_project::LATEST_VERSION,
        name: "Persistence".to_string(),
        cases: vec![
            CaseDef {
                id: "plate".to_string(),
                name: "Plate".to_string(),
                kind: CaseKindDef::Conduction {
                    nx: 10,
                    ny: 10,
                    domain_length_m: 0.25,
                    left_value: 600.0,
                    top_value: 150.0,
                    tolerance: 1e-6,
                    max_iterations: 10_000,
                    flux: None,
                },
            },
            CaseDef {
                id: "cea".to_string(),
                name: "CEA".to_string(),
                kind: CaseKindDef::CeaReference {
                    expansion_ratio: 25.0,
                },
            },
        ],
    };

    let path = dir.join("project.yaml");
    at_project::save_yaml(&path, &project).unwrap();
    path
}

#[test]
fn run_is_stored_and_then_served_from_cache() {
    let dir = std::env::temp_dir().join("at_app_run_persistence");
    let project_path = write_project(&dir);

    let request = RunRequest {
        project_path: &project_path,
        case_id: "plate",
        options: RunOptions::default(),
    };

    let first = run_service::ensure_run(&request).unwrap();
    assert!(!first.loaded_from_cache);
    assert!(first.run_dir.starts_with(dir.join(".aerotherm").join("runs")));
    assert!(first.run_dir.join("temperature.csv").exists());
    assert_eq!(first.manifest.case_kind, "Conduction");

    let second = run_service::ensure_run(&request).unwrap();
    assert!(second.loaded_from_cache);
    assert_eq!(first.run_id, second.run_id);
    assert_eq!(first.manifest.files, second.manifest.files);
    assert_eq!(first.manifest.timestamp, second.manifest.timestamp);

    let runs = run_service::list_runs(&project_path, Some("plate"), &RunOptions::default()).unwrap();
    assert_eq!(runs.len(), 1);

    let loaded = load_run(&project_path, &first.run_id, &RunOptions::default()).unwrap();
    assert_eq!(loaded.run_id, first.run_id);
}

#[test]
fn cea_case_writes_every_table() {
    let dir = std::env::temp_dir().join("at_app_cea_case");
    let project_path = write_project(&dir);

    let request = RunRequest {
        project_path: &project_path,
        case_id: "cea",
        options: RunOptions {
            use_cache: false,
            ..RunOptions::default()
        },
    };
    let response = run_service::ensure_run(&request).unwrap();

    for name in [
        "cea_results_equilibrium.csv",
        "cea_results_frozen.csv",
        "combustion_results.csv",
        "comparison_y_oh.csv",
    ] {
        assert!(response.manifest.files.iter().any(|f| f == name), "{name}");
        assert!(response.run_dir.join(name).exists(), "{name}");
    }
}

#[test]
fn unknown_case_and_run_are_reported() {
    let dir = std::env::temp_dir().join("at_app_unknown_case");
    let project_path = write_project(&dir);

    let request = RunRequest {
        project_path: &project_path,
        case_id: "missing",
        options: RunOptions::default(),
    };
    assert!(matches!(
        run_service::ensure_run(&request),
        Err(at_app::AppError::CaseNotFound(_))
    ));
    assert!(matches!(
        load_run(&project_path, "deadbeef", &RunOptions::default()),
        Err(at_app::AppError::RunNotFound(_))
    ));
}
