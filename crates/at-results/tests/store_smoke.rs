use at_results::*;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn manifest(run_id: &str, case_id: &str, timestamp: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        case_id: case_id.to_string(),
        timestamp: timestamp.to_string(),
        case_kind: "Conduction".to_string(),
        solver_version: "v1".to_string(),
        files: vec!["temperature.csv".to_string()],
        summary: vec![SummaryValue::new("iterations", 212.0)],
    }
}

#[test]
fn save_and_load_manifest() {
    let store = RunStore::new(unique_temp_dir("at_results_save")).unwrap();
    let m = manifest("run_123", "plate", "2026-10-16T12:00:00Z");

    store.save_manifest(&m).unwrap();
    assert!(store.has_run("run_123"));

    let loaded = store.load_manifest("run_123").unwrap();
    assert_eq!(loaded, m);
}

#[test]
fn missing_run_is_reported() {
    let store = RunStore::new(unique_temp_dir("at_results_missing")).unwrap();
    assert!(matches!(
        store.load_manifest("nope"),
        Err(ResultsError::RunNotFound { .. })
    ));
}

#[test]
fn list_runs_by_case() {
    let store = RunStore::new(unique_temp_dir("at_results_list")).unwrap();

    store
        .save_manifest(&manifest("run2", "plate", "2026-10-16T13:00:00Z"))
        .unwrap();
    store
        .save_manifest(&manifest("run1", "plate", "2026-10-16T12:00:00Z"))
        .unwrap();
    store
        .save_manifest(&manifest("run3", "nozzle", "2026-10-16T14:00:00Z"))
        .unwrap();

    let plate_runs = store.list_runs(Some("plate")).unwrap();
    assert_eq!(plate_runs.len(), 2);
    assert_eq!(plate_runs[0].run_id, "run1");

    assert_eq!(store.list_runs(None).unwrap().len(), 3);

    store.delete_run("run3").unwrap();
    assert!(store.list_runs(Some("nozzle")).unwrap().is_empty());
}

#[test]
fn project_store_lives_next_to_project_file() {
    let project_dir = unique_temp_dir("at_results_project");
    fs::create_dir_all(&project_dir).unwrap();
    let project_path = project_dir.join("project.yaml");

    let store = RunStore::for_project(&project_path).unwrap();
    assert_eq!(
        store.root_dir(),
        project_dir.join(".aerotherm").join("runs").as_path()
    );
    assert!(store.root_dir().exists());
}
