use std::path::PathBuf;

#[test]
fn demo_projects_validate() {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = crate_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root");

    let path = root.join("demos/projects/coursework.yaml");
    let project = at_project::load_yaml(&path)
        .unwrap_or_else(|e| panic!("demo failed validation: {} => {}", path.display(), e));

    assert_eq!(project.cases.len(), 6);
    let kinds: Vec<&str> = project.cases.iter().map(|c| c.kind.type_name()).collect();
    assert_eq!(
        kinds,
        vec!["Conduction", "Refinement", "Nozzle", "Combustion", "CeaReference", "MaskedField"]
    );
}
