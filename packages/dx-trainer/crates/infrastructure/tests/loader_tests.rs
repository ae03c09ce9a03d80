use domain::CatalogLoadError;
use infrastructure::TemplateDirectory;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn template_json(name: &str, prior: f64) -> String {
    format!(
        r#"{{
            "name": "{name}",
            "prior": {prior},
            "demographics": {{
                "age": {{"mean": 40, "std": 12}},
                "sex_distribution": {{"male": 0.5, "female": 0.5}},
                "race_distribution": {{"white": 1.0}}
            }},
            "symptoms": {{"fever": {{"probability": 0.5}}}},
            "vitals": {{"pulse": {{"mean": 90, "std": 10}}}},
            "diagnostic_tests": {{
                "CRP": {{"Binary": true, "sensitivity": 0.8, "specificity": 0.6}}
            }}
        }}"#
    )
}

fn shipped_templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../../data/digestive-diseases")
}

#[test]
fn test_load_directory_sorted_by_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.json"), template_json("Gastritis", 0.4)).unwrap();
    fs::write(dir.path().join("a.json"), template_json("Ulcer", 0.6)).unwrap();
    fs::write(dir.path().join("README.md"), "not a template").unwrap();
    fs::write(dir.path().join(".draft.json"), "{ broken").unwrap();

    let catalog = TemplateDirectory::new(dir.path()).load().unwrap();

    assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Gastritis", "Ulcer"]);
}

#[test]
fn test_mixed_formats() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("gastritis.json"), template_json("Gastritis", 0.5)).unwrap();
    fs::write(
        dir.path().join("ulcer.yaml"),
        r#"
name: Peptic Ulcer
prior: 0.5
demographics:
  age: { mean: 45, std: 15 }
  sex_distribution: { male: 0.6, female: 0.4 }
  race_distribution: { white: 1.0 }
diagnostic_tests:
  CRP: { Binary: true, sensitivity: 0.3, specificity: 0.6 }
"#,
    )
    .unwrap();

    let catalog = TemplateDirectory::new(dir.path()).load().unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(catalog.get("Peptic Ulcer").is_some());
}

#[test]
fn test_subdirectories_need_recursive() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("top.json"), template_json("Gastritis", 0.5)).unwrap();
    fs::create_dir(dir.path().join("more")).unwrap();
    fs::write(dir.path().join("more/nested.json"), template_json("Ulcer", 0.5)).unwrap();

    assert_eq!(TemplateDirectory::new(dir.path()).load().unwrap().len(), 1);
    assert_eq!(
        TemplateDirectory::new(dir.path())
            .recursive(true)
            .load()
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn test_missing_field_fails() {
    let dir = tempdir().unwrap();
    let broken = template_json("Gastritis", 0.5).replace(r#""prior": 0.5,"#, "");
    fs::write(dir.path().join("gastritis.json"), broken).unwrap();

    let err = TemplateDirectory::new(dir.path()).load().unwrap_err();
    match err {
        CatalogLoadError::Unreadable { origin, message } => {
            assert!(origin.ends_with("gastritis.json"));
            assert!(message.contains("prior"), "message was: {}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_name_collision_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.json"), template_json("Gastritis", 0.5)).unwrap();
    fs::write(dir.path().join("b.json"), template_json("GASTRITIS", 0.5)).unwrap();

    assert!(matches!(
        TemplateDirectory::new(dir.path()).load(),
        Err(CatalogLoadError::DuplicateName(_))
    ));
}

#[test]
fn test_invalid_values_fail() {
    let dir = tempdir().unwrap();
    let bad = template_json("Gastritis", 0.5).replace(r#""probability": 0.5"#, r#""probability": 5"#);
    fs::write(dir.path().join("a.json"), bad).unwrap();

    assert!(matches!(
        TemplateDirectory::new(dir.path()).load(),
        Err(CatalogLoadError::InvalidTemplate { .. })
    ));
}

#[test]
fn test_empty_and_missing_directories() {
    let dir = tempdir().unwrap();
    assert_eq!(
        TemplateDirectory::new(dir.path()).load().unwrap_err(),
        CatalogLoadError::Empty
    );
    assert!(matches!(
        TemplateDirectory::new(dir.path().join("nope")).load(),
        Err(CatalogLoadError::Unreadable { .. })
    ));
}

#[test]
fn test_shipped_catalog_loads() {
    let catalog = TemplateDirectory::new(shipped_templates()).load().unwrap();

    assert_eq!(catalog.len(), 5);
    let priors = catalog.normalized_priors().unwrap();
    assert!((priors.values().sum::<f64>() - 1.0).abs() < 1e-9);
    assert_eq!(
        catalog.available_tests(),
        vec![
            "Abdominal_Ultrasound",
            "CRP",
            "CT_Scan",
            "Hyponatremia",
            "MRI",
            "WBC_Count"
        ]
    );
}
