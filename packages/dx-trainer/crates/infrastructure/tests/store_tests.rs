use domain::{CaseGenerator, CaseStore, StoreError, TestSimulator};
use infrastructure::{FileCaseStore, InMemoryCaseStore, TemplateDirectory};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn sample_case() -> domain::Case {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../../data/digestive-diseases");
    let catalog = TemplateDirectory::new(dir).load().unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let mut case = CaseGenerator::generate(&catalog, &mut rng).unwrap();
    TestSimulator::run_test(&catalog, &mut case, "WBC_Count", &mut rng).unwrap();
    case
}

fn exercise(store: &dyn CaseStore) {
    let case = sample_case();

    assert_eq!(store.load("ward-1").unwrap(), None);
    store.save("ward-1", &case).unwrap();
    assert_eq!(store.load("ward-1").unwrap(), Some(case.clone()));
    assert_eq!(store.load("ward-2").unwrap(), None);

    assert!(store.remove("ward-1").unwrap());
    assert!(!store.remove("ward-1").unwrap());
    assert_eq!(store.load("ward-1").unwrap(), None);
}

#[test]
fn test_in_memory_store() {
    let store = InMemoryCaseStore::new();
    exercise(&store);
    assert!(store.is_empty());
}

#[test]
fn test_file_store() {
    let dir = tempdir().unwrap();
    let store = FileCaseStore::new(dir.path().join("cases"));
    exercise(&store);
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let case = sample_case();

    FileCaseStore::new(dir.path().to_path_buf())
        .save("default", &case)
        .unwrap();
    let reopened = FileCaseStore::new(dir.path().to_path_buf());

    assert_eq!(reopened.load("default").unwrap(), Some(case));
}

#[test]
fn test_file_store_reports_corruption() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("default.json"), "{\"hidden_disease\": 3}").unwrap();
    let store = FileCaseStore::new(dir.path().to_path_buf());

    assert!(matches!(store.load("default"), Err(StoreError::Corrupt(_))));
    assert!(matches!(
        store.save("../escape", &sample_case()),
        Err(StoreError::InvalidSession(_))
    ));
}

#[test]
fn test_in_memory_store_is_shareable_across_threads() {
    let store = Arc::new(InMemoryCaseStore::new());
    let case = sample_case();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            let case = case.clone();
            std::thread::spawn(move || store.save(&format!("session-{}", i), &case).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 4);
}

#[test]
fn test_file_store_replaces_case_without_leftovers() {
    let dir = tempdir().unwrap();
    let store = FileCaseStore::new(dir.path().to_path_buf());
    let first = sample_case();
    let mut second = first.clone();
    second.test_results.clear();

    store.save("default", &first).unwrap();
    store.save("default", &second).unwrap();

    assert_eq!(store.load("default").unwrap(), Some(second));
    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files, vec!["default.json".to_string()]);
}
