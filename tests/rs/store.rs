//! Integration tests for opening and persisting course stores

use std::fs;
use tempfile::TempDir;
use uni_grades::core::models::{Course, CourseField, FieldValue};
use uni_grades::core::store::{open_store, CourseStore, FileStore, StoreError, MEMORY_URI};

#[test]
fn memory_uri_opens_empty_store() {
    let store = open_store(MEMORY_URI).expect("memory store");
    assert!(store.fetch_all().unwrap().is_empty());
    assert!(store.fetch_field_names().unwrap().is_empty());
}

#[test]
fn unknown_uri_is_unsupported() {
    let err = open_store("mongodb://localhost:27017").err().unwrap();
    assert!(matches!(err, StoreError::Unsupported(_)));
    assert!(open_store("toml://").is_err());
}

#[test]
fn toml_scheme_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.toml");
    let uri = format!("toml://{}", path.display());

    {
        let mut store = open_store(&uri).expect("file store");
        store.insert(&Course::new("Calculus", 1, 7.5, 5)).unwrap();
        store.insert(&Course::new("Physics", 2, 8.0, 10)).unwrap();
        store
            .update_field("Physics", CourseField::Grade, FieldValue::Float(9.0))
            .unwrap();
        store.delete_by_name("Calculus").unwrap();
    }
    assert!(path.exists());

    let reopened = open_store(&uri).unwrap();
    let docs = reopened.fetch_all().unwrap();
    assert_eq!(docs.len(), 1);
    assert!(docs[0].has_name("Physics"));
    assert_eq!(docs[0].get("Grade"), Some(&FieldValue::Float(9.0)));
    assert_eq!(
        reopened.fetch_field_names().unwrap(),
        vec!["Name", "Year", "Grade", "ECTS"]
    );
}

#[test]
fn bare_toml_path_opens_file_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("grades.TOML");

    let mut store = open_store(path.to_str().unwrap()).unwrap();
    store.insert(&Course::new("Databases", 3, 6.0, 5)).unwrap();
    assert!(path.exists(), "missing parent directories are created");
}

#[test]
fn ids_continue_after_existing_documents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.toml");
    fs::write(
        &path,
        r#"
[[courses]]
_id = "00000000000000000000000a"
Name = "Calculus"
Year = 1
Grade = 7.5
ECTS = 5
"#,
    )
    .unwrap();

    let mut store = FileStore::open(&path).unwrap();
    let id = store.insert(&Course::new("Physics", 2, 8.0, 10)).unwrap();
    assert_eq!(id, "00000000000000000000000b");
}

#[test]
fn malformed_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[[courses]\nName = ").unwrap();

    let err = FileStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Format { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn failed_mutations_leave_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("courses.toml");
    let mut store = FileStore::open(&path).unwrap();
    store.insert(&Course::new("Calculus", 1, 7.5, 5)).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    assert!(matches!(
        store.delete_by_name("Ghost"),
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.insert(&Course::new("Calculus", 2, 6.0, 5)),
        Err(StoreError::Duplicate(_))
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}
