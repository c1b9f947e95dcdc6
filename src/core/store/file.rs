//! Store persisted as a TOML file of `[[courses]]` tables
//!
//! The whole file is read once when the store is opened and rewritten after
//! every successful mutation. Writes go to a sibling temporary file that is
//! then renamed over the existing one, so a crash never leaves a half-written
//! file behind.

use super::{Collection, CourseStore, StoreError};
use crate::core::models::{Course, CourseField, Document, FieldValue};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CourseFile {
    #[serde(default)]
    courses: Vec<Document>,
}

/// Course store backed by a TOML file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    collection: Collection,
}

impl FileStore {
    /// Open the store at `path`; a missing file is an empty store
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let documents = if path.exists() {
            let text = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            let file: CourseFile = toml::from_str(&text).map_err(|e| StoreError::Format {
                path: path.clone(),
                message: e.to_string(),
            })?;
            file.courses
        } else {
            crate::debug!("{} does not exist yet, starting empty", path.display());
            Vec::new()
        };

        Ok(Self {
            path,
            collection: Collection::from_documents(documents),
        })
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        let file = CourseFile {
            courses: self.collection.documents().to_vec(),
        };
        let text = toml::to_string_pretty(&file).map_err(|e| StoreError::Format {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let io_error = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);
        fs::write(&temp_path, text).map_err(io_error)?;
        fs::rename(&temp_path, &self.path).map_err(io_error)?;

        crate::debug!(
            "Wrote {} courses to {}",
            self.collection.documents().len(),
            self.path.display()
        );
        Ok(())
    }

    /// Run a mutation and persist it, restoring the previous state if writing fails
    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut Collection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let before = self.collection.clone();
        let result = op(&mut self.collection)?;
        if let Err(e) = self.persist() {
            self.collection = before;
            return Err(e);
        }
        Ok(result)
    }
}

impl CourseStore for FileStore {
    fn fetch_all(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.collection.documents().to_vec())
    }

    fn fetch_field_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.collection.field_names())
    }

    fn insert(&mut self, course: &Course) -> Result<String, StoreError> {
        self.mutate(|collection| collection.insert(course))
    }

    fn update_field(
        &mut self,
        name: &str,
        field: CourseField,
        value: FieldValue,
    ) -> Result<(), StoreError> {
        self.mutate(|collection| collection.update_field(name, field, value))
    }

    fn delete_by_name(&mut self, name: &str) -> Result<(), StoreError> {
        self.mutate(|collection| collection.delete_by_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("courses.toml")).unwrap();
        assert!(store.fetch_all().unwrap().is_empty());
        assert!(store.fetch_field_names().unwrap().is_empty());
    }

    #[test]
    fn test_mutations_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("courses.toml");

        let mut store = FileStore::open(&path).unwrap();
        let id = store.insert(&Course::new("Calculus", 1, 7.5, 5)).unwrap();
        store.insert(&Course::new("Physics", 2, 8.0, 10)).unwrap();
        store
            .update_field("Calculus", CourseField::Grade, FieldValue::Float(9.0))
            .unwrap();
        store.delete_by_name("Physics").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        let docs = reopened.fetch_all().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id(), Some(id.as_str()));
        assert_eq!(docs[0].get("Grade"), Some(&FieldValue::Float(9.0)));
        assert_eq!(
            reopened.fetch_field_names().unwrap(),
            CourseField::default_headers()
        );
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_hand_written_file_keeps_loose_types() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("courses.toml");
        fs::write(
            &path,
            "[[courses]]\nName = \"Statistics\"\nYear = \"2\"\nGrade = 8\nECTS = 5.0\n",
        )
        .unwrap();

        let store = FileStore::open(&path).unwrap();
        let docs = store.fetch_all().unwrap();
        assert_eq!(docs[0].get("Year"), Some(&FieldValue::from("2")));
        assert_eq!(docs[0].get("Grade"), Some(&FieldValue::Int(8)));
        assert!(docs[0].id().is_none());
    }

    #[test]
    fn test_malformed_file_is_a_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("courses.toml");
        fs::write(&path, "courses = 3").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(StoreError::Format { .. })
        ));
    }

    #[test]
    fn test_failed_mutation_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("courses.toml");
        let mut store = FileStore::open(&path).unwrap();
        store.insert(&Course::new("Calculus", 1, 7.5, 5)).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        assert!(store.delete_by_name("Ghost").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }
}
