//! Course store
//!
//! The dashboard only talks to persistence through [`CourseStore`]. Both
//! implementations share [`Collection`], which owns the name-keyed
//! matched-count semantics: updates and deletes address the first document
//! whose `Name` equals the given name exactly and fail with
//! [`StoreError::NotFound`] when nothing matched.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::core::models::{Course, CourseField, Document, FieldValue};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// URI that selects the in-memory store
pub const MEMORY_URI: &str = "memory:";

/// URI prefix that selects the TOML file store
pub const TOML_SCHEME: &str = "toml://";

/// Failures reported by a course store
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document matched the given name
    #[error("course '{0}' not found")]
    NotFound(String),
    /// A document with this name already exists
    #[error("course '{0}' already exists")]
    Duplicate(String),
    /// Reading or writing the backing file failed
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The backing file exists but is not a valid course document file
    #[error("malformed course file {}: {message}", path.display())]
    Format {
        /// File that failed to parse or serialize
        path: PathBuf,
        /// Parser message
        message: String,
    },
    /// The connection string names no known store
    #[error("unsupported store URI '{0}' (expected 'memory:', 'toml://<path>' or a .toml path)")]
    Unsupported(String),
}

/// Persistent collection of course documents
pub trait CourseStore {
    /// Every stored document, in store order
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn fetch_all(&self) -> Result<Vec<Document>, StoreError>;

    /// Field names of the first stored document; empty when there are no documents
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn fetch_field_names(&self) -> Result<Vec<String>, StoreError>;

    /// Store a new course and return its assigned identifier
    ///
    /// # Errors
    /// Returns [`StoreError::Duplicate`] if the name is taken, or a storage error.
    fn insert(&mut self, course: &Course) -> Result<String, StoreError>;

    /// Overwrite one field of the course called `name`
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no course matched, [`StoreError::Duplicate`]
    /// when renaming onto an existing name, or a storage error.
    fn update_field(
        &mut self,
        name: &str,
        field: CourseField,
        value: FieldValue,
    ) -> Result<(), StoreError>;

    /// Remove the course called `name`
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no course matched, or a storage error.
    fn delete_by_name(&mut self, name: &str) -> Result<(), StoreError>;
}

impl<S: CourseStore + ?Sized> CourseStore for Box<S> {
    fn fetch_all(&self) -> Result<Vec<Document>, StoreError> {
        (**self).fetch_all()
    }

    fn fetch_field_names(&self) -> Result<Vec<String>, StoreError> {
        (**self).fetch_field_names()
    }

    fn insert(&mut self, course: &Course) -> Result<String, StoreError> {
        (**self).insert(course)
    }

    fn update_field(
        &mut self,
        name: &str,
        field: CourseField,
        value: FieldValue,
    ) -> Result<(), StoreError> {
        (**self).update_field(name, field, value)
    }

    fn delete_by_name(&mut self, name: &str) -> Result<(), StoreError> {
        (**self).delete_by_name(name)
    }
}

/// In-memory document collection shared by the store implementations
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    documents: Vec<Document>,
    next_id: u64,
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl Collection {
    /// Create an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            documents: Vec::new(),
            next_id: 1,
        }
    }

    /// Wrap documents loaded from storage; new ids continue after the largest existing one
    #[must_use]
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let highest = documents
            .iter()
            .filter_map(|doc| doc.id())
            .filter_map(|id| u64::from_str_radix(id, 16).ok())
            .max()
            .unwrap_or(0);
        Self {
            documents,
            next_id: highest.saturating_add(1),
        }
    }

    /// Stored documents in insertion order
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Field names of the first document
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        self.documents
            .first()
            .map(|doc| doc.field_names().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.documents.iter().position(|doc| doc.has_name(name))
    }

    /// Append a course under a fresh 24-hex-digit id
    ///
    /// # Errors
    /// Returns [`StoreError::Duplicate`] if a course with the same name exists.
    pub fn insert(&mut self, course: &Course) -> Result<String, StoreError> {
        if self.position(&course.name).is_some() {
            return Err(StoreError::Duplicate(course.name.clone()));
        }
        let id = format!("{:024x}", self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        let mut document = course.to_document();
        document.set_id(id.clone());
        self.documents.push(document);
        Ok(id)
    }

    /// Set one field of the first course called `name`
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if nothing matched, or
    /// [`StoreError::Duplicate`] when a rename would collide with another course.
    pub fn update_field(
        &mut self,
        name: &str,
        field: CourseField,
        value: FieldValue,
    ) -> Result<(), StoreError> {
        let index = self
            .position(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        if field == CourseField::Name {
            let new_name = value.to_string();
            let collides = self
                .documents
                .iter()
                .enumerate()
                .any(|(other, doc)| other != index && doc.has_name(&new_name));
            if collides {
                return Err(StoreError::Duplicate(new_name));
            }
        }

        self.documents[index].set(field.as_str(), value);
        Ok(())
    }

    /// Remove the first course called `name`
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if nothing matched.
    pub fn delete_by_name(&mut self, name: &str) -> Result<(), StoreError> {
        let index = self
            .position(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        self.documents.remove(index);
        Ok(())
    }
}

/// Open the store named by a connection string
///
/// `memory:` opens an empty in-memory store; `toml://<path>` or a bare path
/// ending in `.toml` opens a file store.
///
/// # Errors
/// Returns [`StoreError::Unsupported`] for any other string, or the error of
/// loading the file.
pub fn open_store(uri: &str) -> Result<Box<dyn CourseStore>, StoreError> {
    let uri = uri.trim();
    if uri == MEMORY_URI {
        crate::debug!("Opening in-memory course store");
        return Ok(Box::new(MemoryStore::new()));
    }

    let path = uri.strip_prefix(TOML_SCHEME).map_or_else(
        || {
            Path::new(uri)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
                .then(|| PathBuf::from(uri))
        },
        |rest| (!rest.is_empty()).then(|| PathBuf::from(rest)),
    );

    match path {
        Some(path) => {
            crate::debug!("Opening course file store at {}", path.display());
            Ok(Box::new(FileStore::open(path)?))
        }
        None => Err(StoreError::Unsupported(uri.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculus() -> Course {
        Course::new("Calculus", 1, 7.5, 5)
    }

    #[test]
    fn test_insert_assigns_unique_hex_ids() {
        let mut collection = Collection::new();
        let first = collection.insert(&calculus()).unwrap();
        let second = collection
            .insert(&Course::new("Physics", 2, 8.0, 10))
            .unwrap();
        assert_eq!(first.len(), 24);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
        assert_eq!(collection.documents()[0].id(), Some(first.as_str()));
    }

    #[test]
    fn test_insert_rejects_duplicate_name() {
        let mut collection = Collection::new();
        collection.insert(&calculus()).unwrap();
        let err = collection.insert(&calculus()).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(name) if name == "Calculus"));
        assert_eq!(collection.documents().len(), 1);
    }

    #[test]
    fn test_update_touches_only_named_field() {
        let mut collection = Collection::new();
        collection.insert(&calculus()).unwrap();
        collection
            .update_field("Calculus", CourseField::Grade, FieldValue::Float(9.0))
            .unwrap();
        let doc = &collection.documents()[0];
        assert_eq!(doc.get("Grade"), Some(&FieldValue::Float(9.0)));
        assert_eq!(doc.get("Year"), Some(&FieldValue::Int(1)));
        assert_eq!(doc.get("ECTS"), Some(&FieldValue::Int(5)));
    }

    #[test]
    fn test_update_and_delete_report_not_found() {
        let mut collection = Collection::new();
        assert!(matches!(
            collection.update_field("Ghost", CourseField::Grade, FieldValue::Float(9.0)),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            collection.delete_by_name("Ghost"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_rename_onto_existing_name_is_rejected() {
        let mut collection = Collection::new();
        collection.insert(&calculus()).unwrap();
        collection
            .insert(&Course::new("Physics", 2, 8.0, 10))
            .unwrap();
        let err = collection
            .update_field("Physics", CourseField::Name, FieldValue::from("Calculus"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        // Renaming to itself is fine
        collection
            .update_field("Physics", CourseField::Name, FieldValue::from("Physics"))
            .unwrap();
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        let mut collection = Collection::new();
        collection.insert(&calculus()).unwrap();
        assert!(collection.delete_by_name("calculus").is_err());
        collection.delete_by_name("Calculus").unwrap();
        assert!(collection.documents().is_empty());
    }

    #[test]
    fn test_field_names_follow_first_document() {
        let mut collection = Collection::new();
        assert!(collection.field_names().is_empty());
        collection.insert(&calculus()).unwrap();
        assert_eq!(collection.field_names(), CourseField::default_headers());
    }

    #[test]
    fn test_from_documents_continues_ids() {
        let mut doc = calculus().to_document();
        doc.set_id(format!("{:024x}", 41));
        let mut collection = Collection::from_documents(vec![doc]);
        let id = collection
            .insert(&Course::new("Physics", 2, 8.0, 10))
            .unwrap();
        assert_eq!(id, format!("{:024x}", 42));
    }

    #[test]
    fn test_open_store_schemes() {
        assert!(open_store("memory:").is_ok());
        assert!(matches!(
            open_store("mongodb://localhost:27017"),
            Err(StoreError::Unsupported(_))
        ));
        assert!(matches!(open_store("toml://"), Err(StoreError::Unsupported(_))));
    }
}
