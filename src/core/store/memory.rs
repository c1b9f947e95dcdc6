//! Store that keeps courses only for the lifetime of the process

use super::{Collection, CourseStore, StoreError};
use crate::core::models::{Course, CourseField, Document, FieldValue};

/// Volatile course store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collection: Collection,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            collection: Collection::new(),
        }
    }

    /// Create a store pre-filled with documents
    #[must_use]
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            collection: Collection::from_documents(documents),
        }
    }
}

impl CourseStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.collection.documents().to_vec())
    }

    fn fetch_field_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.collection.field_names())
    }

    fn insert(&mut self, course: &Course) -> Result<String, StoreError> {
        self.collection.insert(course)
    }

    fn update_field(
        &mut self,
        name: &str,
        field: CourseField,
        value: FieldValue,
    ) -> Result<(), StoreError> {
        self.collection.update_field(name, field, value)
    }

    fn delete_by_name(&mut self, name: &str) -> Result<(), StoreError> {
        self.collection.delete_by_name(name)
    }
}
