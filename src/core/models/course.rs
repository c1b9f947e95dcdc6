//! Course model
//!
//! Courses live in the store as loosely typed documents: each field is a
//! scalar that may have been written as an integer, a float, a string or a
//! boolean. [`Course`] is the strictly typed record the dashboard writes.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Key used for the store-assigned identifier inside persisted documents.
pub const ID_KEY: &str = "_id";

/// A scalar stored in a course document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Whole number
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Free text
    Text(String),
    /// Boolean flag
    Bool(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// The editable course fields, named as they are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseField {
    /// Course name (identity)
    Name,
    /// Academic year the course was taken in
    Year,
    /// Grade received
    Grade,
    /// Credit load in ECTS
    Ects,
}

impl CourseField {
    /// All fields in canonical column order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Year, Self::Grade, Self::Ects];

    /// Stored field name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Year => "Year",
            Self::Grade => "Grade",
            Self::Ects => "ECTS",
        }
    }

    /// Canonical column headers, used when the store has no documents yet.
    #[must_use]
    pub fn default_headers() -> Vec<String> {
        Self::ALL.iter().map(|field| field.as_str().to_string()).collect()
    }
}

impl fmt::Display for CourseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseField {
    type Err = String;

    /// Field names are matched case-sensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown course field: {s}"))
    }
}

/// One stored record: an optional store-assigned id plus fields in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    id: Option<String>,
    fields: Vec<(String, FieldValue)>,
}

impl Document {
    /// Create an empty document without id
    #[must_use]
    pub const fn new() -> Self {
        Self {
            id: None,
            fields: Vec::new(),
        }
    }

    /// Builder-style field setter
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.set(field, value.into());
        self
    }

    /// Store-assigned identifier, if any
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Attach a store-assigned identifier
    pub fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    /// Look up a field by its exact name
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, value)| value)
    }

    /// Replace a field in place, or append it when absent
    pub fn set(&mut self, field: &str, value: FieldValue) {
        if let Some(slot) = self.fields.iter_mut().find(|(key, _)| key == field) {
            slot.1 = value;
        } else {
            self.fields.push((field.to_string(), value));
        }
    }

    /// Field names in stored order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Textual form of the `Name` field
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.get(CourseField::Name.as_str()).map(ToString::to_string)
    }

    /// Whether the `Name` field equals `name` exactly
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name().is_some_and(|stored| stored == name)
    }

    /// Number of fields (the id is not counted)
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the document has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        if let Some(id) = &self.id {
            map.serialize_entry(ID_KEY, id)?;
        }
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = Document;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of scalar course fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Document, A::Error> {
                let mut document = Document::new();
                while let Some(key) = access.next_key::<String>()? {
                    let value: FieldValue = access.next_value()?;
                    if key == ID_KEY {
                        document.set_id(value.to_string());
                    } else {
                        document.set(&key, value);
                    }
                }
                Ok(document)
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}

/// A validated course as written by the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    /// Unique course name
    pub name: String,
    /// Academic year (positive)
    pub year: i64,
    /// Grade on the institution's scale
    pub grade: f64,
    /// Credit load in ECTS (non-negative)
    pub credits: i64,
}

impl Course {
    /// Create a new course
    #[must_use]
    pub fn new(name: &str, year: i64, grade: f64, credits: i64) -> Self {
        Self {
            name: name.to_string(),
            year,
            grade,
            credits,
        }
    }

    /// Convert into a store document using the canonical field names
    #[must_use]
    pub fn to_document(&self) -> Document {
        Document::new()
            .with(CourseField::Name.as_str(), self.name.as_str())
            .with(CourseField::Year.as_str(), self.year)
            .with(CourseField::Grade.as_str(), self.grade)
            .with(CourseField::Ects.as_str(), self.credits)
    }
}
