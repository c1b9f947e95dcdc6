//! Data models for `UniGrades`

pub mod course;
pub mod institution;

pub use course::{Course, CourseField, Document, FieldValue};
pub use institution::{Institution, Institutions, Rgb};
