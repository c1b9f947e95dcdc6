//! Shared library for `UniGrades`
//! Contains the dashboard engine and its collaborators, used by the CLI and the tests

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::get_version;
