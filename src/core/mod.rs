//! Core module: course data, statistics, rendering and the dashboard engine

pub mod config;
pub mod dashboard;
pub mod interpreter;
pub mod models;
pub mod render;
pub mod statistics;
pub mod store;
pub mod ui;

/// Returns the current version of the `UniGrades` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
