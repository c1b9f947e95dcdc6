//! CLI command handlers for `UniGrades`.
//!
//! This module provides handlers for the CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod config;
pub mod dashboard;
pub mod summary;

use thiserror::Error;
use uni_grades::config::{Config, STORE_URI_ENV};
use uni_grades::core::models::Institutions;
use uni_grades::core::render::RenderSettings;
use uni_grades::core::store::{open_store, CourseStore, StoreError};

/// Failures that stop a command before or while it runs
#[derive(Debug, Error)]
pub enum StartupError {
    /// The store connection string is missing
    #[error("UNIGRADES_STORE_URI is not set (e.g. UNIGRADES_STORE_URI=toml://courses.toml)")]
    MissingStoreUri,
    /// The configuration holds an invalid value
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// The store could not be opened or read
    #[error("Course store error: {0}")]
    Store(#[from] StoreError),
    /// Terminal setup, drawing or input failed
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Open the course store named by the environment
///
/// # Errors
/// Returns [`StartupError::MissingStoreUri`] when the variable is unset or
/// empty, or the store error when opening fails.
pub fn open_configured_store() -> Result<Box<dyn CourseStore>, StartupError> {
    let uri = std::env::var(STORE_URI_ENV)
        .ok()
        .filter(|uri| !uri.trim().is_empty())
        .ok_or(StartupError::MissingStoreUri)?;
    uni_grades::debug!("Store URI: {uri}");
    Ok(open_store(&uri)?)
}

/// Institutions and render settings from the configuration
///
/// # Errors
/// Returns [`StartupError::Config`] if either section is invalid.
pub fn dashboard_settings(config: &Config) -> Result<(Institutions, RenderSettings), StartupError> {
    let institutions = config.institutions().map_err(StartupError::Config)?;
    let settings = config.render_settings().map_err(StartupError::Config)?;
    Ok((institutions, settings))
}
