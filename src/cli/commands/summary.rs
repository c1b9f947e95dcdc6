//! Summary command handler: prints every artifact without the terminal UI

use super::{dashboard_settings, open_configured_store, StartupError};
use uni_grades::config::Config;
use uni_grades::core::models::{CourseField, Institution};
use uni_grades::core::render::{plain_text, render_artifacts, render_placeholder};
use uni_grades::core::store::CourseStore;
use uni_grades::verbose;

/// Print the course table, averages, charts and progress for the configured store
///
/// # Errors
/// Returns an error if the configuration is invalid, the institution is
/// unknown, or the store cannot be read.
pub fn run(config: &Config, institution: Option<&str>) -> Result<(), StartupError> {
    let (institutions, settings) = dashboard_settings(config)?;
    let selected: &Institution = match institution {
        Some(name) => institutions
            .iter()
            .find(|candidate| candidate.name == name)
            .ok_or_else(|| StartupError::Config(format!("Unknown institution: '{name}'")))?,
        None => institutions
            .get(0)
            .ok_or_else(|| StartupError::Config("No institutions configured".to_string()))?,
    };

    if !selected.available {
        println!("{}", plain_text(&render_placeholder(selected.color, &selected.name)));
        return Ok(());
    }

    let store = open_configured_store()?;
    let snapshot = store.fetch_all()?;
    let mut headers = store.fetch_field_names()?;
    if headers.is_empty() {
        headers = CourseField::default_headers();
    }
    verbose!("{} courses, columns: {}", snapshot.len(), headers.join(", "));

    let artifacts = render_artifacts(&settings, selected.color, &headers, &snapshot);
    for text in [
        &artifacts.table,
        &artifacts.summary,
        &artifacts.grades_per_year,
        &artifacts.credits_per_year,
        &artifacts.progress,
    ] {
        println!("{}\n", plain_text(text));
    }
    Ok(())
}
