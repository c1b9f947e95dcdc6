//! Reference tables for the command line on the data screen

use super::table::grid_table;
use crate::core::models::Rgb;
use ratatui::text::Text;

const COMMANDS: [[&str; 3]; 3] = [
    ["/add", "Add new course", "/add Applied_Math 1 7 5"],
    ["/edit", "Update course field", "/edit Applied_Math Grade 9"],
    ["/delete", "Delete course", "/delete Applied_Math"],
];

const ERRORS: [[&str; 2]; 6] = [
    ["Invalid format", "Wrong command syntax"],
    ["Course not found", "Course name doesn't exist"],
    ["Year not integer", "Year must be a number"],
    ["Grade not number", "Grade must be decimal/int"],
    ["ECTS not integer", "ECTS must be a number"],
    ["Invalid field", "Field not in Name/Year/Grade/ECTS"],
];

fn strings(row: &[&str]) -> Vec<String> {
    row.iter().map(ToString::to_string).collect()
}

fn owned<const N: usize>(rows: &[[&str; N]]) -> Vec<Vec<String>> {
    rows.iter().map(|row| strings(row)).collect()
}

/// Available commands with an example each
#[must_use]
pub fn commands_help(accent: Rgb) -> Text<'static> {
    grid_table(
        &strings(&["Command", "Description", "Example"]),
        &owned(&COMMANDS),
        accent,
    )
}

/// What each status error means
#[must_use]
pub fn errors_help(accent: Rgb) -> Text<'static> {
    grid_table(
        &strings(&["Error", "Explanation"]),
        &owned(&ERRORS),
        accent,
    )
}
