//! Command interpreter for the data screen's input line
//!
//! Three slash commands mutate the store:
//!
//! ```text
//! /add <name> <year> <grade> <ects>
//! /edit <name> <field> <value>
//! /delete <name>
//! ```
//!
//! Arguments are validated completely before the store is touched, so a
//! rejected command never leaves a partial change behind. Input that does
//! not start with one of the three verbs is ignored.

use crate::core::models::{Course, CourseField, FieldValue};
use crate::core::store::{CourseStore, StoreError};
use std::fmt;
use thiserror::Error;

const ADD_USAGE: &str = "Invalid format. Use: /add Name Year Grade ECTS";
const EDIT_USAGE: &str =
    "Invalid format. Use: /edit CourseName Field NewValue (e.g., /edit Applied_Math Grade 9)";
const DELETE_USAGE: &str = "Invalid format. Use: /delete CourseName";
const ADD_TYPES: &str = "Error: Year and ECTS must be integers, Grade must be a number";
const ADD_RANGES: &str = "Error: Year must be positive and ECTS cannot be negative";
const INVALID_FIELD: &str = "Invalid field. Valid fields are: Name, Year, Grade, ECTS";

/// Which command produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// `/add`
    Add,
    /// `/edit`
    Edit,
    /// `/delete`
    Delete,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "adding",
            Self::Edit => "updating",
            Self::Delete => "deleting",
        })
    }
}

/// A validated store mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a course
    Add(Course),
    /// Overwrite one field of an existing course
    Edit {
        /// Course to change
        name: String,
        /// Field to overwrite
        field: CourseField,
        /// New value, already coerced to the field's type
        value: FieldValue,
    },
    /// Remove a course
    Delete {
        /// Course to remove
        name: String,
    },
}

impl Command {
    /// The command's verb
    #[must_use]
    pub const fn verb(&self) -> Verb {
        match self {
            Self::Add(_) => Verb::Add,
            Self::Edit { .. } => Verb::Edit,
            Self::Delete { .. } => Verb::Delete,
        }
    }

    /// Name of the course the command addresses
    #[must_use]
    pub fn course_name(&self) -> &str {
        match self {
            Self::Add(course) => &course.name,
            Self::Edit { name, .. } | Self::Delete { name } => name,
        }
    }
}

/// Why a command did not apply
#[derive(Debug, Error)]
pub enum CommandError {
    /// Malformed arguments; nothing was sent to the store
    #[error("{0}")]
    Validation(String),
    /// No course with the given name
    #[error("course '{name}' not found")]
    NotFound {
        /// Command that failed
        verb: Verb,
        /// Name that matched nothing
        name: String,
    },
    /// The store rejected the operation or could not be reached
    #[error("{source}")]
    Store {
        /// Command that failed
        verb: Verb,
        /// Underlying store error
        #[source]
        source: StoreError,
    },
}

impl CommandError {
    fn from_store(verb: Verb, error: StoreError) -> Self {
        match error {
            StoreError::NotFound(name) => Self::NotFound { verb, name },
            source => Self::Store { verb, source },
        }
    }

    /// Single-line message for the status bar
    #[must_use]
    pub fn status_line(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::NotFound { verb, .. } | Self::Store { verb, .. } => {
                format!("Error {verb} course: {self}")
            }
        }
    }
}

/// Result of a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Course the command changed
    pub course: String,
    /// Success message for the status bar
    pub status: String,
}

fn validation(message: &str) -> CommandError {
    CommandError::Validation(message.to_string())
}

/// Coerce a raw token to the stored type of `field`.
///
/// # Errors
/// Returns a validation error when the token does not fit the field.
pub fn coerce_value(field: CourseField, raw: &str) -> Result<FieldValue, CommandError> {
    match field {
        CourseField::Name => Ok(FieldValue::from(raw)),
        CourseField::Year => raw
            .parse::<i64>()
            .ok()
            .filter(|year| *year > 0)
            .map(FieldValue::Int)
            .ok_or_else(|| validation("Error: Year must be a positive integer")),
        CourseField::Ects => raw
            .parse::<i64>()
            .ok()
            .filter(|credits| *credits >= 0)
            .map(FieldValue::Int)
            .ok_or_else(|| validation("Error: ECTS must be a non-negative integer")),
        CourseField::Grade => raw
            .parse::<f64>()
            .ok()
            .filter(|grade| grade.is_finite())
            .map(FieldValue::Float)
            .ok_or_else(|| validation("Error: Grade must be a number")),
    }
}

fn parse_add(args: &[&str]) -> Result<Command, CommandError> {
    let [name, year, grade, credits] = args else {
        return Err(validation(ADD_USAGE));
    };
    let (Ok(year), Ok(grade), Ok(credits)) = (
        year.parse::<i64>(),
        grade.parse::<f64>(),
        credits.parse::<i64>(),
    ) else {
        return Err(validation(ADD_TYPES));
    };
    if !grade.is_finite() {
        return Err(validation(ADD_TYPES));
    }
    if year <= 0 || credits < 0 {
        return Err(validation(ADD_RANGES));
    }
    Ok(Command::Add(Course::new(name, year, grade, credits)))
}

fn parse_edit(args: &[&str]) -> Result<Command, CommandError> {
    let [name, field, raw] = args else {
        return Err(validation(EDIT_USAGE));
    };
    let field: CourseField = field.parse().map_err(|_| validation(INVALID_FIELD))?;
    Ok(Command::Edit {
        name: (*name).to_string(),
        field,
        value: coerce_value(field, raw)?,
    })
}

fn parse_delete(args: &[&str]) -> Result<Command, CommandError> {
    let [name] = args else {
        return Err(validation(DELETE_USAGE));
    };
    Ok(Command::Delete {
        name: (*name).to_string(),
    })
}

/// Parse one input line.
///
/// Returns `Ok(None)` for input that is not a command; such input is ignored
/// rather than rejected.
///
/// # Errors
/// Returns [`CommandError::Validation`] when a known verb has malformed arguments.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((verb, args)) = tokens.split_first() else {
        return Ok(None);
    };
    match *verb {
        "/add" => parse_add(args).map(Some),
        "/edit" => parse_edit(args).map(Some),
        "/delete" => parse_delete(args).map(Some),
        _ => Ok(None),
    }
}

/// Apply a parsed command to the store.
///
/// # Errors
/// Returns [`CommandError::NotFound`] when an edit or delete matched no
/// course, or [`CommandError::Store`] for any other store failure.
pub fn apply_command<S: CourseStore + ?Sized>(
    store: &mut S,
    command: &Command,
) -> Result<Outcome, CommandError> {
    let verb = command.verb();
    let status = match command {
        Command::Add(course) => {
            let id = store
                .insert(course)
                .map_err(|e| CommandError::from_store(verb, e))?;
            format!("✓ Course '{}' added successfully (ID: {id})", course.name)
        }
        Command::Edit { name, field, value } => {
            store
                .update_field(name, *field, value.clone())
                .map_err(|e| CommandError::from_store(verb, e))?;
            format!("✓ Course '{name}' field '{field}' updated to '{value}'")
        }
        Command::Delete { name } => {
            store
                .delete_by_name(name)
                .map_err(|e| CommandError::from_store(verb, e))?;
            format!("✓ Course '{name}' deleted successfully")
        }
    };
    Ok(Outcome {
        course: command.course_name().to_string(),
        status,
    })
}
