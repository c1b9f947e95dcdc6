//! Read-only views of the dashboard, one per screen
//!
//! Frame drawing for a screen receives only the view for that screen, so the
//! picker cannot reach the course panel and the data screen cannot move the
//! picker cursor.

use crate::core::models::{Institution, Institutions, Rgb};
use crate::core::render::Panel;

/// Outcome of the last submitted command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The command applied
    Success(String),
    /// The command was rejected or the store failed
    Error(String),
}

impl Status {
    /// Message text
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }

    /// Whether this reports a failure
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// What the institution picker needs
pub trait PickerView {
    /// Institutions in picker order
    fn institutions(&self) -> &Institutions;
    /// Index under the cursor
    fn cursor(&self) -> usize;
    /// Index of the selected institution, if any
    fn selected(&self) -> Option<usize>;
}

/// What the data screen needs
pub trait DataView {
    /// The institution whose data is shown
    fn institution(&self) -> Option<&Institution>;
    /// Rendered artifacts or the placeholder
    fn panel(&self) -> &Panel;
    /// Text typed so far
    fn input(&self) -> &str;
    /// Result of the last command
    fn status(&self) -> Option<&Status>;

    /// Accent color of the selected institution, white when none is selected
    fn accent(&self) -> Rgb {
        self.institution().map_or(Rgb::WHITE, |institution| institution.color)
    }
}
