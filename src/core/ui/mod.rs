//! Frame composition
//!
//! Draws the dashboard's current screen into a ratatui frame. Drawing never
//! changes dashboard state; each screen's draw function only sees the view
//! trait for that screen.

pub mod data;
pub mod picker;

use crate::core::dashboard::{Dashboard, Screen};
use crate::core::render::widget::cells;
use crate::core::store::CourseStore;
use ratatui::layout::Rect;
use ratatui::text::Text;
use ratatui::Frame;

/// Draw whichever screen the dashboard is on
pub fn draw<S: CourseStore>(frame: &mut Frame, dashboard: &Dashboard<'_, S>) {
    match dashboard.screen() {
        Screen::Picker => picker::draw(frame, dashboard),
        Screen::Data => data::draw(frame, dashboard),
    }
}

/// Size of a text block in cells
pub(crate) fn text_size(text: &Text<'_>) -> (u16, u16) {
    (cells(text.width()), cells(text.height()))
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
