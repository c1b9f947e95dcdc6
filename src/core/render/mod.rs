//! Chart and table renderer
//!
//! Turns a course snapshot into styled text artifacts. Every function here is
//! a pure function of its arguments, so rendering the same snapshot with the
//! same accent twice yields identical [`Text`] values and identical
//! [`plain_text`].

pub mod chart;
pub mod help;
pub mod progress;
pub mod table;
pub mod widget;

use crate::core::models::{Document, Rgb};
use crate::core::statistics::CoercionPolicy;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Padding, Paragraph};
use widget::{cells, render_to_text};

/// Bar colors, cycled by a bar's position in ascending year order
pub const BAR_PALETTE: [Rgb; 3] = [
    Rgb(0x1a, 0x80, 0xbb),
    Rgb(0xea, 0x80, 0x1c),
    Rgb(0x17, 0xb1, 0x17),
];

pub(crate) const HEADER: Style = Style::new().fg(Color::White);
pub(crate) const ROW_EVEN: Style = Style::new().fg(Color::Indexed(245));
pub(crate) const ROW_ODD: Style = Style::new().fg(Color::Indexed(241));
pub(crate) const MUTED: Style = Style::new().fg(Color::Indexed(245));
pub(crate) const REMAINING: Style = Style::new().fg(Color::Indexed(238));
pub(crate) const TITLE: Style = Style::new().add_modifier(Modifier::BOLD);
const WARNING: Style = Style::new().fg(Color::Yellow);

/// Numbers that shape the charts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Credits needed for the degree; the progress bar ceiling
    pub credit_target: f64,
    /// Top of the grade chart axis
    pub grade_axis_max: f64,
    /// Top of the credit chart axis
    pub credit_axis_max: f64,
    /// How malformed records are reported
    pub coercion: CoercionPolicy,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            credit_target: 180.0,
            grade_axis_max: 10.0,
            credit_axis_max: 75.0,
            coercion: CoercionPolicy::Lenient,
        }
    }
}

/// The rendered views of one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    /// All courses, ascending by year
    pub table: Text<'static>,
    /// Plain and weighted averages
    pub summary: Text<'static>,
    /// Bar chart of the mean grade per year
    pub grades_per_year: Text<'static>,
    /// Bar chart of the credits earned per year
    pub credits_per_year: Text<'static>,
    /// Credits earned against the degree target
    pub progress: Text<'static>,
}

/// What the data screen shows for the selected institution
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    /// Full set of artifacts
    Charts(Box<Artifacts>),
    /// Placeholder for an institution without data
    Unavailable(Text<'static>),
}

/// Render every artifact for a snapshot.
///
/// `headers` fixes the course table's column order.
#[must_use]
pub fn render_artifacts(
    settings: &RenderSettings,
    accent: Rgb,
    headers: &[String],
    snapshot: &[Document],
) -> Artifacts {
    Artifacts {
        table: table::course_table(headers, snapshot, accent),
        summary: table::summary_table(snapshot, accent, settings.coercion),
        grades_per_year: chart::grades_per_year(snapshot, settings, accent),
        credits_per_year: chart::credits_per_year(snapshot, settings, accent),
        progress: progress::credit_progress(snapshot, settings, accent),
    }
}

/// Panel shown instead of charts for an institution whose studies have not started
#[must_use]
pub fn render_placeholder(accent: Rgb, institution: &str) -> Text<'static> {
    let message = Line::from(Span::styled(
        format!("Data unavailable: Studies at {institution} have not started yet."),
        MUTED,
    ));
    boxed(vec![message], accent, 2, 1)
}

/// Surround lines with an accent-colored single-line border.
///
/// `pad_x` blank columns and `pad_y` blank rows separate the border from the
/// content; the box is as wide as the widest line.
#[must_use]
pub fn boxed(lines: Vec<Line<'static>>, accent: Rgb, pad_x: usize, pad_y: usize) -> Text<'static> {
    let content_width = lines.iter().map(Line::width).max().unwrap_or(0);
    let width = cells(content_width + 2 * pad_x + 2);
    let height = cells(lines.len() + 2 * pad_y + 2);
    let (pad_x, pad_y) = (cells(pad_x), cells(pad_y));

    let block = Block::bordered()
        .border_style(Style::default().fg(accent.to_color()))
        .padding(Padding::new(pad_x, pad_x, pad_y, pad_y));
    render_to_text(Paragraph::new(lines).block(block), width, height)
}

/// Warning line naming the records a strict policy dropped
#[must_use]
pub fn skipped_warning(policy: CoercionPolicy, skipped: &[String]) -> Option<Line<'static>> {
    (policy == CoercionPolicy::Strict && !skipped.is_empty()).then(|| {
        Line::from(Span::styled(
            format!("! Skipped malformed: {}", skipped.join(", ")),
            WARNING,
        ))
    })
}

/// Text content without styling, one line per row
#[must_use]
pub fn plain_text(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
