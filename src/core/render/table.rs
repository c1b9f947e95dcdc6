//! Bordered grid tables: the course table and the summary table

use super::widget::{cells, render_to_text};
use super::{skipped_warning, HEADER, ROW_EVEN, ROW_ODD};
use crate::core::models::{CourseField, Document, Rgb};
use crate::core::statistics::{
    average, parse_integer_field, parse_numeric_field, weighted_average, weighted_series,
    CoercionPolicy,
};
use ratatui::layout::Constraint;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Cell, Padding, Row, Table};

/// Blank columns between two table columns
const COLUMN_GAP: usize = 2;

fn cell_width(text: &str) -> usize {
    Span::raw(text).width()
}

/// Draw a bordered table with a centered header row and alternating grey body rows.
///
/// Rows shorter than the header are padded with empty cells; extra cells are
/// ignored.
#[must_use]
pub fn grid_table(headers: &[String], rows: &[Vec<String>], accent: Rgb) -> Text<'static> {
    if headers.is_empty() {
        return Text::default();
    }
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut row: Vec<String> = row.iter().take(headers.len()).cloned().collect();
            row.resize(headers.len(), String::new());
            row
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .map(|row| cell_width(&row[col]))
                .chain(std::iter::once(cell_width(header)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header = Row::new(
        headers
            .iter()
            .map(|title| Cell::from(Line::from(title.clone()).centered())),
    )
    .style(HEADER);
    let body: Vec<Row<'static>> = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            let grey = if index % 2 == 0 { ROW_EVEN } else { ROW_ODD };
            Row::new(row).style(grey)
        })
        .collect();
    let body_len = body.len();

    let block = Block::bordered()
        .border_style(Style::default().fg(accent.to_color()))
        .padding(Padding::horizontal(1));
    let table = Table::new(body, widths.iter().map(|w| Constraint::Length(cells(*w))))
        .header(header)
        .column_spacing(cells(COLUMN_GAP))
        .block(block);

    let inner: usize = widths.iter().sum::<usize>() + COLUMN_GAP * (widths.len() - 1);
    render_to_text(table, cells(inner + 4), cells(body_len + 3))
}

#[allow(clippy::cast_possible_truncation)]
fn sort_year(doc: &Document) -> i64 {
    parse_integer_field(doc, CourseField::Year.as_str())
        .or_else(|| parse_numeric_field(doc, CourseField::Year.as_str()).map(|y| y.trunc() as i64))
        .unwrap_or(0)
}

/// Every course as one row, ascending by year; ties keep store order.
///
/// Columns follow `headers`. A field the document lacks renders as an empty
/// cell, and a year that cannot be read sorts as year 0.
#[must_use]
pub fn course_table(headers: &[String], snapshot: &[Document], accent: Rgb) -> Text<'static> {
    let mut sorted: Vec<&Document> = snapshot.iter().collect();
    sorted.sort_by_key(|doc| sort_year(doc));

    let rows: Vec<Vec<String>> = sorted
        .iter()
        .map(|doc| {
            headers
                .iter()
                .map(|header| doc.get(header).map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();
    grid_table(headers, &rows, accent)
}

/// Plain and credit-weighted grade averages as a two-row table
#[must_use]
pub fn summary_table(snapshot: &[Document], accent: Rgb, policy: CoercionPolicy) -> Text<'static> {
    let series = weighted_series(snapshot, CourseField::Grade, CourseField::Ects);
    let headers = vec!["Metric".to_string(), "Value".to_string()];
    let rows = vec![
        vec![
            "Average Grade".to_string(),
            format!("{:.2}", average(&series.values)),
        ],
        vec![
            "Weighted Average (ECTS)".to_string(),
            format!("{:.2}", weighted_average(&series.values, &series.weights)),
        ],
    ];
    let mut text = grid_table(&headers, &rows, accent);
    if let Some(warning) = skipped_warning(policy, &series.skipped) {
        text.lines.push(warning);
    }
    text
}
