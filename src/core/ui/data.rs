//! Data screen: command line, status, artifacts and help

use super::{centered, text_size};
use crate::core::render::widget::cells;
use crate::core::dashboard::DataView;
use crate::core::render::help::{commands_help, errors_help};
use crate::core::render::{Panel, MUTED};
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

const INPUT_PLACEHOLDER: &str =
    "Commands: /add Name Year Grade ECTS | /edit Name Field Value | /delete Name";
const FOOTER: &str = "Press Ctrl + Q to go back, Ctrl + C to quit.";

/// Draw the data screen
pub fn draw(frame: &mut Frame, view: &impl DataView) {
    let [input_area, status_area, main_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_input(frame, view, input_area);

    if let Some(status) = view.status() {
        let color = if status.is_error() {
            Color::Red
        } else {
            Color::Green
        };
        frame.render_widget(
            Paragraph::new(Span::styled(status.text().to_string(), Style::default().fg(color))),
            status_area,
        );
    }

    match view.panel() {
        Panel::Unavailable(placeholder) => {
            let (width, height) = text_size(placeholder);
            frame.render_widget(
                Paragraph::new(placeholder.clone()),
                centered(main_area, width, height),
            );
        }
        Panel::Charts(artifacts) => {
            let commands = commands_help(view.accent());
            let errors = errors_help(view.accent());
            let columns: [&[&Text<'static>]; 4] = [
                &[&artifacts.table],
                &[&artifacts.summary, &artifacts.grades_per_year],
                &[&artifacts.credits_per_year, &artifacts.progress],
                &[&commands, &errors],
            ];
            draw_columns(frame, main_area, &columns);
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(FOOTER, MUTED))),
        footer_area,
    );
}

fn draw_input(frame: &mut Frame, view: &impl DataView, area: Rect) {
    let block = Block::bordered().border_style(Style::default().fg(view.accent().to_color()));
    let content = if view.input().is_empty() {
        Line::from(Span::styled(INPUT_PLACEHOLDER, MUTED))
    } else {
        Line::from(view.input().to_string())
    };
    frame.render_widget(Paragraph::new(content).block(block), area);

    let typed = cells(Span::raw(view.input()).width());
    let max_x = area.right().saturating_sub(2);
    frame.set_cursor_position(Position::new(
        (area.x + 1).saturating_add(typed).min(max_x),
        area.y + 1,
    ));
}

fn draw_columns(frame: &mut Frame, area: Rect, columns: &[&[&Text<'static>]]) {
    let mut constraints: Vec<Constraint> = columns
        .iter()
        .map(|texts| {
            let width = texts.iter().map(|text| text.width()).max().unwrap_or(0);
            Constraint::Length(cells(width))
        })
        .collect();
    constraints.push(Constraint::Min(0));

    let areas = Layout::horizontal(constraints).spacing(1).split(area);
    for (texts, column) in columns.iter().zip(areas.iter()) {
        let rows = Layout::vertical(
            texts
                .iter()
                .map(|text| Constraint::Length(cells(text.height())))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(*column);
        for (text, row) in texts.iter().zip(rows.iter()) {
            frame.render_widget(Paragraph::new((*text).clone()), *row);
        }
    }
}
