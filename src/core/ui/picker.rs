//! Institution picker screen

use super::{centered, text_size};
use crate::core::dashboard::PickerView;
use crate::core::render::{MUTED, TITLE};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// The picker's text: a prompt, one line per institution and a quit hint
#[must_use]
pub fn picker_text(view: &impl PickerView) -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled("Select university:", TITLE)),
        Line::default(),
    ];
    for (index, institution) in view.institutions().iter().enumerate() {
        let pointer = if view.cursor() == index { ">" } else { " " };
        let mark = if view.selected() == Some(index) { "x" } else { " " };
        lines.push(Line::from(vec![
            Span::raw(format!("{pointer} [{mark}] ")),
            Span::styled(
                institution.name.clone(),
                Style::default().fg(institution.color.to_color()),
            ),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Press Ctrl + C to quit.", MUTED)));
    Text::from(lines)
}

/// Draw the picker centered in the frame
pub fn draw(frame: &mut Frame, view: &impl PickerView) {
    let text = picker_text(view);
    let (width, height) = text_size(&text);
    let area = centered(frame.area(), width, height);
    frame.render_widget(Paragraph::new(text), area);
}
