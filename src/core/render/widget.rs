//! Off-screen widget rendering
//!
//! Artifacts are drawn with ratatui widgets into a fixed-size [`Buffer`] and
//! read back as styled [`Text`], so the dashboard frame and the plain-text
//! summary show the same cells.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Widget;

/// Convert a cell count to a widget dimension, saturating at `u16::MAX`
#[must_use]
pub fn cells(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

/// Render `widget` into a blank `width` x `height` buffer and read it back.
#[must_use]
pub fn render_to_text<W: Widget>(widget: W, width: u16, height: u16) -> Text<'static> {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    Text::from(buffer_lines(&buf))
}

/// One line per buffer row, merging runs of equally styled cells into one span.
///
/// Cells hidden behind a wide glyph are skipped.
#[must_use]
pub fn buffer_lines(buf: &Buffer) -> Vec<Line<'static>> {
    let width = usize::from(buf.area.width);
    if width == 0 {
        return Vec::new();
    }
    buf.content
        .chunks(width)
        .map(|row| {
            let mut spans: Vec<Span<'static>> = Vec::new();
            let mut run = String::new();
            let mut run_style = Style::default();
            let mut hidden = 0;
            for cell in row {
                if hidden > 0 {
                    hidden -= 1;
                    continue;
                }
                let symbol = cell.symbol();
                hidden = Span::raw(symbol).width().saturating_sub(1);
                let style = cell.style();
                if style != run_style && !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                run_style = style;
                run.push_str(symbol);
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, run_style));
            }
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_runs_are_merged_by_style() {
        let red = Style::default().fg(Color::Red);
        let line = Line::from(vec![Span::raw(" "), Span::styled("ab", red)]);
        let text = render_to_text(Paragraph::new(line), 5, 1);
        assert_eq!(text.lines.len(), 1);
        let spans = &text.lines[0].spans;
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].content, " ");
        assert_eq!(spans[1].content, "ab");
        assert_eq!(spans[1].style.fg, Some(Color::Red));
        assert_eq!(spans[2].content, "  ");
    }

    #[test]
    fn test_output_is_clipped_to_the_buffer() {
        let text = render_to_text(Paragraph::new("long line\nsecond\nthird"), 3, 2);
        assert_eq!(text.lines.len(), 2);
        assert_eq!(text.lines[0].width(), 3);
        assert_eq!(text.lines[0].spans[0].content, "lon");
    }

    #[test]
    fn test_wide_glyphs_keep_the_row_width() {
        let text = render_to_text(Paragraph::new("日本"), 6, 1);
        assert_eq!(text.lines[0].width(), 6);
        assert!(text.lines[0].spans[0].content.starts_with("日本"));
    }

    #[test]
    fn test_cells_saturate() {
        assert_eq!(cells(40), 40);
        assert_eq!(cells(usize::MAX), u16::MAX);
    }
}
