//! Credit progress bar with a proportional scale line

use super::widget::{cells, render_to_text};
use super::{boxed, skipped_warning, RenderSettings, REMAINING, TITLE};
use crate::core::models::{CourseField, Document, Rgb};
use crate::core::statistics::{series, total};
use ratatui::style::Style;
use ratatui::symbols::line;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::LineGauge;

/// Bar width in cells
pub const PROGRESS_WIDTH: usize = 44;

/// Width of the percentage label in front of the bar
const PERCENT_WIDTH: usize = 4;

const GAUGE_SET: line::Set = line::Set {
    horizontal: "█",
    ..line::THICK
};

/// Split a credit total into `(earned, remaining)` against `ceiling`.
///
/// Earned is clamped to `[0, ceiling]`; remaining never drops below zero.
#[must_use]
pub fn progress_split(total: f64, ceiling: f64) -> (f64, f64) {
    let ceiling = ceiling.max(0.0);
    let earned = if total.is_finite() {
        total.clamp(0.0, ceiling)
    } else {
        0.0
    };
    // adding zero turns a negative zero into a positive one
    (earned + 0.0, (ceiling - earned).max(0.0) + 0.0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn cells_for(ratio: f64, width: usize) -> usize {
    if !ratio.is_finite() || ratio <= 0.0 {
        return 0;
    }
    ((ratio * width as f64).floor() as usize).min(width)
}

/// The line of numbers printed under the bar.
///
/// The current total sits at its proportional offset, clamped so the label
/// stays inside the bar. `0` marks the left end only when the total label is
/// more than two columns away from it, and the ceiling is right-aligned only
/// when it does not touch the total label. Trailing blanks are removed.
#[must_use]
pub fn scale_line(total: f64, ceiling: f64, width: usize) -> String {
    let label = format!("{:.0}", total + 0.0);
    let max_label = format!("{ceiling:.0}");
    let label_len = label.chars().count();
    let max_len = max_label.chars().count();

    let ratio = if ceiling > 0.0 { total / ceiling } else { 0.0 };
    let pos = cells_for(ratio, width).min(width.saturating_sub(label_len));

    let mut cells = vec![' '; width];
    let mut write = |at: usize, text: &str| {
        for (offset, ch) in text.chars().enumerate() {
            if let Some(cell) = cells.get_mut(at + offset) {
                *cell = ch;
            }
        }
    };
    if pos > 2 {
        write(0, "0");
    }
    write(pos, &label);
    let max_pos = width.saturating_sub(max_len);
    if max_pos > pos + label_len + 1 {
        write(max_pos, &max_label);
    }

    cells.into_iter().collect::<String>().trim_end().to_string()
}

/// A percentage label followed by a `PROGRESS_WIDTH`-cell gauge line.
///
/// Earned cells take the accent color, the rest are dark grey.
#[must_use]
pub fn progress_bar(ratio: f64, accent: Rgb) -> Vec<Line<'static>> {
    let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
    let gauge = LineGauge::default()
        .ratio(ratio)
        .line_set(GAUGE_SET)
        .label(Line::from(format!("{:>3.0}%", ratio * 100.0)))
        .filled_style(Style::default().fg(accent.to_color()))
        .unfilled_style(REMAINING);
    render_to_text(gauge, cells(PERCENT_WIDTH + 1 + PROGRESS_WIDTH), 1).lines
}

/// Earned credits against the degree target
#[must_use]
pub fn credit_progress(snapshot: &[Document], settings: &RenderSettings, accent: Rgb) -> Text<'static> {
    let credits = series(snapshot, CourseField::Ects);
    let sum = total(&credits.values);
    let ceiling = settings.credit_target;
    let (earned, remaining) = progress_split(sum, ceiling);

    let ratio = if ceiling > 0.0 { earned / ceiling } else { 0.0 };
    let indent = " ".repeat(PERCENT_WIDTH + 1);

    let mut lines = vec![Line::from(Span::styled("Total ECTS", TITLE))];
    lines.extend(progress_bar(ratio, accent));
    lines.extend([
        Line::from(format!("{indent}{}", scale_line(sum, ceiling, PROGRESS_WIDTH))),
        Line::from(format!("Earned {earned:.0}  Remaining {remaining:.0}")),
    ]);
    lines.extend(skipped_warning(settings.coercion, &credits.skipped));
    boxed(lines, accent, 1, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Course;
    use crate::core::render::plain_text;

    #[test]
    fn test_split_at_zero_shows_full_remaining() {
        assert_eq!(progress_split(0.0, 180.0), (0.0, 180.0));
    }

    #[test]
    fn test_split_clamps_both_ends() {
        assert_eq!(progress_split(200.0, 180.0), (180.0, 0.0));
        assert_eq!(progress_split(-5.0, 180.0), (0.0, 180.0));
        assert_eq!(progress_split(60.0, 180.0), (60.0, 120.0));
    }

    #[test]
    fn test_scale_line_at_zero() {
        let line = scale_line(0.0, 180.0, PROGRESS_WIDTH);
        assert_eq!(line, format!("0{}180", " ".repeat(40)));
    }

    #[test]
    fn test_scale_line_midway() {
        let line = scale_line(90.0, 180.0, PROGRESS_WIDTH);
        assert_eq!(line.find("90"), Some(22));
        assert!(line.starts_with('0'));
        assert!(line.ends_with("180"));
    }

    #[test]
    fn test_scale_line_hides_zero_near_left_edge() {
        let line = scale_line(5.0, 180.0, PROGRESS_WIDTH);
        assert_eq!(line.find('5'), Some(1));
        assert!(line.starts_with(' '));
    }

    #[test]
    fn test_scale_line_over_ceiling_is_clamped() {
        let line = scale_line(200.0, 180.0, PROGRESS_WIDTH);
        assert_eq!(line.chars().count(), PROGRESS_WIDTH);
        assert!(line.ends_with("200"));
        assert!(!line.contains("180"));
    }

    fn filled_cells(bar: &[Line<'_>], accent: Rgb) -> usize {
        bar.iter()
            .flat_map(|line| line.spans.iter())
            .filter(|span| span.style.fg == Some(accent.to_color()))
            .map(|span| span.content.chars().filter(|c| *c == '█').count())
            .sum()
    }

    #[test]
    fn test_bar_is_full_when_target_met() {
        let accent = Rgb(0xc8, 0x19, 0x19);
        let snapshot = vec![Course::new("Thesis", 3, 8.0, 200).to_document()];
        let text = credit_progress(&snapshot, &RenderSettings::default(), accent);
        let plain = plain_text(&text);
        assert!(plain.contains(&format!("100% {}", "█".repeat(PROGRESS_WIDTH))));
        assert!(plain.contains("Earned 180  Remaining 0"));
        assert_eq!(filled_cells(&text.lines, accent), PROGRESS_WIDTH);
    }

    #[test]
    fn test_empty_bar() {
        let accent = Rgb(0xc8, 0x19, 0x19);
        let text = credit_progress(&[], &RenderSettings::default(), accent);
        let plain = plain_text(&text);
        assert!(plain.contains(&format!("  0% {}", "█".repeat(PROGRESS_WIDTH))));
        assert!(plain.contains("Earned 0  Remaining 180"));
        assert!(!plain.contains("-0"));
        assert_eq!(filled_cells(&text.lines, accent), 0);
    }

    #[test]
    fn test_half_bar() {
        let accent = Rgb(0xc8, 0x19, 0x19);
        let bar = progress_bar(0.5, accent);
        assert_eq!(bar.len(), 1);
        assert_eq!(bar[0].width(), PERCENT_WIDTH + 1 + PROGRESS_WIDTH);
        assert_eq!(filled_cells(&bar, accent), PROGRESS_WIDTH / 2);
        assert!(plain_text(&Text::from(bar)).starts_with(" 50% "));
    }

    #[test]
    fn test_nothing_earned_is_positive_zero() {
        let (earned, remaining) = progress_split(total(&[]), 180.0);
        assert!(earned.is_sign_positive());
        assert_eq!(remaining, 180.0);
        let (earned, _) = progress_split(-0.0, 180.0);
        assert!(earned.is_sign_positive());
        assert_eq!(scale_line(-0.0, 180.0, PROGRESS_WIDTH), format!("0{}180", " ".repeat(40)));
    }
}
