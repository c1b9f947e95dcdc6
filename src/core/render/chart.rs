//! Per-year vertical bar charts
//!
//! Axes are fixed rather than scaled to the data so bars stay comparable
//! between refreshes. Fractional bar heights use the eighth-block glyphs.

use super::widget::{cells, render_to_text};
use super::{boxed, skipped_warning, RenderSettings, BAR_PALETTE, MUTED, TITLE};
use crate::core::models::{CourseField, Document, Rgb};
use crate::core::statistics::{group_average_by_year, group_total_by_year, series_by_year, PerYear};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders};

/// Plot width in cells, including the axis
pub const CHART_WIDTH: usize = 40;
/// Plot height in cells, including the axis and label rows
pub const CHART_HEIGHT: usize = 15;

/// Bar values are kept in hundredths so fractional heights survive
const VALUE_SCALE: f64 = 100.0;

/// Bar value in hundredths, clamped to `[0, axis_max]`
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn bar_value(value: f64, axis_max: f64) -> u64 {
    if axis_max <= 0.0 || !value.is_finite() {
        return 0;
    }
    (value.clamp(0.0, axis_max) * VALUE_SCALE).round() as u64
}

/// Draw one bar per year in ascending order, labelled `Y<year>`.
#[must_use]
pub fn bar_chart(values: &PerYear, axis_max: f64) -> Vec<Line<'static>> {
    let axes = Block::default()
        .borders(Borders::LEFT | Borders::BOTTOM)
        .border_style(MUTED);
    let mut chart = BarChart::default()
        .block(axes)
        .max(bar_value(axis_max, axis_max).max(1))
        .bar_gap(1)
        .label_style(MUTED);

    let count = values.len();
    if count > 0 {
        let plot_width = CHART_WIDTH - 1;
        let bar_width = (plot_width.saturating_sub(count + 1) / count).max(1);
        let bars: Vec<Bar<'static>> = values
            .iter()
            .enumerate()
            .map(|(index, (year, value))| {
                Bar::default()
                    .value(bar_value(*value, axis_max))
                    .text_value(String::new())
                    .label(Line::from(format!("Y{year}")))
                    .style(Style::default().fg(BAR_PALETTE[index % BAR_PALETTE.len()].to_color()))
            })
            .collect();
        chart = chart
            .bar_width(cells(bar_width))
            .data(BarGroup::default().bars(&bars));
    }

    render_to_text(chart, cells(CHART_WIDTH), cells(CHART_HEIGHT)).lines
}

fn values_line(values: &PerYear, decimals: usize) -> String {
    values
        .iter()
        .map(|(year, value)| format!("Year {year}: {value:.decimals$}"))
        .collect::<Vec<_>>()
        .join("  ")
}

fn chart_panel(
    title: &str,
    values: &PerYear,
    decimals: usize,
    axis_max: f64,
    accent: Rgb,
    warning: Option<Line<'static>>,
) -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled(title.to_string(), TITLE)),
        Line::from(values_line(values, decimals)),
    ];
    lines.extend(bar_chart(values, axis_max));
    lines.extend(warning);
    boxed(lines, accent, 1, 0)
}

/// Mean grade per year
#[must_use]
pub fn grades_per_year(snapshot: &[Document], settings: &RenderSettings, accent: Rgb) -> Text<'static> {
    let series = series_by_year(snapshot, CourseField::Grade);
    let values = group_average_by_year(&series.values, &series.years);
    chart_panel(
        "Average Grades Per Year",
        &values,
        2,
        settings.grade_axis_max,
        accent,
        skipped_warning(settings.coercion, &series.skipped),
    )
}

/// Credits earned per year
#[must_use]
pub fn credits_per_year(snapshot: &[Document], settings: &RenderSettings, accent: Rgb) -> Text<'static> {
    let series = series_by_year(snapshot, CourseField::Ects);
    let values = group_total_by_year(&series.values, &series.years);
    chart_panel(
        "Total ECTS Per Year",
        &values,
        0,
        settings.credit_axis_max,
        accent,
        skipped_warning(settings.coercion, &series.skipped),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Course;
    use crate::core::render::plain_text;
    use crate::core::statistics::CoercionPolicy;

    fn per_year(pairs: &[(i64, f64)]) -> PerYear {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_bar_values_are_clamped() {
        assert_eq!(bar_value(0.0, 10.0), 0);
        assert_eq!(bar_value(7.25, 10.0), 725);
        assert_eq!(bar_value(25.0, 10.0), bar_value(10.0, 10.0));
        assert_eq!(bar_value(-3.0, 10.0), 0);
        assert_eq!(bar_value(5.0, 0.0), 0);
        assert_eq!(bar_value(f64::NAN, 10.0), 0);
    }

    #[test]
    fn test_fractional_bar_uses_partial_block() {
        let lines = bar_chart(&per_year(&[(1, 5.0 + 10.0 / 13.0 / 2.0)]), 10.0);
        let plot: String = lines[..CHART_HEIGHT - 2]
            .iter()
            .flat_map(|line| line.spans.iter().map(|span| span.content.to_string()))
            .collect();
        assert!(plot.contains('█'));
        assert!(plot.chars().any(|c| ('▁'..='▇').contains(&c)));
    }

    #[test]
    fn test_chart_dimensions_are_fixed() {
        let lines = bar_chart(&per_year(&[(1, 7.0), (2, 9.0), (3, 4.5)]), 10.0);
        assert_eq!(lines.len(), CHART_HEIGHT);
        assert!(lines.iter().all(|line| line.width() == CHART_WIDTH));
    }

    #[test]
    fn test_labels_follow_ascending_years() {
        let lines = bar_chart(&per_year(&[(3, 4.0), (1, 7.0)]), 10.0);
        let labels: String = lines[CHART_HEIGHT - 2]
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        let y1 = labels.find("Y1").unwrap();
        let y3 = labels.find("Y3").unwrap();
        assert!(y1 < y3);
    }

    #[test]
    fn test_bar_colors_cycle_through_palette() {
        let values = per_year(&[(1, 10.0), (2, 10.0), (3, 10.0), (4, 10.0)]);
        let top = &bar_chart(&values, 10.0)[0];
        let colors: Vec<_> = top
            .spans
            .iter()
            .filter(|span| span.content.contains('█'))
            .map(|span| span.style.fg)
            .collect();
        assert_eq!(
            colors,
            vec![
                Some(BAR_PALETTE[0].to_color()),
                Some(BAR_PALETTE[1].to_color()),
                Some(BAR_PALETTE[2].to_color()),
                Some(BAR_PALETTE[0].to_color()),
            ]
        );
    }

    #[test]
    fn test_panel_values_line() {
        let snapshot = vec![
            Course::new("A", 1, 8.0, 5).to_document(),
            Course::new("B", 1, 6.0, 10).to_document(),
            Course::new("C", 2, 9.0, 15).to_document(),
        ];
        let settings = RenderSettings::default();
        let grades = plain_text(&grades_per_year(&snapshot, &settings, Rgb::WHITE));
        let credits = plain_text(&credits_per_year(&snapshot, &settings, Rgb::WHITE));
        assert!(grades.contains("Average Grades Per Year"));
        assert!(grades.contains("Year 1: 7.00  Year 2: 9.00"));
        assert!(credits.contains("Year 1: 15  Year 2: 15"));
    }

    #[test]
    fn test_empty_chart_has_axes_only() {
        let lines = bar_chart(&PerYear::new(), 10.0);
        let text: String = lines
            .iter()
            .flat_map(|line| line.spans.iter().map(|span| span.content.to_string()))
            .collect();
        assert!(!text.contains('█'));
        assert!(!text.contains('Y'));
        assert!(text.contains('└'));
    }

    #[test]
    fn test_strict_chart_warns_about_bad_year() {
        let snapshot = vec![Document::new()
            .with("Name", "Broken")
            .with("Year", "first")
            .with("Grade", 7.0)];
        let settings = RenderSettings {
            coercion: CoercionPolicy::Strict,
            ..RenderSettings::default()
        };
        let grades = plain_text(&grades_per_year(&snapshot, &settings, Rgb::WHITE));
        assert!(grades.contains("! Skipped malformed: Broken"));
    }
}
