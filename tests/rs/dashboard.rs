//! End-to-end dashboard sessions over an in-memory store

use ratatui::backend::TestBackend;
use ratatui::Terminal;
use uni_grades::core::dashboard::{Dashboard, DataView, Input, Screen};
use uni_grades::core::models::{Course, Institution, Institutions, Rgb};
use uni_grades::core::render::{plain_text, Panel, RenderSettings};
use uni_grades::core::store::{CourseStore, MemoryStore};
use uni_grades::core::ui;

fn institutions() -> Institutions {
    Institutions::new(vec![
        Institution::new("TU/e", Rgb(0xc8, 0x19, 0x19), true),
        Institution::new("TUD", Rgb(0x00, 0xa0, 0xda), false),
        Institution::new("TUM", Rgb(0x00, 0x66, 0xc1), false),
    ])
    .unwrap()
}

fn seeded() -> MemoryStore {
    MemoryStore::with_documents(vec![
        Course::new("Physics", 2, 8.0, 10).to_document(),
        Course::new("Calculus", 1, 7.5, 5).to_document(),
    ])
}

fn submit<S: CourseStore>(dashboard: &mut Dashboard<'_, S>, line: &str) {
    for c in line.chars() {
        dashboard.handle_input(Input::Char(c));
    }
    dashboard.handle_input(Input::Enter);
}

fn artifacts_text<S: CourseStore>(dashboard: &Dashboard<'_, S>) -> String {
    match dashboard.panel() {
        Panel::Charts(artifacts) => [
            &artifacts.table,
            &artifacts.summary,
            &artifacts.grades_per_year,
            &artifacts.credits_per_year,
            &artifacts.progress,
        ]
        .into_iter()
        .map(plain_text)
        .collect::<Vec<_>>()
        .join("\n"),
        Panel::Unavailable(text) => plain_text(text),
    }
}

fn status_text<S: CourseStore>(dashboard: &Dashboard<'_, S>) -> String {
    dashboard
        .status()
        .map(|status| status.text().to_string())
        .unwrap_or_default()
}

#[test]
fn add_edit_delete_session() {
    let list = institutions();
    let mut dashboard = Dashboard::new(seeded(), &list, RenderSettings::default()).unwrap();
    dashboard.handle_input(Input::Enter);
    assert_eq!(dashboard.screen(), Screen::Data);

    submit(&mut dashboard, "/add Databases 3 6.5 5");
    assert!(status_text(&dashboard).contains("Course 'Databases' added successfully"));
    assert_eq!(dashboard.snapshot().len(), 3);
    assert!(artifacts_text(&dashboard).contains("Databases"));

    submit(&mut dashboard, "/edit Databases Grade 9");
    assert!(status_text(&dashboard).contains("field 'Grade' updated"));
    assert!(!dashboard.status().unwrap().is_error());

    submit(&mut dashboard, "/delete Databases");
    assert!(status_text(&dashboard).contains("deleted successfully"));
    assert_eq!(dashboard.snapshot().len(), 2);
    assert!(!artifacts_text(&dashboard).contains("Databases"));
}

#[test]
fn missing_course_reports_not_found() {
    let list = institutions();
    let mut dashboard = Dashboard::new(seeded(), &list, RenderSettings::default()).unwrap();
    dashboard.handle_input(Input::Enter);
    let before = artifacts_text(&dashboard);

    submit(&mut dashboard, "/edit Ghost Year 2");
    assert_eq!(
        status_text(&dashboard),
        "Error updating course: course 'Ghost' not found"
    );
    submit(&mut dashboard, "/delete Ghost");
    assert_eq!(
        status_text(&dashboard),
        "Error deleting course: course 'Ghost' not found"
    );
    assert!(dashboard.status().unwrap().is_error());
    assert_eq!(artifacts_text(&dashboard), before);
}

#[test]
fn malformed_commands_are_rejected() {
    let list = institutions();
    let mut dashboard = Dashboard::new(seeded(), &list, RenderSettings::default()).unwrap();
    dashboard.handle_input(Input::Enter);

    submit(&mut dashboard, "/add Databases 3 6.5");
    assert_eq!(
        status_text(&dashboard),
        "Invalid format. Use: /add Name Year Grade ECTS"
    );
    submit(&mut dashboard, "/edit Physics Lecturer Smith");
    assert_eq!(
        status_text(&dashboard),
        "Invalid field. Valid fields are: Name, Year, Grade, ECTS"
    );
    submit(&mut dashboard, "/add Databases 0 6.5 5");
    assert!(dashboard.status().unwrap().is_error());
    assert_eq!(dashboard.snapshot().len(), 2);
}

#[test]
fn summary_and_progress_reflect_snapshot() {
    let list = institutions();
    let mut dashboard = Dashboard::new(seeded(), &list, RenderSettings::default()).unwrap();
    dashboard.handle_input(Input::Enter);

    let text = artifacts_text(&dashboard);
    assert!(text.contains("7.75"), "plain average of 7.5 and 8.0");
    assert!(text.contains("7.83"), "ECTS-weighted average");
    assert!(text.contains("Earned 15  Remaining 165"));

    let calculus = text.find("Calculus").unwrap();
    let physics = text.find("Physics").unwrap();
    assert!(calculus < physics, "table is ordered by year");
}

#[test]
fn progress_is_clamped_at_target() {
    let list = institutions();
    let settings = RenderSettings {
        credit_target: 10.0,
        ..RenderSettings::default()
    };
    let mut dashboard = Dashboard::new(seeded(), &list, settings).unwrap();
    dashboard.handle_input(Input::Enter);
    assert!(artifacts_text(&dashboard).contains("Earned 10  Remaining 0"));
}

#[test]
fn rendering_is_deterministic() {
    let list = institutions();
    let mut first = Dashboard::new(seeded(), &list, RenderSettings::default()).unwrap();
    let mut second = Dashboard::new(seeded(), &list, RenderSettings::default()).unwrap();
    first.handle_input(Input::Enter);
    second.handle_input(Input::Enter);
    assert_eq!(first.panel(), second.panel());
}

#[test]
fn unavailable_institution_shows_placeholder() {
    let list = institutions();
    let mut dashboard = Dashboard::new(seeded(), &list, RenderSettings::default()).unwrap();
    dashboard.handle_input(Input::Up);
    dashboard.handle_input(Input::Enter);

    assert_eq!(dashboard.accent(), Rgb(0x00, 0x66, 0xc1));
    assert!(artifacts_text(&dashboard).contains("Studies at TUM have not started yet."));

    submit(&mut dashboard, "/delete Physics");
    assert_eq!(dashboard.store().fetch_all().unwrap().len(), 2);
}

#[test]
fn full_frame_draws_both_screens() {
    let list = institutions();
    let mut dashboard = Dashboard::new(seeded(), &list, RenderSettings::default()).unwrap();
    let mut terminal = Terminal::new(TestBackend::new(200, 50)).unwrap();

    terminal.draw(|frame| ui::draw(frame, &dashboard)).unwrap();
    dashboard.handle_input(Input::Enter);
    terminal.draw(|frame| ui::draw(frame, &dashboard)).unwrap();

    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(screen.contains("Calculus"));
    assert!(screen.contains("Ctrl + Q"));
}

#[test]
fn quit_from_any_screen() {
    let list = institutions();
    let mut dashboard = Dashboard::new(MemoryStore::new(), &list, RenderSettings::default()).unwrap();
    dashboard.handle_input(Input::Enter);
    dashboard.handle_input(Input::Quit);
    assert!(!dashboard.is_running());
}
