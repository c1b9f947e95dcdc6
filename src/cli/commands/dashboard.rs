//! Dashboard command handler: owns the terminal for the session

use super::{dashboard_settings, open_configured_store, StartupError};
use crossterm::cursor::Show;
use crossterm::event;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use uni_grades::config::Config;
use uni_grades::core::dashboard::{Dashboard, Input};
use uni_grades::core::store::CourseStore;
use uni_grades::core::ui;
use uni_grades::{debug, info, logger};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive dashboard until the user quits
///
/// # Errors
/// Returns an error if the configuration is invalid, the store cannot be
/// opened or loaded, or the terminal fails.
pub fn run(config: &Config) -> Result<(), StartupError> {
    let (institutions, settings) = dashboard_settings(config)?;
    let store = open_configured_store()?;
    let mut dashboard = Dashboard::new(store, &institutions, settings)?;
    info!(
        "Loaded {} courses for {} institutions",
        dashboard.snapshot().len(),
        institutions.len()
    );

    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let result = event_loop(&mut terminal, &mut dashboard);
    drop(guard);
    debug!("Dashboard closed");

    result.map_err(StartupError::from)
}

/// Raw mode, alternate screen and a silenced console for as long as it lives.
///
/// Dropping it, on any return path or while unwinding, puts the terminal
/// back. A panic hook does the same before the panic message is printed.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen)?;
        logger::suppress_console();

        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            previous(info);
        }));
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Leave raw mode and the alternate screen; safe to call more than once.
fn restore_terminal() {
    logger::restore_console();
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

fn event_loop<S: CourseStore>(terminal: &mut Term, dashboard: &mut Dashboard<'_, S>) -> io::Result<()> {
    let size = terminal.size()?;
    dashboard.handle_input(Input::Resize(size.width, size.height));

    while dashboard.is_running() {
        terminal.draw(|frame| ui::draw(frame, dashboard))?;
        dashboard.handle_input(Input::from(event::read()?));
    }
    Ok(())
}
