//! Dashboard state machine
//!
//! A session starts on the institution picker. Confirming an institution
//! opens the data screen, which shows the rendered artifacts (or a
//! placeholder for an institution without data) and accepts slash commands.
//! Every command that changes the store goes through
//! [`Dashboard::apply_mutation`], which re-fetches the snapshot and
//! re-renders the panel before the next frame is drawn.

pub mod input;
pub mod view;

pub use input::Input;
pub use view::{DataView, PickerView, Status};

use crate::core::interpreter::{apply_command, parse_command, Command};
use crate::core::models::{CourseField, Document, Institution, Institutions, Rgb};
use crate::core::render::{render_artifacts, render_placeholder, Panel, RenderSettings};
use crate::core::store::{CourseStore, StoreError};

/// Screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Institution list
    Picker,
    /// Courses, charts and the command line
    Data,
}

/// One interactive session over a course store
pub struct Dashboard<'a, S: CourseStore> {
    store: S,
    institutions: &'a Institutions,
    settings: RenderSettings,
    screen: Screen,
    cursor: usize,
    selected: Option<usize>,
    snapshot: Vec<Document>,
    headers: Vec<String>,
    panel: Panel,
    input: String,
    status: Option<Status>,
    size: (u16, u16),
    running: bool,
}

impl<'a, S: CourseStore> Dashboard<'a, S> {
    /// Start a session and load the initial snapshot
    ///
    /// # Errors
    /// Returns the store error if the initial fetch fails; the dashboard cannot
    /// start without a snapshot.
    pub fn new(
        store: S,
        institutions: &'a Institutions,
        settings: RenderSettings,
    ) -> Result<Self, StoreError> {
        let mut dashboard = Self {
            store,
            institutions,
            settings,
            screen: Screen::Picker,
            cursor: 0,
            selected: None,
            snapshot: Vec::new(),
            headers: Vec::new(),
            panel: Panel::Unavailable(ratatui::text::Text::default()),
            input: String::new(),
            status: None,
            size: (0, 0),
            running: true,
        };
        dashboard.refresh()?;
        crate::debug!(
            "Dashboard started with {} courses",
            dashboard.snapshot.len()
        );
        Ok(dashboard)
    }

    /// Screen currently shown
    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    /// `false` once the user has quit
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Last reported terminal size
    #[must_use]
    pub const fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Courses as of the last fetch
    #[must_use]
    pub fn snapshot(&self) -> &[Document] {
        &self.snapshot
    }

    /// Course table column order
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Feed one input event
    pub fn handle_input(&mut self, input: Input) {
        match (self.screen, input) {
            (_, Input::Quit) => {
                crate::debug!("Quit requested");
                self.running = false;
            }
            (_, Input::Resize(width, height)) => self.size = (width, height),
            (Screen::Picker, Input::Up | Input::Char('k')) => {
                let len = self.institutions.len();
                self.cursor = (self.cursor + len - 1) % len;
            }
            (Screen::Picker, Input::Down | Input::Char('j')) => {
                self.cursor = (self.cursor + 1) % self.institutions.len();
            }
            (Screen::Picker, Input::Enter) => self.confirm(),
            (Screen::Data, Input::Back) => self.back(),
            (Screen::Data, Input::Enter) => self.submit(),
            (Screen::Data, Input::Char(c)) => self.input.push(c),
            (Screen::Data, Input::Backspace) => {
                self.input.pop();
            }
            _ => {}
        }
    }

    /// Mutate the store, then re-fetch and re-render.
    ///
    /// On success the status names the affected course. A rejected command
    /// leaves the snapshot untouched. If the store accepted the change but the
    /// re-fetch fails, the previous snapshot stays on screen and the fetch
    /// error becomes the status.
    pub fn apply_mutation(&mut self, command: &Command) {
        match apply_command(&mut self.store, command) {
            Ok(outcome) => {
                crate::info!("{}", outcome.status);
                self.status = Some(match self.refresh() {
                    Ok(()) => Status::Success(outcome.status),
                    Err(e) => {
                        crate::error!("Failed to reload courses: {e}");
                        Status::Error(format!("Error reloading courses: {e}"))
                    }
                });
            }
            Err(e) => {
                crate::warn!("Command for '{}' failed: {e}", command.course_name());
                self.status = Some(Status::Error(e.status_line()));
            }
        }
    }

    fn confirm(&mut self) {
        if self.selected == Some(self.cursor) {
            crate::debug!("Institution deselected");
            self.selected = None;
            self.render();
            return;
        }
        self.selected = Some(self.cursor);
        self.screen = Screen::Data;
        if let Some(institution) = self.institution() {
            crate::debug!("Selected {}", institution.name);
        }
        self.render();
    }

    fn back(&mut self) {
        crate::debug!("Back to picker");
        self.screen = Screen::Picker;
        self.selected = None;
        self.input.clear();
        self.status = None;
    }

    fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        if self.institution().is_some_and(|institution| !institution.available) {
            return;
        }
        match parse_command(&line) {
            Ok(Some(command)) => self.apply_mutation(&command),
            Ok(None) => {}
            Err(e) => self.status = Some(Status::Error(e.status_line())),
        }
    }

    fn refresh(&mut self) -> Result<(), StoreError> {
        let snapshot = self.store.fetch_all()?;
        let mut headers = self.store.fetch_field_names()?;
        if headers.is_empty() {
            headers = CourseField::default_headers();
        }
        self.snapshot = snapshot;
        self.headers = headers;
        self.render();
        Ok(())
    }

    fn render(&mut self) {
        self.panel = match self.institution() {
            Some(institution) if !institution.available => {
                Panel::Unavailable(render_placeholder(institution.color, &institution.name))
            }
            selected => {
                let accent = selected.map_or(Rgb::WHITE, |institution| institution.color);
                Panel::Charts(Box::new(render_artifacts(
                    &self.settings,
                    accent,
                    &self.headers,
                    &self.snapshot,
                )))
            }
        };
    }
}

impl<S: CourseStore> PickerView for Dashboard<'_, S> {
    fn institutions(&self) -> &Institutions {
        self.institutions
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn selected(&self) -> Option<usize> {
        self.selected
    }
}

impl<S: CourseStore> DataView for Dashboard<'_, S> {
    fn institution(&self) -> Option<&Institution> {
        self.selected.and_then(|index| self.institutions.get(index))
    }

    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn input(&self) -> &str {
        &self.input
    }

    fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }
}
