//! Ratatui form backend implementation for the FormBackend trait.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::CrosstermBackend};
use survey_form::{ClickTarget, FormBackend, FormSession, Input};
use survey_form_client::SurveyClient;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::{Action, Dispatcher, FormView, HitMap, Theme, draw_form, map_key};

/// Error type for the Ratatui form backend.
#[derive(Debug, Error)]
pub enum RatatuiFormError {
    /// User aborted the form with Ctrl+C.
    #[error("Form cancelled by user")]
    Cancelled,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal setup/restore error.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Ratatui backend that shows the whole form on one screen.
#[derive(Debug, Clone)]
pub struct RatatuiFormBackend {
    /// Title shown when the form definition has none.
    title: String,
    theme: Theme,
    /// Longest wait for terminal input before outcomes are drained again.
    tick_rate: Duration,
    /// Run both health probes as soon as the form opens.
    startup_probes: bool,
    handle: Handle,
    client: SurveyClient,
}

impl RatatuiFormBackend {
    /// Create a backend that runs network calls on `handle` through `client`.
    pub fn new(handle: Handle, client: SurveyClient) -> Self {
        Self {
            title: "Survey".to_string(),
            theme: Theme::default(),
            tick_rate: Duration::from_millis(100),
            startup_probes: true,
            handle,
            client,
        }
    }

    /// Set the title shown at the top of the form.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_startup_probes(mut self, enabled: bool) -> Self {
        self.startup_probes = enabled;
        self
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, RatatuiFormError> {
        enable_raw_mode()
            .map_err(|e| RatatuiFormError::Terminal(format!("failed to enable raw mode: {e}")))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), RatatuiFormError> {
        disable_raw_mode()
            .map_err(|e| RatatuiFormError::Terminal(format!("failed to disable raw mode: {e}")))?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn event_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        session: &mut FormSession,
    ) -> Result<(), RatatuiFormError> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(self.handle.clone(), self.client.clone(), tx);

        if self.startup_probes {
            dispatcher.dispatch_all(session.request_health_checks());
        }

        let mut hits = HitMap::default();
        loop {
            while let Ok(outcome) = rx.try_recv() {
                session.apply(outcome);
            }

            let view = FormView {
                title: &self.title,
                theme: &self.theme,
                now: Instant::now(),
            };
            terminal.draw(|frame| hits = draw_form(frame, session, &view))?;

            if !event::poll(self.tick_rate)? {
                continue;
            }

            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    map_key(key, session.instruction_active())
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    Action::Input(Input::Click(hits.hit(mouse.column, mouse.row)))
                }
                _ => Action::Ignore,
            };

            match action {
                Action::Input(input) => {
                    if let Input::Click(ClickTarget::Option { row, option }) = input {
                        tracing::debug!(row, option, "option clicked");
                    }
                    dispatcher.dispatch_all(session.handle(input));
                }
                Action::Quit => {
                    tracing::info!("form closed");
                    return Ok(());
                }
                Action::Cancel => return Err(RatatuiFormError::Cancelled),
                Action::Ignore => {}
            }
        }
    }
}

impl FormBackend for RatatuiFormBackend {
    type Error = RatatuiFormError;

    fn run(&self, session: &mut FormSession) -> Result<(), Self::Error> {
        let mut terminal = self.setup_terminal()?;
        let result = self.event_loop(&mut terminal, session);
        // Restore even when the loop failed; its error takes precedence
        let restored = self.restore_terminal(&mut terminal);
        result.and(restored)
    }
}
