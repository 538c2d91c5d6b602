//! # ocean-quiz
//!
//! A timed terminal trivia game about ocean literacy and climate change.
//! Players answer multiple-choice questions against a countdown, get a
//! score and receive water-saving tips matched to how well they did.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ocean_quiz::{Quiz, QuizError, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let quiz = Quiz::from_settings(&Settings::default())?;
//!     quiz.run().await
//! }
//! ```

mod app;
pub mod config;
pub mod data;
pub mod models;
pub mod quiz;
pub mod session;
pub mod telemetry;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use tokio::sync::mpsc;
use tracing::info;

pub use app::App;
pub use config::{ConfigError, QuizSettings, Settings};
pub use data::{load_questions_from_json, load_tips_from_json, ContentRepository, LoadError};
pub use models::{AppState, Question, QuizResult, QuizSession, Tip};
pub use session::{SessionController, SessionEvent};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Error loading or validating content.
    Load(LoadError),
    /// Error reading settings.
    Config(ConfigError),
    /// IO error during quiz execution.
    Io(io::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Load(e) => write!(f, "Failed to load content: {}", e),
            QuizError::Config(e) => write!(f, "Configuration error: {}", e),
            QuizError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Load(e) => Some(e),
            QuizError::Config(e) => Some(e),
            QuizError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for QuizError {
    fn from(err: LoadError) -> Self {
        QuizError::Load(err)
    }
}

impl From<ConfigError> for QuizError {
    fn from(err: ConfigError) -> Self {
        QuizError::Config(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}

/// A quiz ready to run in the terminal.
pub struct Quiz {
    content: Arc<ContentRepository>,
    settings: QuizSettings,
}

impl Quiz {
    /// Create a quiz over already validated content.
    pub fn new(content: ContentRepository, settings: QuizSettings) -> Self {
        Self {
            content: Arc::new(content),
            settings,
        }
    }

    /// Build a quiz from settings, loading content files where configured
    /// and falling back to the builtin questions and tips otherwise.
    pub fn from_settings(settings: &Settings) -> Result<Self, QuizError> {
        settings.validate()?;
        let content = load_content(settings)?;
        Ok(Self::new(content, settings.quiz.clone()))
    }

    pub fn content(&self) -> &ContentRepository {
        &self.content
    }

    /// Run the quiz in the terminal.
    ///
    /// This takes over the terminal and returns when the user quits. Must be
    /// awaited inside a multi-threaded Tokio runtime so timers keep firing
    /// while the UI waits for input.
    pub async fn run(self) -> Result<(), QuizError> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = App::new(self.content, self.settings, tx);

        let mut guard = terminal::TerminalGuard::enter()?;
        let result = run_event_loop(guard.terminal(), &mut app, &mut rx);
        app.shutdown();
        drop(guard);
        result
    }
}

/// Combine builtin content with any files named in the settings.
pub fn load_content(settings: &Settings) -> Result<ContentRepository, QuizError> {
    let builtin = ContentRepository::builtin()?;
    let questions = match &settings.content.questions {
        Some(path) => load_questions_from_json(path)?,
        None => builtin.questions().to_vec(),
    };
    let tips = match &settings.content.tips {
        Some(path) => load_tips_from_json(path)?,
        None => builtin.tips().to_vec(),
    };

    let content = ContentRepository::new(questions, tips);
    content.validate()?;
    info!(
        questions = content.questions().len(),
        tips = content.tips().len(),
        "content ready"
    );
    Ok(content)
}

fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
) -> Result<(), QuizError> {
    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_session_event(event);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(INPUT_POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Home => handle_home_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
        AppState::Tips => handle_tips_input(app, key),
    }
}

fn handle_home_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.show_tips();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    if app.is_confirming_abandon() {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_abandon(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_abandon(),
            _ => {}
        }
        return false;
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_answer(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.request_abandon(),
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.start_quiz();
            false
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.show_tips();
            false
        }
        KeyCode::Char('h') | KeyCode::Esc => {
            app.go_home();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_tips_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
            app.next_category();
            false
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
            app.previous_category();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_tips_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_tips_up();
            false
        }
        KeyCode::Esc | KeyCode::Char('b') | KeyCode::Backspace => {
            app.go_home();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_load_builtin_content() {
        let content = load_content(&Settings::default()).unwrap();
        assert_eq!(
            content.questions().len(),
            ContentRepository::builtin().unwrap().questions().len()
        );
    }

    #[test]
    fn test_missing_content_file_is_reported() {
        let mut settings = Settings::default();
        settings.content.tips = Some(PathBuf::from("/no/such/tips.json"));
        let err = Quiz::from_settings(&settings).err().unwrap();
        assert!(matches!(err, QuizError::Load(LoadError::Io { .. })));
        assert!(err.to_string().starts_with("Failed to load content"));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = Settings::default();
        settings.quiz.total_questions = 0;
        assert!(matches!(
            Quiz::from_settings(&settings),
            Err(QuizError::Config(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn test_quiz_keys_leave_only_after_confirmation() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let _enter = rt.enter();

        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(
            Arc::new(ContentRepository::builtin().unwrap()),
            QuizSettings::default(),
            tx,
        );

        assert!(!handle_input(&mut app, KeyCode::Enter));
        assert_eq!(app.state, AppState::Quiz);

        assert!(!handle_input(&mut app, KeyCode::Char('q')));
        assert_eq!(app.state, AppState::Quiz);
        assert!(app.is_confirming_abandon());

        assert!(!handle_input(&mut app, KeyCode::Char('y')));
        assert_eq!(app.state, AppState::Home);
        assert!(handle_input(&mut app, KeyCode::Char('q')));
    }
}
