mod question;
mod session;
mod tip;

pub use question::Question;
pub use session::{QuizResult, QuizSession};
pub use tip::Tip;

/// Screen currently shown by the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    Quiz,
    Result,
    Tips,
}
