//! Pure quiz rules: shuffling, choice generation, scoring and results.
//!
//! Nothing here owns state. Functions take a [`QuizSession`] by value and
//! hand back the updated session, so the session controller stays the only
//! writer.
//!
//! [`QuizSession`]: crate::models::QuizSession

mod choices;
mod scoring;
mod tiers;

pub use choices::{generate_choices, generate_choices_with, shuffle, shuffle_with};
pub use scoring::{compute_result, init_session, init_session_with, score_answer};
pub use tiers::{format_time, performance_message, PerformanceTier, TimeBand, TipTier};

/// Seconds allowed per question.
pub const SECONDS_PER_QUESTION: u32 = 45;

/// Points awarded for each correct answer.
pub const POINTS_PER_CORRECT_ANSWER: u32 = 10;

/// Choices shown per question when the content allows it.
pub const CHOICES_PER_QUESTION: usize = 4;
