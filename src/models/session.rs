use super::Tip;

/// Mutable progress of one quiz run.
///
/// Owned by the session controller and threaded by value through the
/// scoring functions in [`crate::quiz`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    pub current_index: usize,
    pub score: u32,
    pub correct_count: usize,
    pub incorrect_count: usize,
    /// Seconds left on the current question.
    pub time_remaining: u32,
    pub finished: bool,
    pub answered_flags: Vec<bool>,
}

impl QuizSession {
    pub fn new(total: usize, seconds_per_question: u32) -> Self {
        Self {
            current_index: 0,
            score: 0,
            correct_count: 0,
            incorrect_count: 0,
            time_remaining: seconds_per_question,
            finished: false,
            answered_flags: vec![false; total],
        }
    }

    pub fn total(&self) -> usize {
        self.answered_flags.len()
    }

    pub fn answered_count(&self) -> usize {
        self.correct_count + self.incorrect_count
    }

    pub fn is_current_answered(&self) -> bool {
        self.answered_flags
            .get(self.current_index)
            .copied()
            .unwrap_or(false)
    }
}

/// Final summary of a finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub score: u32,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub total: usize,
    pub accuracy_percent: f64,
    pub personalized_tips: Vec<Tip>,
}
