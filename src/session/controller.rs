//! The quiz session state machine.
//!
//! `Loading → Active(i) → Feedback(i) → Active(i + 1) → … → Finished`
//!
//! The controller is the only owner of the [`QuizSession`]. Timers live
//! inside the phase they belong to, so leaving a phase (or dropping the
//! controller) cancels them.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::timer::{SessionEvent, TimerHandle};
use crate::config::QuizSettings;
use crate::data::ContentRepository;
use crate::models::{Question, QuizResult, QuizSession};
use crate::quiz;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Outcome of an answered question, shown during the feedback pause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub timed_out: bool,
    pub correct_answer: String,
    pub score: u32,
}

/// What the presentation layer needs to draw an active question.
#[derive(Debug, Clone, Copy)]
pub struct ActiveView<'a> {
    pub prompt: &'a str,
    pub choices: &'a [String],
    pub time_remaining: u32,
    pub seconds_per_question: u32,
    pub index: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy)]
pub enum SessionView<'a> {
    Loading,
    Active(ActiveView<'a>),
    Feedback(&'a Feedback),
    Finished(&'a QuizResult),
}

/// Result of feeding an input or timer event to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The event did not apply to the current phase.
    Ignored,
    /// The countdown moved; carries the seconds left.
    Ticked(u32),
    /// The current question was scored.
    Answered(Feedback),
    /// Moved on to the question at this index.
    Advanced(usize),
    /// The last question was scored and the result is ready.
    Finished(QuizResult),
}

enum Phase {
    Loading,
    Active {
        choices: Vec<String>,
        _ticker: TimerHandle,
    },
    Feedback {
        feedback: Feedback,
        _delay: TimerHandle,
    },
    Finished(QuizResult),
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::Active { .. } => "active",
            Phase::Feedback { .. } => "feedback",
            Phase::Finished(_) => "finished",
        }
    }
}

pub struct SessionController {
    content: Arc<ContentRepository>,
    questions: Vec<Question>,
    session: QuizSession,
    settings: QuizSettings,
    phase: Phase,
    generation: u64,
    events: mpsc::UnboundedSender<SessionEvent>,
    rng: StdRng,
}

impl SessionController {
    /// Start a session and enter the first question.
    ///
    /// Must be called from within a Tokio runtime; timer events are
    /// delivered on `events`.
    pub fn start(
        content: Arc<ContentRepository>,
        settings: &QuizSettings,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self::start_with_rng(content, settings, events, StdRng::from_entropy())
    }

    pub fn start_with_rng(
        content: Arc<ContentRepository>,
        settings: &QuizSettings,
        events: mpsc::UnboundedSender<SessionEvent>,
        mut rng: StdRng,
    ) -> Self {
        let available = content.questions().len();
        let total = settings.total_questions.min(available);
        if total < settings.total_questions {
            warn!(
                requested = settings.total_questions,
                available, "not enough questions, shortening the quiz"
            );
        }

        let mut questions = quiz::shuffle_with(content.questions(), &mut rng);
        questions.truncate(total);

        let mut controller = Self {
            content,
            questions,
            session: quiz::init_session_with(total, settings.seconds_per_question),
            settings: settings.clone(),
            phase: Phase::Loading,
            generation: 0,
            events,
            rng,
        };

        info!(total, "quiz session started");
        if total == 0 {
            controller.finish();
        } else {
            controller.enter_active();
        }
        controller
    }

    pub fn view(&self) -> SessionView<'_> {
        match &self.phase {
            Phase::Loading => SessionView::Loading,
            Phase::Active { choices, .. } => SessionView::Active(ActiveView {
                prompt: self
                    .current_question()
                    .map(|q| q.prompt.as_str())
                    .unwrap_or_default(),
                choices,
                time_remaining: self.session.time_remaining,
                seconds_per_question: self.settings.seconds_per_question,
                index: self.session.current_index,
                total: self.total(),
            }),
            Phase::Feedback { feedback, .. } => SessionView::Feedback(feedback),
            Phase::Finished(result) => SessionView::Finished(result),
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.session.current_index)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    pub fn result(&self) -> Option<&QuizResult> {
        match &self.phase {
            Phase::Finished(result) => Some(result),
            _ => None,
        }
    }

    /// The user picked a choice.
    pub fn submit_answer(&mut self, answer: &str) -> Step {
        if !self.is_active() {
            debug!(phase = self.phase.name(), "answer ignored outside active phase");
            return Step::Ignored;
        }
        self.answer_current(answer, false)
    }

    /// Apply a timer event. Events from timers that are no longer armed
    /// are ignored.
    pub fn handle(&mut self, event: SessionEvent) -> Step {
        if event.generation() != self.generation {
            debug!(?event, current = self.generation, "stale timer event");
            return Step::Ignored;
        }

        match event {
            SessionEvent::Tick { .. } if self.is_active() => {
                self.session.time_remaining = self.session.time_remaining.saturating_sub(1);
                if self.session.time_remaining == 0 {
                    info!(index = self.session.current_index, "question timed out");
                    self.answer_current("", true)
                } else {
                    Step::Ticked(self.session.time_remaining)
                }
            }
            SessionEvent::FeedbackElapsed { .. } if matches!(self.phase, Phase::Feedback { .. }) => {
                self.advance()
            }
            _ => Step::Ignored,
        }
    }

    /// Leave the session without a result. Any running timer is cancelled.
    pub fn abandon(self) {
        info!(
            index = self.session.current_index,
            phase = self.phase.name(),
            "quiz session abandoned"
        );
    }

    pub fn into_result(self) -> Option<QuizResult> {
        match self.phase {
            Phase::Finished(result) => Some(result),
            _ => None,
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn enter_active(&mut self) {
        let Some(question) = self.questions.get(self.session.current_index) else {
            return;
        };
        let choices = quiz::generate_choices_with(question, self.content.questions(), &mut self.rng);
        let generation = self.next_generation();
        let ticker = TimerHandle::repeating(TICK_PERIOD, generation, self.events.clone());

        debug!(
            index = self.session.current_index,
            choices = choices.len(),
            "question active"
        );
        self.phase = Phase::Active {
            choices,
            _ticker: ticker,
        };
    }

    fn answer_current(&mut self, submitted: &str, timed_out: bool) -> Step {
        let Some(correct_answer) = self.current_question().map(|q| q.correct_answer.clone()) else {
            return Step::Ignored;
        };

        let before = self.session.correct_count;
        let session = std::mem::take(&mut self.session);
        self.session = quiz::score_answer(session, submitted, &correct_answer, timed_out);

        let feedback = Feedback {
            correct: self.session.correct_count > before,
            timed_out,
            correct_answer,
            score: self.session.score,
        };
        info!(
            index = self.session.current_index,
            correct = feedback.correct,
            timed_out,
            score = feedback.score,
            "question answered"
        );

        let generation = self.next_generation();
        let delay = TimerHandle::once(self.settings.feedback_delay(), generation, self.events.clone());
        self.phase = Phase::Feedback {
            feedback: feedback.clone(),
            _delay: delay,
        };
        Step::Answered(feedback)
    }

    fn advance(&mut self) -> Step {
        let next = self.session.current_index + 1;
        if next >= self.total() {
            return self.finish();
        }

        self.session.current_index = next;
        self.session.time_remaining = self.settings.seconds_per_question;
        self.enter_active();
        Step::Advanced(next)
    }

    fn finish(&mut self) -> Step {
        self.session.finished = true;
        let result = quiz::compute_result(&self.session, self.total(), self.content.tips());
        info!(
            score = result.score,
            correct = result.correct_count,
            total = result.total,
            accuracy = result.accuracy_percent,
            "quiz session finished"
        );
        self.generation += 1;
        self.phase = Phase::Finished(result.clone());
        Step::Finished(result)
    }
}
