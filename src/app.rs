use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use crate::config::QuizSettings;
use crate::data::ContentRepository;
use crate::models::{AppState, QuizResult, Tip};
use crate::session::{SessionController, SessionEvent, SessionView, Step};

pub const ALL_CATEGORIES: &str = "All";

pub struct App {
    pub state: AppState,
    content: Arc<ContentRepository>,
    settings: QuizSettings,
    events: mpsc::UnboundedSender<SessionEvent>,
    session: Option<SessionController>,
    last_result: Option<QuizResult>,
    selected_option: usize,
    confirming_abandon: bool,
    result_scroll: usize,
    tip_categories: Vec<String>,
    selected_category: usize,
    tips_scroll: usize,
}

impl App {
    pub fn new(
        content: Arc<ContentRepository>,
        settings: QuizSettings,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let tip_categories = std::iter::once(ALL_CATEGORIES)
            .chain(content.distinct_categories())
            .map(str::to_string)
            .collect();

        Self {
            state: AppState::Home,
            content,
            settings,
            events,
            session: None,
            last_result: None,
            selected_option: 0,
            confirming_abandon: false,
            result_scroll: 0,
            tip_categories,
            selected_category: 0,
            tips_scroll: 0,
        }
    }

    pub fn content(&self) -> &ContentRepository {
        &self.content
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn session_view(&self) -> Option<SessionView<'_>> {
        self.session.as_ref().map(SessionController::view)
    }

    pub fn last_result(&self) -> Option<&QuizResult> {
        self.last_result.as_ref()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn is_confirming_abandon(&self) -> bool {
        self.confirming_abandon
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn start_quiz(&mut self) {
        if let Some(previous) = self.session.take() {
            previous.abandon();
        }
        self.session = Some(SessionController::start(
            Arc::clone(&self.content),
            &self.settings,
            self.events.clone(),
        ));
        self.selected_option = 0;
        self.confirming_abandon = false;
        self.result_scroll = 0;
        self.state = AppState::Quiz;
    }

    fn choice_count(&self) -> usize {
        match self.session_view() {
            Some(SessionView::Active(view)) => view.choices.len(),
            _ => 0,
        }
    }

    pub fn select_next_option(&mut self) {
        let count = self.choice_count();
        if count > 0 {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.choice_count();
        if count > 0 {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    pub fn submit_answer(&mut self) {
        if self.confirming_abandon {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let answer = match session.view() {
            SessionView::Active(view) => view.choices.get(self.selected_option).cloned(),
            _ => None,
        };
        if let Some(answer) = answer {
            let step = session.submit_answer(&answer);
            self.apply_step(step);
        }
    }

    /// Route a timer event to the running session, if any.
    pub fn handle_session_event(&mut self, event: SessionEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let step = session.handle(event);
        self.apply_step(step);
    }

    fn apply_step(&mut self, step: Step) {
        match step {
            Step::Advanced(_) => self.selected_option = 0,
            Step::Finished(result) => {
                self.session = None;
                self.selected_option = 0;
                self.confirming_abandon = false;
                self.last_result = Some(result);
                self.result_scroll = 0;
                self.state = AppState::Result;
            }
            Step::Ignored | Step::Ticked(_) | Step::Answered(_) => {}
        }
    }

    /// Ask for confirmation before leaving a running quiz.
    pub fn request_abandon(&mut self) {
        if self.session.is_some() {
            self.confirming_abandon = true;
        }
    }

    pub fn cancel_abandon(&mut self) {
        self.confirming_abandon = false;
    }

    pub fn confirm_abandon(&mut self) {
        if !self.confirming_abandon {
            return;
        }
        self.confirming_abandon = false;
        if let Some(session) = self.session.take() {
            session.abandon();
        }
        self.state = AppState::Home;
    }

    pub fn go_home(&mut self) {
        self.state = AppState::Home;
    }

    pub fn show_tips(&mut self) {
        self.tips_scroll = 0;
        self.state = AppState::Tips;
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self
            .last_result
            .as_ref()
            .map(|r| r.personalized_tips.len().saturating_sub(1))
            .unwrap_or(0);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn tip_categories(&self) -> &[String] {
        &self.tip_categories
    }

    pub fn selected_category(&self) -> usize {
        self.selected_category
    }

    pub fn tips_scroll(&self) -> usize {
        self.tips_scroll
    }

    pub fn next_category(&mut self) {
        self.selected_category = (self.selected_category + 1) % self.tip_categories.len();
        self.tips_scroll = 0;
    }

    pub fn previous_category(&mut self) {
        let count = self.tip_categories.len();
        self.selected_category = (self.selected_category + count - 1) % count;
        self.tips_scroll = 0;
    }

    pub fn visible_tips(&self) -> Vec<&Tip> {
        match self.tip_categories.get(self.selected_category) {
            Some(category) if category != ALL_CATEGORIES => self.content.tips_by_category(category),
            _ => self.content.tips().iter().collect(),
        }
    }

    pub fn scroll_tips_down(&mut self) {
        let max_scroll = self.visible_tips().len().saturating_sub(1);
        self.tips_scroll = (self.tips_scroll + 1).min(max_scroll);
    }

    pub fn scroll_tips_up(&mut self) {
        self.tips_scroll = self.tips_scroll.saturating_sub(1);
    }

    /// Tear down before exit; a running session is abandoned.
    pub fn shutdown(&mut self) {
        if let Some(session) = self.session.take() {
            session.abandon();
        }
        info!("shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> (App, mpsc::UnboundedReceiver<SessionEvent>) {
        let content = Arc::new(ContentRepository::builtin().unwrap());
        let (tx, rx) = mpsc::unbounded_channel();
        let settings = QuizSettings {
            total_questions: 3,
            ..QuizSettings::default()
        };
        (App::new(content, settings, tx), rx)
    }

    async fn drain_until_idle(app: &mut App, rx: &mut mpsc::UnboundedReceiver<SessionEvent>) {
        while matches!(app.session_view(), Some(SessionView::Feedback(_))) {
            let event = rx.recv().await.unwrap();
            app.handle_session_event(event);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_through_to_result() {
        let (mut app, mut rx) = app();
        app.start_quiz();
        assert_eq!(app.state, AppState::Quiz);

        for _ in 0..3 {
            app.select_next_option();
            app.submit_answer();
            assert!(matches!(app.session_view(), Some(SessionView::Feedback(_))));
            drain_until_idle(&mut app, &mut rx).await;
            assert_eq!(app.selected_option(), 0);
        }

        assert_eq!(app.state, AppState::Result);
        let result = app.last_result().unwrap();
        assert_eq!(result.total, 3);
        assert_eq!(result.correct_count + result.incorrect_count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finishing_resets_selection() {
        let (mut app, mut rx) = app();
        app.start_quiz();
        for _ in 0..2 {
            app.submit_answer();
            drain_until_idle(&mut app, &mut rx).await;
        }

        app.select_next_option();
        app.select_next_option();
        assert_eq!(app.selected_option(), 2);
        app.submit_answer();
        drain_until_idle(&mut app, &mut rx).await;

        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.selected_option(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandon_needs_confirmation() {
        let (mut app, mut rx) = app();
        app.start_quiz();

        app.request_abandon();
        assert!(app.is_confirming_abandon());
        app.submit_answer();
        assert!(matches!(app.session_view(), Some(SessionView::Active(_))));

        app.cancel_abandon();
        assert_eq!(app.state, AppState::Quiz);

        app.request_abandon();
        app.confirm_abandon();
        assert_eq!(app.state, AppState::Home);
        assert!(app.session_view().is_none());
        assert!(app.last_result().is_none());

        drop(app);
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn test_tip_categories() {
        let (mut app, _rx) = app();
        assert_eq!(app.tip_categories()[0], ALL_CATEGORIES);
        assert_eq!(app.visible_tips().len(), app.content().tips().len());

        app.next_category();
        let category = app.tip_categories()[1].clone();
        assert!(app.visible_tips().iter().all(|t| t.category == category));

        app.previous_category();
        app.previous_category();
        assert_eq!(app.selected_category(), app.tip_categories().len() - 1);
    }
}
