use super::tiers::TipTier;
use super::{POINTS_PER_CORRECT_ANSWER, SECONDS_PER_QUESTION};
use crate::models::{QuizResult, QuizSession, Tip};

pub fn init_session(total: usize) -> QuizSession {
    init_session_with(total, SECONDS_PER_QUESTION)
}

/// A fresh session whose countdown starts at `seconds_per_question`.
pub fn init_session_with(total: usize, seconds_per_question: u32) -> QuizSession {
    QuizSession::new(total, seconds_per_question)
}

/// Score the answer given for the current question.
///
/// A timed-out question is always incorrect, whatever `submitted` holds.
/// The index is not advanced, and a question that was already answered is
/// left as it is.
pub fn score_answer(
    mut session: QuizSession,
    submitted: &str,
    correct: &str,
    timed_out: bool,
) -> QuizSession {
    if session.finished || session.is_current_answered() {
        return session;
    }

    if !timed_out && submitted == correct {
        session.score += POINTS_PER_CORRECT_ANSWER;
        session.correct_count += 1;
    } else {
        session.incorrect_count += 1;
    }

    if let Some(flag) = session.answered_flags.get_mut(session.current_index) {
        *flag = true;
    }
    session
}

/// Summarize a session. Accuracy is 0 for an empty quiz.
pub fn compute_result(session: &QuizSession, total: usize, tips: &[Tip]) -> QuizResult {
    let accuracy_percent = if total > 0 {
        session.correct_count as f64 * 100.0 / total as f64
    } else {
        0.0
    };

    QuizResult {
        score: session.score,
        correct_count: session.correct_count,
        incorrect_count: session.incorrect_count,
        total,
        accuracy_percent,
        personalized_tips: TipTier::for_accuracy(accuracy_percent).select(tips),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_all(total: usize, correct_until: usize) -> QuizSession {
        let mut session = init_session(total);
        for index in 0..total {
            session.current_index = index;
            let submitted = if index < correct_until { "right" } else { "wrong" };
            session = score_answer(session, submitted, "right", false);
        }
        session.finished = true;
        session
    }

    fn tips() -> Vec<Tip> {
        let mut tips = Vec::new();
        for category in [
            "Showering",
            "Personal Hygiene",
            "Kitchen",
            "Bathroom",
            "Equipment",
            "Gardening",
            "Leisure",
        ] {
            for n in 0..3 {
                tips.push(Tip::new(format!("{} tip {}", category, n), category));
            }
        }
        tips
    }

    #[test]
    fn test_init_session() {
        let session = init_session(20);
        assert_eq!(session.current_index, 0);
        assert_eq!(session.score, 0);
        assert_eq!(session.time_remaining, 45);
        assert!(!session.finished);
        assert_eq!(session.answered_flags, vec![false; 20]);
    }

    #[test]
    fn test_init_session_with_custom_countdown() {
        let session = init_session_with(5, 30);
        assert_eq!(session.time_remaining, 30);
        assert_eq!(session.total(), 5);
        assert_eq!(init_session(5), init_session_with(5, 45));
    }

    #[test]
    fn test_counts_track_answered_questions() {
        let mut session = init_session(6);
        let mut last = (0, 0);
        for index in 0..6 {
            session.current_index = index;
            session = score_answer(session, if index % 2 == 0 { "a" } else { "b" }, "a", false);

            assert_eq!(session.correct_count + session.incorrect_count, index + 1);
            assert_eq!(
                session.answered_count(),
                session.answered_flags.iter().filter(|f| **f).count()
            );
            assert!(session.correct_count >= last.0);
            assert!(session.incorrect_count >= last.1);
            last = (session.correct_count, session.incorrect_count);
        }
        assert_eq!(session.score, 30);
    }

    #[test]
    fn test_score_does_not_advance() {
        let session = score_answer(init_session(3), "a", "a", false);
        assert_eq!(session.current_index, 0);
        assert_eq!(session.answered_flags, vec![true, false, false]);
    }

    #[test]
    fn test_timeout_is_never_correct() {
        let session = score_answer(init_session(3), "", "", true);
        assert_eq!(session.correct_count, 0);
        assert_eq!(session.incorrect_count, 1);
        assert_eq!(session.score, 0);

        let session = score_answer(init_session(3), "a", "a", true);
        assert_eq!(session.correct_count, 0);
    }

    #[test]
    fn test_question_scored_once() {
        let session = score_answer(init_session(2), "a", "a", false);
        let again = score_answer(session.clone(), "a", "a", false);
        assert_eq!(again, session);
    }

    #[test]
    fn test_all_correct_result() {
        let session = answer_all(20, 20);
        let result = compute_result(&session, 20, &tips());
        assert_eq!(result.score, 200);
        assert_eq!(result.accuracy_percent, 100.0);
        assert_eq!(result.personalized_tips.len(), 3);
        assert!(result
            .personalized_tips
            .iter()
            .all(|t| t.category == "Equipment" || t.category == "Gardening"));
    }

    #[test]
    fn test_half_correct_result() {
        let session = answer_all(20, 10);
        let result = compute_result(&session, 20, &tips());
        assert_eq!(result.accuracy_percent, 50.0);
        assert_eq!(result.correct_count, 10);
        assert_eq!(result.incorrect_count, 10);
        assert_eq!(result.personalized_tips.len(), 5);
        assert!(result
            .personalized_tips
            .iter()
            .all(|t| t.category == "Showering" || t.category == "Personal Hygiene"));
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        let tips = tips();
        let at_80 = compute_result(&answer_all(10, 8), 10, &tips);
        assert_eq!(at_80.accuracy_percent, 80.0);
        assert_eq!(at_80.personalized_tips[0].category, "Equipment");

        let at_60 = compute_result(&answer_all(10, 6), 10, &tips);
        assert_eq!(at_60.accuracy_percent, 60.0);
        assert_eq!(at_60.personalized_tips.len(), 4);
        assert!(at_60
            .personalized_tips
            .iter()
            .all(|t| t.category == "Kitchen" || t.category == "Bathroom"));
    }

    #[test]
    fn test_compute_result_is_idempotent() {
        let session = answer_all(20, 13);
        let tips = tips();
        assert_eq!(
            compute_result(&session, 20, &tips),
            compute_result(&session, 20, &tips)
        );
    }

    #[test]
    fn test_empty_quiz_result() {
        let result = compute_result(&init_session(0), 0, &tips());
        assert_eq!(result.accuracy_percent, 0.0);
        assert_eq!(result.personalized_tips.len(), 5);
    }
}
