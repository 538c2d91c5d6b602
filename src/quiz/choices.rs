use rand::seq::SliceRandom;
use rand::Rng;

use super::CHOICES_PER_QUESTION;
use crate::models::Question;

/// Uniformly shuffled copy of `items`. The source slice is left untouched.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// The correct answer plus up to three distractors taken from `pool`,
/// in random display order.
///
/// Distractors are sampled without replacement from the pool answers whose
/// text differs from the correct one; repeated texts are skipped. The list
/// is shorter than four only when the pool lacks three distinct wrong
/// answers, which validated content rules out.
pub fn generate_choices(question: &Question, pool: &[Question]) -> Vec<String> {
    generate_choices_with(question, pool, &mut rand::thread_rng())
}

pub fn generate_choices_with<R: Rng + ?Sized>(
    question: &Question,
    pool: &[Question],
    rng: &mut R,
) -> Vec<String> {
    let correct = question.correct_answer.as_str();
    let mut candidates: Vec<&str> = pool
        .iter()
        .map(|q| q.correct_answer.as_str())
        .filter(|answer| *answer != correct)
        .collect();

    let mut distractors: Vec<&str> = Vec::with_capacity(CHOICES_PER_QUESTION - 1);
    while distractors.len() < CHOICES_PER_QUESTION - 1 && !candidates.is_empty() {
        let picked = candidates.swap_remove(rng.gen_range(0..candidates.len()));
        if !distractors.contains(&picked) {
            distractors.push(picked);
        }
    }

    let mut choices: Vec<String> = std::iter::once(correct)
        .chain(distractors)
        .map(str::to_string)
        .collect();
    choices.shuffle(rng);
    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn pool() -> Vec<Question> {
        vec![
            Question::new("q1", "Pacific"),
            Question::new("q2", "Atlantic"),
            Question::new("q3", "Indian"),
            Question::new("q4", "Arctic"),
            Question::new("q5", "Southern"),
            Question::new("q6", "Atlantic"),
            Question::new("q7", "Pacific"),
        ]
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<u32> = (0..50).collect();
        for _ in 0..20 {
            let mut shuffled = shuffle_with(&items, &mut rng);
            assert_eq!(shuffled.len(), items.len());
            shuffled.sort_unstable();
            assert_eq!(shuffled, items);
        }
    }

    #[test]
    fn test_shuffle_leaves_source_untouched() {
        let items = vec!["a", "b", "c", "d"];
        let _ = shuffle(&items);
        assert_eq!(items, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_shuffle_keeps_duplicates() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut shuffled = shuffle_with(&["x", "x", "y"], &mut rng);
        shuffled.sort_unstable();
        assert_eq!(shuffled, vec!["x", "x", "y"]);
    }

    #[test]
    fn test_choices_contain_correct_answer_once() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(11);
        for question in &pool {
            for _ in 0..25 {
                let choices = generate_choices_with(question, &pool, &mut rng);
                assert_eq!(choices.len(), CHOICES_PER_QUESTION);
                let hits = choices
                    .iter()
                    .filter(|c| **c == question.correct_answer)
                    .count();
                assert_eq!(hits, 1);

                let unique: HashSet<&String> = choices.iter().collect();
                assert_eq!(unique.len(), choices.len(), "duplicate choice in {:?}", choices);

                let answers: HashSet<&str> =
                    pool.iter().map(|q| q.correct_answer.as_str()).collect();
                assert!(choices.iter().all(|c| answers.contains(c.as_str())));
            }
        }
    }

    #[test]
    fn test_short_pool_gives_fewer_choices() {
        let pool = vec![
            Question::new("q1", "Pacific"),
            Question::new("q2", "Atlantic"),
            Question::new("q3", "Atlantic"),
            Question::new("q4", "Pacific"),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        let mut choices = generate_choices_with(&pool[0], &pool, &mut rng);
        choices.sort();
        assert_eq!(choices, vec!["Atlantic".to_string(), "Pacific".to_string()]);
    }

    #[test]
    fn test_question_outside_pool() {
        let pool = pool();
        let question = Question::new("Coldest ocean?", "Southern");
        let choices = generate_choices(&question, &pool);
        assert_eq!(choices.len(), 4);
        assert_eq!(choices.iter().filter(|c| *c == "Southern").count(), 1);
    }
}
