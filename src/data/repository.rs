use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use ratatui::style::Color;

use super::loader::{parse_json_list, LoadError};
use crate::models::{Question, Tip};

const BUILTIN_QUESTIONS: &str = include_str!("questions.json");
const BUILTIN_TIPS: &str = include_str!("tips.json");

/// Distinct answers needed so every question gets three distractors.
const MIN_DISTINCT_ANSWERS: usize = 4;

/// Question topics and the keywords that place a question in them.
pub const TOPICS: [(&str, &[&str]); 5] = [
    (
        "Pollution",
        &["pollution", "plastic", "litter", "contamination", "sewage", "oil"],
    ),
    (
        "Biodiversity",
        &["biodiversity", "species", "coral", "reef", "marine life", "ecosystem"],
    ),
    (
        "Climate Change",
        &["climate", "warming", "temperature", "acidification", "carbon", "greenhouse"],
    ),
    (
        "Conservation",
        &["conservation", "protection", "sustainable", "preservation", "mpa", "protected area"],
    ),
    (
        "Energy",
        &["energy", "renewable", "wind", "tidal", "wave", "thermal"],
    ),
];

/// Read-only store of every question and tip known to the app.
#[derive(Debug, Clone)]
pub struct ContentRepository {
    questions: Vec<Question>,
    tips: Vec<Tip>,
}

impl ContentRepository {
    pub fn new(questions: Vec<Question>, tips: Vec<Tip>) -> Self {
        Self { questions, tips }
    }

    /// Content compiled into the binary.
    pub fn builtin() -> Result<Self, LoadError> {
        let questions = parse_json_list(BUILTIN_QUESTIONS, Path::new("<builtin questions>"))?;
        let tips = parse_json_list(BUILTIN_TIPS, Path::new("<builtin tips>"))?;
        let repo = Self::new(questions, tips);
        repo.validate()?;
        Ok(repo)
    }

    /// Check the guarantees the quiz relies on: no blank records, and
    /// enough distinct answers that every question can show four choices.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.questions.is_empty() {
            return Err(LoadError::Empty { what: "question" });
        }
        if self.tips.is_empty() {
            return Err(LoadError::Empty { what: "tip" });
        }

        for (position, question) in self.questions.iter().enumerate() {
            if question.prompt.trim().is_empty() || question.correct_answer.trim().is_empty() {
                return Err(LoadError::Blank {
                    what: "question",
                    position,
                });
            }
        }
        for (position, tip) in self.tips.iter().enumerate() {
            if tip.text.trim().is_empty() || tip.category.trim().is_empty() {
                return Err(LoadError::Blank {
                    what: "tip",
                    position,
                });
            }
        }

        let distinct = self
            .questions
            .iter()
            .map(|q| q.correct_answer.as_str())
            .collect::<HashSet<_>>()
            .len();
        if distinct < MIN_DISTINCT_ANSWERS {
            return Err(LoadError::NotEnoughAnswers {
                distinct,
                required: MIN_DISTINCT_ANSWERS,
            });
        }

        Ok(())
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn tips(&self) -> &[Tip] {
        &self.tips
    }

    pub fn tips_by_category(&self, category: &str) -> Vec<&Tip> {
        self.tips
            .iter()
            .filter(|tip| tip.category == category)
            .collect()
    }

    pub fn distinct_categories(&self) -> BTreeSet<&str> {
        self.tips.iter().map(|tip| tip.category.as_str()).collect()
    }

    /// Questions whose prompt or answer mentions one of the topic keywords.
    /// Unknown topics match nothing.
    pub fn questions_by_topic(&self, topic: &str) -> Vec<&Question> {
        let Some((_, keywords)) = TOPICS.iter().find(|(name, _)| *name == topic) else {
            return Vec::new();
        };

        self.questions
            .iter()
            .filter(|question| {
                let prompt = question.prompt.to_lowercase();
                let answer = question.correct_answer.to_lowercase();
                keywords
                    .iter()
                    .any(|keyword| prompt.contains(keyword) || answer.contains(keyword))
            })
            .collect()
    }
}

pub fn category_icon(category: &str) -> &'static str {
    match category {
        "Showering" => "🚿",
        "Personal Hygiene" => "🦷",
        "Maintenance" => "🔧",
        "Appliances" => "🏠",
        "Kitchen" => "🍽",
        "Equipment" => "⚙",
        "Outdoor Cleaning" => "🧹",
        "Gardening" => "🌱",
        "Bathroom" => "🚽",
        "Leisure" => "🎯",
        _ => "💧",
    }
}

pub fn category_color(category: &str) -> Color {
    match category {
        "Showering" | "Bathroom" => Color::Blue,
        "Personal Hygiene" => Color::Magenta,
        "Maintenance" => Color::LightRed,
        "Appliances" => Color::LightGreen,
        "Kitchen" => Color::Yellow,
        "Equipment" => Color::Gray,
        "Outdoor Cleaning" => Color::Cyan,
        "Gardening" => Color::Green,
        "Leisure" => Color::Red,
        _ => Color::LightBlue,
    }
}
