use serde::{Deserialize, Serialize};

/// A trivia question. Questions carry no identifier; two questions are the
/// same question when their texts match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    #[serde(rename = "answer")]
    pub correct_answer: String,
}

impl Question {
    pub fn new(prompt: impl Into<String>, correct_answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            correct_answer: correct_answer.into(),
        }
    }
}
