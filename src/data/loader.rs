use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::models::{Question, Tip};

/// Error raised while loading or validating quiz content.
#[derive(Debug)]
pub enum LoadError {
    /// The content file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The content file is not a valid JSON list of records.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The collection holds no records.
    Empty { what: &'static str },
    /// A record has a blank text field.
    Blank { what: &'static str, position: usize },
    /// Too few distinct answers to build four choices per question.
    NotEnoughAnswers { distinct: usize, required: usize },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            LoadError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            LoadError::Empty { what } => write!(f, "content must contain at least one {}", what),
            LoadError::Blank { what, position } => {
                write!(f, "{} #{} has blank text", what, position + 1)
            }
            LoadError::NotEnoughAnswers { distinct, required } => write!(
                f,
                "questions need at least {} distinct answers, found {}",
                required, distinct
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Load questions from a JSON file holding `[{"prompt": .., "answer": ..}]`.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let questions: Vec<Question> = load_json_list(path.as_ref())?;
    if questions.is_empty() {
        return Err(LoadError::Empty { what: "question" });
    }
    info!(path = %path.as_ref().display(), count = questions.len(), "loaded questions");
    Ok(questions)
}

/// Load tips from a JSON file holding `[{"text": .., "category": ..}]`.
pub fn load_tips_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Tip>, LoadError> {
    let tips: Vec<Tip> = load_json_list(path.as_ref())?;
    if tips.is_empty() {
        return Err(LoadError::Empty { what: "tip" });
    }
    info!(path = %path.as_ref().display(), count = tips.len(), "loaded tips");
    Ok(tips)
}

pub(crate) fn parse_json_list<T: DeserializeOwned>(
    json: &str,
    origin: &Path,
) -> Result<Vec<T>, LoadError> {
    serde_json::from_str(json).map_err(|source| LoadError::Parse {
        path: origin.to_path_buf(),
        source,
    })
}

fn load_json_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    debug!(path = %path.display(), "reading content file");
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json_list(&json, path)
}
