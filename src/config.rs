//! Settings loaded from an optional TOML file, overridable from the CLI.
//!
//! ```toml
//! [quiz]
//! total_questions = 20
//! seconds_per_question = 45
//! feedback_millis = 2000
//!
//! [content]
//! questions = "questions.json"
//! tips = "tips.json"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::quiz::SECONDS_PER_QUESTION;

const DEFAULT_TOTAL_QUESTIONS: usize = 20;
const DEFAULT_FEEDBACK_MILLIS: u64 = 2000;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    Invalid(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config {}: {}", path.display(), source)
            }
            ConfigError::Invalid(reason) => write!(f, "invalid config: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub quiz: QuizSettings,
    pub content: ContentSettings,
}

/// Pacing of a quiz session.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuizSettings {
    pub total_questions: usize,
    pub seconds_per_question: u32,
    pub feedback_millis: u64,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            total_questions: DEFAULT_TOTAL_QUESTIONS,
            seconds_per_question: SECONDS_PER_QUESTION,
            feedback_millis: DEFAULT_FEEDBACK_MILLIS,
        }
    }
}

impl QuizSettings {
    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_millis)
    }
}

/// Optional content files replacing the builtin questions or tips.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentSettings {
    pub questions: Option<PathBuf>,
    pub tips: Option<PathBuf>,
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded settings");
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quiz.total_questions == 0 {
            return Err(ConfigError::Invalid("total_questions must be positive"));
        }
        if self.quiz.seconds_per_question == 0 {
            return Err(ConfigError::Invalid("seconds_per_question must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.quiz.total_questions, 20);
        assert_eq!(settings.quiz.seconds_per_question, 45);
        assert_eq!(settings.quiz.feedback_delay(), Duration::from_secs(2));
        assert!(settings.content.questions.is_none());
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::from_toml(
            r#"
            [quiz]
            total_questions = 10

            [content]
            tips = "my_tips.json"
            "#,
        )
        .unwrap();
        assert_eq!(settings.quiz.total_questions, 10);
        assert_eq!(settings.quiz.seconds_per_question, 45);
        assert_eq!(settings.content.tips, Some(PathBuf::from("my_tips.json")));
    }

    #[test]
    fn test_validate() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());
        settings.quiz.seconds_per_question = 0;
        assert!(matches!(settings.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_bad_toml() {
        assert!(Settings::from_toml("[quiz]\ntotal_questions = \"many\"").is_err());
        assert!(matches!(
            Settings::load("/no/such/config.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
