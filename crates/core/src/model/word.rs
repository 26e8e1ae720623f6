use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Longest accepted word label, in characters.
pub const MAX_WORD_CHARS: usize = 64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("word label is empty")]
    Empty,

    #[error("word label exceeds {MAX_WORD_CHARS} characters: {len}")]
    TooLong { len: usize },
}

/// A relaxing word the user repeats during a session.
///
/// Trimmed, non-empty, bounded length. Stored verbatim on the session record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

impl Word {
    /// Validates and normalizes a word label.
    ///
    /// # Errors
    ///
    /// Returns `WordError::Empty` for blank input and `WordError::TooLong`
    /// when the trimmed label exceeds `MAX_WORD_CHARS`.
    pub fn new(label: impl Into<String>) -> Result<Self, WordError> {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(WordError::Empty);
        }
        let len = trimmed.chars().count();
        if len > MAX_WORD_CHARS {
            return Err(WordError::TooLong { len });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Word {
    type Error = WordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Word::new(value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0
    }
}

/// The builtin catalog shown in the word selector.
#[must_use]
pub fn builtin_words() -> &'static [&'static str] {
    &["calm", "peace", "breathe", "stillness", "ease", "release"]
}
