use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// An installed synthesizer voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    /// BCP 47 tag, e.g. `en-US`.
    pub language: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: language.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechError {
    /// Nothing to say.
    EmptyText,
    /// No installed voice speaks the requested language.
    NoVoice(String),
    /// The platform engine failed.
    Engine(String),
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::EmptyText => write!(f, "nothing to speak"),
            SpeechError::NoVoice(language) => write!(f, "no installed voice for language {language}"),
            SpeechError::Engine(msg) => write!(f, "speech engine error: {msg}"),
        }
    }
}

impl std::error::Error for SpeechError {}

/// The platform's speech synthesizer.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Speaks `text`, resolving when the engine has finished. `None` lets the
    /// engine use its default voice.
    async fn speak(&self, text: &str, voice: Option<&Voice>) -> Result<(), SpeechError>;

    fn installed_voices(&self) -> Vec<Voice>;
}
