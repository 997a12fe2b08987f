use std::sync::Arc;

use log::{debug, warn};

use super::engine::{SpeechEngine, SpeechError, Voice};

pub struct TextToSpeechService {
    engine: Arc<dyn SpeechEngine>,
}

impl TextToSpeechService {
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        Self { engine }
    }

    /// Speaks `text` with the engine's default voice.
    pub async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }
        debug!("Speaking {} chars", text.len());
        self.engine.speak(text, None).await.inspect_err(|e| warn!("Speech failed: {e}"))
    }

    /// Speaks `text` with the first installed voice for `language`.
    pub async fn speak_in(&self, text: &str, language: &str) -> Result<(), SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }
        let voice = self
            .voice_for(language)
            .ok_or_else(|| SpeechError::NoVoice(language.to_string()))?;
        debug!("Speaking {} chars with voice '{}'", text.len(), voice.name);
        self.engine
            .speak(text, Some(&voice))
            .await
            .inspect_err(|e| warn!("Speech failed: {e}"))
    }

    /// Distinct languages of the installed voices, in first-seen order.
    pub fn installed_languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = Vec::new();
        for voice in self.engine.installed_voices() {
            if !languages.contains(&voice.language) {
                languages.push(voice.language);
            }
        }
        languages
    }

    fn voice_for(&self, language: &str) -> Option<Voice> {
        self.engine
            .installed_voices()
            .into_iter()
            .find(|v| v.language.eq_ignore_ascii_case(language))
    }
}
