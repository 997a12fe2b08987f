//! Speech engine that "speaks" by writing lines to a text sink.
//!
//! Stands in for a platform synthesizer in headless environments. Output
//! looks like `[Zira] hello there`.

use std::io::{self, Write};
use std::sync::Mutex;

use async_trait::async_trait;

use super::engine::{SpeechEngine, SpeechError, Voice};

pub struct ConsoleSpeechEngine {
    voices: Vec<Voice>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSpeechEngine {
    /// Writes to stdout.
    pub fn new(voices: Vec<Voice>) -> Self {
        Self::with_writer(voices, Box::new(io::stdout()))
    }

    pub fn with_writer(voices: Vec<Voice>, out: Box<dyn Write + Send>) -> Self {
        Self {
            voices,
            out: Mutex::new(out),
        }
    }
}

#[async_trait]
impl SpeechEngine for ConsoleSpeechEngine {
    async fn speak(&self, text: &str, voice: Option<&Voice>) -> Result<(), SpeechError> {
        let name = voice
            .or_else(|| self.voices.first())
            .map(|v| v.name.as_str())
            .unwrap_or("default");
        let mut out = self
            .out
            .lock()
            .map_err(|_| SpeechError::Engine("output lock poisoned".to_string()))?;
        writeln!(out, "[{name}] {text}")
            .and_then(|_| out.flush())
            .map_err(|e| SpeechError::Engine(e.to_string()))
    }

    fn installed_voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }
}
