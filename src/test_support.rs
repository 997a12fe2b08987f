//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::navigation::{HostError, NavigationHost, Page};
use crate::speech::{SpeechEngine, SpeechError, Voice};

#[derive(Debug)]
pub struct HomePage {
    title: String,
}

impl Default for HomePage {
    fn default() -> Self {
        Self {
            title: "Home".to_string(),
        }
    }
}

impl Page for HomePage {
    fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Default)]
pub struct SettingsPage;

impl Page for SettingsPage {
    fn title(&self) -> &str {
        "Settings"
    }
}

/// Retitles itself from the `id` field of the navigation parameter.
#[derive(Debug)]
pub struct DetailPage {
    title: String,
}

impl Default for DetailPage {
    fn default() -> Self {
        Self {
            title: "Detail".to_string(),
        }
    }
}

impl Page for DetailPage {
    fn title(&self) -> &str {
        &self.title
    }

    fn on_navigated_to(&mut self, parameter: Option<&Value>) {
        if let Some(id) = parameter.and_then(|p| p.get("id")) {
            self.title = format!("Detail {id}");
        }
    }
}

/// Host that records every push/pop instead of displaying anything.
#[derive(Default)]
pub struct RecordingHost {
    stack: Mutex<Vec<Box<dyn Page>>>,
    pushes: Mutex<Vec<(String, bool)>>,
    pops: Mutex<Vec<bool>>,
    rejected_title: Option<String>,
    push_error: Option<HostError>,
}

impl RecordingHost {
    /// Refuses pages with the given title in `accepts`.
    pub fn rejecting(title: &str) -> Self {
        Self {
            rejected_title: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// Fails every push with `error`.
    pub fn failing(error: HostError) -> Self {
        Self {
            push_error: Some(error),
            ..Self::default()
        }
    }

    pub fn pushes(&self) -> Vec<(String, bool)> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn pops(&self) -> Vec<bool> {
        self.pops.lock().unwrap().clone()
    }
}

#[async_trait]
impl NavigationHost for RecordingHost {
    fn name(&self) -> &str {
        "recording"
    }

    fn accepts(&self, page: &dyn Page) -> bool {
        self.rejected_title.as_deref() != Some(page.title())
    }

    async fn push(&self, page: Box<dyn Page>, animated: bool) -> Result<(), HostError> {
        if let Some(error) = &self.push_error {
            return Err(error.clone());
        }
        self.pushes
            .lock()
            .unwrap()
            .push((page.title().to_string(), animated));
        self.stack.lock().unwrap().push(page);
        Ok(())
    }

    async fn pop(&self, animated: bool) -> Result<Box<dyn Page>, HostError> {
        self.pops.lock().unwrap().push(animated);
        self.stack.lock().unwrap().pop().ok_or(HostError::EmptyStack)
    }
}

/// Speech engine that records what it was asked to say.
#[derive(Default)]
pub struct ScriptedEngine {
    pub voices: Vec<Voice>,
    pub fail_with: Option<String>,
    pub(crate) spoken: Mutex<Vec<(String, Option<String>)>>,
}

impl ScriptedEngine {
    pub fn with_voices(voices: &[(&str, &str)]) -> Self {
        Self {
            voices: voices
                .iter()
                .map(|(name, language)| Voice::new(*name, *language))
                .collect(),
            ..Self::default()
        }
    }

    /// (text, voice name) pairs in call order.
    pub fn spoken(&self) -> Vec<(String, Option<String>)> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechEngine for ScriptedEngine {
    async fn speak(&self, text: &str, voice: Option<&Voice>) -> Result<(), SpeechError> {
        if let Some(msg) = &self.fail_with {
            return Err(SpeechError::Engine(msg.clone()));
        }
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), voice.map(|v| v.name.clone())));
        Ok(())
    }

    fn installed_voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }
}
