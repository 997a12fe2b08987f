//! # Speech
//!
//! Text-to-speech passthrough. The platform engine does the talking; the
//! service validates input, picks voices and reports engine failures.

pub mod console;
pub mod engine;
pub mod service;

pub use console::ConsoleSpeechEngine;
pub use engine::{SpeechEngine, SpeechError, Voice};
pub use service::TextToSpeechService;
