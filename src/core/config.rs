//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.xlabs/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::serialization::SerializationFormat;
use crate::speech::Voice;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct XlabsConfig {
    #[serde(default)]
    pub serialization: SerializationConfig,
    #[serde(default)]
    pub voices: Vec<Voice>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SerializationConfig {
    pub format: Option<SerializationFormat>,
    pub pretty: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_VOICE_NAME: &str = "default";
pub const DEFAULT_VOICE_LANGUAGE: &str = "en-US";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub format: SerializationFormat,
    pub pretty: bool,
    pub voices: Vec<Voice>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.xlabs/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".xlabs").join("config.toml"))
}

/// Load config from `~/.xlabs/config.toml`.
pub fn load_config() -> Result<XlabsConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(XlabsConfig::default())
        }
    }
}

/// Load config from `path`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `XlabsConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<XlabsConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(XlabsConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: XlabsConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# XLabs Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [serialization]
# format = "json"                    # "json", "toml" or "binary" (or XLABS_FORMAT)
# pretty = false                     # Or XLABS_PRETTY=1

# [[voices]]
# name = "Zira"
# language = "en-US"

# [[voices]]
# name = "Hedda"
# language = "de-DE"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_format` and `cli_pretty` are from CLI flags (None = not specified).
pub fn resolve(
    config: &XlabsConfig,
    cli_format: Option<SerializationFormat>,
    cli_pretty: Option<bool>,
) -> ResolvedConfig {
    // Format: CLI → env → config → default
    let format = cli_format
        .or_else(|| env_format("XLABS_FORMAT"))
        .or(config.serialization.format)
        .unwrap_or_default();

    // Pretty: CLI → env → config → off
    let pretty = cli_pretty
        .or_else(|| env_flag("XLABS_PRETTY"))
        .or(config.serialization.pretty)
        .unwrap_or(false);

    // No voices configured: one placeholder so speech has something to use
    let voices = if config.voices.is_empty() {
        vec![Voice::new(DEFAULT_VOICE_NAME, DEFAULT_VOICE_LANGUAGE)]
    } else {
        config.voices.clone()
    };

    ResolvedConfig {
        format,
        pretty,
        voices,
    }
}

fn env_format(var: &str) -> Option<SerializationFormat> {
    let value = std::env::var(var).ok()?;
    match value.parse() {
        Ok(format) => Some(format),
        Err(e) => {
            warn!("Ignoring {var}: {e}");
            None
        }
    }
}

fn env_flag(var: &str) -> Option<bool> {
    std::env::var(var)
        .ok()
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}
