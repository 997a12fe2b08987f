//! # Core
//!
//! Process-level plumbing shared by the services: configuration loading
//! and resolution.
//!
//! ## Modules
//!
//! - [`config`]: `~/.xlabs/config.toml`, env overrides, `ResolvedConfig`

pub mod config;
