//! Roll Holder Settings Crate
//!
//! Handles generator configuration and its persistence as TOML or JSON.

pub mod config;
pub mod error;

pub use config::{Config, LayoutSettings, OutputFormat, OutputSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
