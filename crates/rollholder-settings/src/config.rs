//! Configuration for the roll holder generator
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, stored by default in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Holder dimensions and material thickness
//! - Finger joint proportions
//! - Sheet layout
//! - Laser settings for G-code output
//! - Output format and flattening tolerance

use crate::error::{ConfigError, SettingsError, SettingsResult};
use rollholder_camtools::roll_holder::{ResolvedMeasurements, DEFAULT_SPACING};
use rollholder_camtools::{FingerJointSettings, LaserSettings, RollHolderParameters, DEFAULT_TOLERANCE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Cut file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Gcode,
    Svg,
    Dxf,
}

impl OutputFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Gcode => "gcode",
            Self::Svg => "svg",
            Self::Dxf => "dxf",
        }
    }

    /// Guess the format from a file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "gcode" | "nc" | "ngc" => Some(Self::Gcode),
            "svg" => Some(Self::Svg),
            "dxf" => Some(Self::Dxf),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gcode => write!(f, "gcode"),
            Self::Svg => write!(f, "svg"),
            Self::Dxf => write!(f, "dxf"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcode" | "nc" => Ok(Self::Gcode),
            "svg" => Ok(Self::Svg),
            "dxf" => Ok(Self::Dxf),
            _ => Err(ConfigError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Sheet layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Gap between neighbouring panels (mm)
    pub spacing: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// Curve flattening tolerance (mm)
    pub tolerance: f32,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Gcode,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Complete generator configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Holder dimensions
    pub holder: RollHolderParameters,
    /// Finger joint proportions
    pub finger_joint: FingerJointSettings,
    /// Sheet layout
    pub layout: LayoutSettings,
    /// Laser settings
    pub laser: LaserSettings,
    /// Output settings
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/rollholder/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::Config(ConfigError::UnsupportedPlatform(
                std::env::consts::OS.to_string(),
            ))
        })?;
        Ok(dir.join("rollholder").join("config.toml"))
    }

    /// Load config from file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(ConfigError::UnsupportedFormat(
                "Config file must be .json or .toml".to_string(),
            )
            .into());
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(ConfigError::UnsupportedFormat(
                "Config file must be .json or .toml".to_string(),
            )
            .into());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        // Holder dimensions must resolve
        ResolvedMeasurements::resolve(&self.holder).map_err(ConfigError::from)?;

        self.finger_joint
            .validate()
            .map_err(|reason| SettingsError::InvalidSetting {
                key: "finger_joint".to_string(),
                reason,
            })?;

        if !self.layout.spacing.is_finite() || self.layout.spacing < 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "layout.spacing".to_string(),
                value: self.layout.spacing.to_string(),
            }
            .into());
        }

        self.laser
            .validate()
            .map_err(|reason| SettingsError::InvalidSetting {
                key: "laser".to_string(),
                reason,
            })?;

        if !self.output.tolerance.is_finite() || self.output.tolerance <= 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "output.tolerance".to_string(),
                value: self.output.tolerance.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
