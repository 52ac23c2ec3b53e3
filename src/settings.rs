//! # Control Settings
//!
//! ## Why This Module Exists
//! Controllers bind their directions to raw input identifiers at construction time.
//! This module owns the on-disk form of those bindings plus the dead zone, device
//! selection and mover speed, so a user can rebind keys or swap sticks without a
//! rebuild.
//!
//! ## Key Abstractions
//! - **One immutable struct per run**: settings are loaded once and passed by
//!   reference into constructors, which copy what they need.
//! - **Partial files load**: every section carries `#[serde(default)]`, missing
//!   keys fall back to defaults.
//! - **Validation before construction**: range checks run on load so a bad file is
//!   reported with its path instead of surfacing later as a controller error.
//!
//! ## File Location
//! `<config dir>/controlsandbox/controls.toml`, where the config dir comes from
//! `dirs::config_dir()` and falls back to the current directory.

use crate::controller::{ControllerError, GamepadSettings, KeyBindings};
use crate::mover::MoverSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const CONFIG_DIR: &str = "controlsandbox";
pub const CONTROLS_FILE: &str = "controls.toml";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid settings: {0}")]
    Invalid(#[from] ControllerError),

    #[error("Mover speed must be finite, got {0}")]
    InvalidSpeed(f32),
}

/// Controller the host starts with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    #[default]
    Keyboard,
    Gamepad,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub controller: ControllerKind,
    pub keyboard: KeyBindings,
    pub gamepad: GamepadSettings,
    pub mover: MoverSettings,
}

impl ControlSettings {
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| {
            warn!("Could not determine config directory, using current directory");
            PathBuf::from(".")
        });
        path.push(CONFIG_DIR);
        path.push(CONTROLS_FILE);
        path
    }

    /// Key codes are checked against the key table when the keyboard controller is
    /// built, everything else here.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.gamepad.validate()?;
        if !self.mover.speed.is_finite() {
            return Err(SettingsError::InvalidSpeed(self.mover.speed));
        }
        Ok(())
    }

    pub fn from_toml(content: &str, path: &Path) -> Result<Self, SettingsError> {
        let settings: ControlSettings =
            toml::from_str(content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        debug!("Loading control settings from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_error = |source: std::io::Error| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, self.to_toml()?).map_err(io_error)?;
        info!("Control settings saved to {}", path.display());
        Ok(())
    }

    /// Loads settings from `path`, writing defaults there first if the file does
    /// not exist yet.
    pub fn ensure_and_load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            info!(
                "No control settings at {}, writing defaults",
                path.display()
            );
            let settings = Self::default();
            settings.save_to(path)?;
            return Ok(settings);
        }
        Self::load_from(path)
    }

    pub fn load_or_default() -> Result<Self, SettingsError> {
        Self::ensure_and_load(&Self::default_path())
    }
}
