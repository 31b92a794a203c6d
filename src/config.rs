//! Module options.
//!
//! Loaded from a small TOML file; every field has a default so an empty or
//! missing file is valid.
//!
//! ```toml
//! # Keep receiving joystick input while the host window is unfocused.
//! background_input = true
//! ```

use crate::error::HybridError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleOptions {
    /// Open low-level devices with background access instead of foreground.
    pub background_input: bool,
}

impl ModuleOptions {
    /// `<config dir>/hybridstick/options.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hybridstick")
            .join("options.toml")
    }

    pub fn from_toml_str(s: &str) -> Result<Self, HybridError> {
        Ok(toml::from_str(s)?)
    }

    /// Load options from `path`, or defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, HybridError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save(&self, path: &Path) -> Result<(), HybridError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
