//! User settings - colour names read from `settings.yaml`

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CONFIG_DIR_NAME;

/// Colour names used by the interface. Values are ratatui colour names or `#rrggbb`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalColors {
    pub foreground: String,
    pub background: String,
    pub contrast: String,
    pub error: String,
}

impl Default for TerminalColors {
    fn default() -> Self {
        TerminalColors {
            foreground: String::from("white"),
            background: String::from("black"),
            contrast: String::from("#777777"),
            error: String::from("#FF746C"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub colors: TerminalColors,
}

impl Settings {
    /// Default location: `<config dir>/courier/settings.yaml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join("settings.yaml")
    }

    /// Load settings from the given file
    pub fn load_from(path: &Path) -> Result<Settings> {
        let content = fs::read_to_string(path)?;
        let settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load_or_default() -> Settings {
        let path = Self::default_path();
        if !path.exists() {
            return Settings::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable settings file");
                Settings::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "colors:\n  error: red\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.colors.error, "red");
        assert_eq!(settings.colors.foreground, "white");
        assert_eq!(settings.colors.contrast, "#777777");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "colors: [not, a, map]\n").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }
}
