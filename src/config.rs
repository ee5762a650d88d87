use crate::classify::FilterMode;
use crate::error::{GrabError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persisted user defaults. The settings file is a small JSON object at
/// `~/.config/docs-grabber/settings.json`; the extraction core never
/// reads it, it only receives the resolved values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_repo_path: String,
    pub filter_mode: FilterMode,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the settings file, honoring XDG_CONFIG_HOME.
    pub fn default_config_path() -> Option<PathBuf> {
        let config_dir = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;

        Some(config_dir.join("docs-grabber").join("settings.json"))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(GrabError::Config {
                message: format!("Settings file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| GrabError::Config {
            message: format!("Failed to read settings file {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| GrabError::Config {
            message: format!("Failed to parse settings file {}: {}", path.display(), e),
        })
    }

    /// Load from the given path, or from the default location when it
    /// exists, or fall back to defaults.
    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::load_from_file(path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Configured default target path, when one is set.
    pub fn base_path(&self) -> Option<PathBuf> {
        if self.base_repo_path.is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.base_repo_path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.filter_mode, FilterMode::None);
        assert!(settings.base_path().is_none());
    }

    #[test]
    fn test_settings_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let settings = Settings {
            base_repo_path: "/home/dev/projects".to_string(),
            filter_mode: FilterMode::LightFilter,
        };
        let content = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, content).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_settings_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"filter_mode": "markdown_only"}"#).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded.filter_mode, FilterMode::MarkdownOnly);
        assert!(loaded.base_repo_path.is_empty());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let result = Settings::load_from_file(dir.path().join("nope.json"));
        assert!(matches!(result, Err(GrabError::Config { .. })));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = Settings::load_from_file(&path);
        assert!(matches!(result, Err(GrabError::Config { .. })));
    }
}
