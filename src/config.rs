/// Persistent user settings
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/dream-studio/settings.json
/// - macOS: ~/Library/Application Support/dream-studio/settings.json
/// - Windows: %APPDATA%\dream-studio\settings.json
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Overrides `server_url` when set
pub const SERVER_ENV_VAR: &str = "DREAM_STUDIO_SERVER";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Base URL server-relative image paths are resolved against
    pub server_url: String,
    pub gallery_image_minimum_width: u16,
    pub show_advanced_options: bool,
    pub should_confirm_on_delete: bool,
    /// Gallery file loaded at startup
    pub gallery_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:9090/".to_string(),
            gallery_image_minimum_width: 64,
            show_advanced_options: false,
            should_confirm_on_delete: true,
            gallery_file: None,
        }
    }
}

impl Settings {
    /// Load settings from the default location, falling back to defaults
    /// when the file is missing or unreadable.
    pub fn load_or_default() -> Self {
        let mut settings = match Self::default_path().and_then(|path| Self::load(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("⚠️  Using default settings: {e}");
                Self::default()
            }
        };

        if let Ok(server) = std::env::var(SERVER_ENV_VAR) {
            settings.server_url = server;
        }

        settings
    }

    /// Load settings from a file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Save to the default location
    pub fn save_default(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save(&path)?;
        tracing::debug!("💾 Settings saved to {}", path.display());
        Ok(())
    }

    /// Get the path where the settings file should be stored
    pub fn default_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or(Error::NoConfigDir)?;
        path.push("dream-studio");
        path.push("settings.json");
        Ok(path)
    }

    /// Default gallery file: `<data dir>/dream-studio/gallery.json`
    pub fn gallery_path(&self) -> Option<PathBuf> {
        self.gallery_file.clone().or_else(|| {
            dirs::data_dir().map(|mut path| {
                path.push("dream-studio");
                path.push("gallery.json");
                path
            })
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings = Settings::from_json(r#"{"gallery_image_minimum_width": 120}"#).unwrap();
        assert_eq!(settings.gallery_image_minimum_width, 120);
        assert_eq!(settings.server_url, Settings::default().server_url);
        assert!(!settings.show_advanced_options);
        assert!(settings.should_confirm_on_delete);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.show_advanced_options = true;
        settings.gallery_file = Some(PathBuf::from("/tmp/gallery.json"));
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Settings::load(&path), Err(Error::Json(_))));
    }
}
