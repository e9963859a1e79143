// Ember Editor Configuration
// Editor-facing settings and their on-disk RON form

use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Editor configuration, persisted as RON next to the project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    pub editor_name: String,
    pub version: String,
    /// Index entities the engine flags as hidden.
    pub show_hidden: bool,
    /// Route entity deletion through the confirmation dialog.
    pub confirm_delete: bool,
    pub max_console_lines: usize,
    pub autosave_enabled: bool,
    pub autosave_interval_secs: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            editor_name: "Ember Editor".to_string(),
            version: "0.1.0".to_string(),
            show_hidden: false,
            confirm_delete: true,
            max_console_lines: 500,
            autosave_enabled: true,
            autosave_interval_secs: 120,
        }
    }
}

/// Failure while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access editor config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed editor config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to encode editor config: {0}")]
    Encode(#[from] ron::Error),
}

impl EditorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Ok(ron::de::from_str(&data)?)
    }

    /// Loads the config, falling back to defaults when the file is absent
    /// or unreadable. A malformed file is reported but never fatal.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(_)) => Self::default(),
            Err(err) => {
                warn!("using default editor config: {err}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let data = ron::ser::to_string(self)?;
        std::fs::write(path, data.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_ron() {
        let mut config = EditorConfig::default();
        config.show_hidden = true;
        config.max_console_lines = 42;

        let encoded = ron::ser::to_string(&config).unwrap();
        let decoded: EditorConfig = ron::de::from_str(&encoded).unwrap();
        assert!(decoded.show_hidden);
        assert_eq!(decoded.max_console_lines, 42);
        assert_eq!(decoded.editor_name, config.editor_name);
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("ember_editor_missing_config.ron");
        let config = EditorConfig::load_or_default(&path);
        assert_eq!(config.max_console_lines, EditorConfig::default().max_console_lines);
    }

    #[test]
    fn malformed_config_is_reported_as_parse_error() {
        let err = ron::de::from_str::<EditorConfig>("(nonsense").unwrap_err();
        let err = ConfigError::Parse(err);
        assert!(err.to_string().contains("malformed"));
    }
}
