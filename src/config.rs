//! Inspector settings
//!
//! Persisted as JSON under the platform config directory. Missing fields fall
//! back to their defaults so older settings files keep loading.

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// List edits that failed when the reference was loaded
    pub show_failed_edits: bool,
    /// List edits that applied cleanly
    pub show_successful_edits: bool,
    /// Rebuild the tree after an action changed the scene
    pub auto_reload: bool,
    /// Entries seen for the first time start expanded when they failed
    pub expand_failed: bool,
    /// Scene document opened by the desktop build
    pub scene_path: Option<PathBuf>,
    /// `env_logger` filter, used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            show_failed_edits: true,
            show_successful_edits: true,
            auto_reload: true,
            expand_failed: false,
            scene_path: None,
            log_filter: None,
        }
    }
}

impl InspectorConfig {
    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// cannot be parsed
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings {}: {}", path.display(), e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse settings {}: {}", path.display(), e))
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {}", e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write settings: {}", e))?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("refedit-config-test-{}-{}", std::process::id(), name))
            .join(CONFIG_FILE_NAME)
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let config: InspectorConfig = serde_json::from_str(r#"{ "auto_reload": false }"#).unwrap();
        assert!(!config.auto_reload);
        assert!(config.show_failed_edits);
        assert!(config.show_successful_edits);
        assert_eq!(config.scene_path, None);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("save");
        let config = InspectorConfig {
            expand_failed: true,
            scene_path: Some(PathBuf::from("scene.json")),
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(InspectorConfig::load(&path).unwrap(), config);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_or_missing_file_falls_back() {
        let path = temp_path("invalid");
        assert_eq!(InspectorConfig::load_or_default(&path), InspectorConfig::default());

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert!(InspectorConfig::load(&path).is_err());
        assert_eq!(InspectorConfig::load_or_default(&path), InspectorConfig::default());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
