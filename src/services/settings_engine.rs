// dupcloser settings engine
// Loads and saves the scan settings: a single record stored under the
// fixed storage key in a JSON file at the platform config path. Missing
// fields merge with defaults at load, so downstream code always sees a
// fully-resolved ScanSettings.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::{ScanSettings, STORAGE_KEY};

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ScanSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ScanSettings;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine backed by a JSON file on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: ScanSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the settings file.
    /// Otherwise, uses the platform config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(path) => path,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: ScanSettings::default(),
        }
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON file.
    ///
    /// A missing file, a missing storage-key record, and missing record
    /// fields all resolve to defaults. A file that exists but fails to
    /// parse is surfaced as an error.
    fn load(&mut self) -> Result<ScanSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.settings = ScanSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read settings file: {}", e)))?;

        let document: Value = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse settings file: {}", e))
        })?;

        let record = document
            .get(STORAGE_KEY)
            .cloned()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        let settings: ScanSettings = serde_json::from_value(record).map_err(|e| {
            SettingsError::SerializationError(format!("Invalid settings record: {}", e))
        })?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Saves the current settings under the storage key.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let record = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;
        let mut document = serde_json::Map::new();
        document.insert(STORAGE_KEY.to_string(), record);

        let json = serde_json::to_string_pretty(&Value::Object(document)).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Returns a reference to the current in-memory settings.
    fn get_settings(&self) -> &ScanSettings {
        &self.settings
    }

    /// Updates one setting by dot-notation key path and persists.
    ///
    /// Key paths use the persisted camelCase names:
    /// - `"matching.ignoreWWW"` → updates `settings.matching.ignore_www`
    /// - `"priority"` → updates the survivor priority
    /// - `"autoScan"` → toggles background detection
    ///
    /// The updated record is deserialized back into `ScanSettings`, so an
    /// unknown key or a wrong-typed value is rejected before anything is
    /// stored.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut record = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        let parts: Vec<&str> = key.split('.').collect();
        let mut current = &mut record;
        for (i, part) in parts.iter().enumerate() {
            if i == parts.len() - 1 {
                match current {
                    Value::Object(map) => {
                        if !map.contains_key(*part) {
                            return Err(SettingsError::InvalidKey(format!(
                                "Key '{}' not found in settings",
                                key
                            )));
                        }
                        map.insert(part.to_string(), value.clone());
                    }
                    _ => {
                        return Err(SettingsError::InvalidKey(format!(
                            "Cannot navigate to key '{}': intermediate value is not an object",
                            key
                        )));
                    }
                }
            } else {
                current = current.get_mut(*part).ok_or_else(|| {
                    SettingsError::InvalidKey(format!("Key '{}' not found in settings", key))
                })?;
            }
        }

        let new_settings: ScanSettings = serde_json::from_value(record).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;

        self.settings = new_settings;
        self.save()?;

        Ok(())
    }

    /// Resets all settings to factory defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = ScanSettings::default();
        self.save()?;
        Ok(())
    }

    /// Returns the path to the settings file.
    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
