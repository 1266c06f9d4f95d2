use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{EditorError, Result};
use crate::model::settings::DisplaySettings;
use crate::services::files::write_atomic;

pub const SETTINGS_KEY: &str = "localizationSettings";

/// The host's persistent key-value capability.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// Key-value store backed by one JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let data =
            fs::read_to_string(&self.path).map_err(|e| EditorError::io("read", &self.path, e))?;
        match serde_json::from_str::<Value>(&data)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let mut all = match self.read_all() {
            Ok(map) => map,
            Err(e) => {
                log::warn!("[settings] discarding unreadable {}: {e}", self.path.display());
                Map::new()
            }
        };
        all.insert(key.to_string(), value);

        let json = serde_json::to_string_pretty(&Value::Object(all))?;
        write_atomic(&self.path, json.as_bytes())
    }
}

/// Stored settings, or the defaults when absent or unreadable.
pub fn load(store: &dyn KeyValueStore) -> DisplaySettings {
    match store.get(SETTINGS_KEY) {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("[settings] invalid stored settings, using defaults: {e}");
                DisplaySettings::default()
            }
        },
        Ok(None) => DisplaySettings::default(),
        Err(e) => {
            log::warn!("[settings] failed to read settings, using defaults: {e}");
            DisplaySettings::default()
        }
    }
}

pub fn save(store: &mut dyn KeyValueStore, settings: &DisplaySettings) -> Result<()> {
    store.set(SETTINGS_KEY, serde_json::to_value(settings)?)?;
    log::info!("[settings] saved display settings");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::settings::TextAlignment;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_nothing_is_stored() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("settings.json"));

        let settings = load(&store);
        assert_eq!(settings, DisplaySettings::default());
        assert_eq!(settings.original_font, "'Courier New', monospace");
        assert_eq!(settings.translation_size, "16");
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("settings.json"));

        let settings = DisplaySettings {
            translation_font: "'D2Coding', monospace".into(),
            translation_size: "20".into(),
            text_alignment: TextAlignment::Center,
            ..DisplaySettings::default()
        };
        save(&mut store, &settings).unwrap();
        store.set("other", Value::Bool(true)).unwrap();

        assert_eq!(load(&store), settings);
        assert_eq!(store.get("other").unwrap(), Some(Value::Bool(true)));
    }

    #[test]
    fn partial_or_broken_values_fall_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        fs::write(&path, r#"{"localizationSettings": {"originalSize": "18"}}"#).unwrap();
        let settings = load(&JsonFileStore::new(&path));
        assert_eq!(settings.original_size, "18");
        assert_eq!(settings.translation_size, "16");

        fs::write(&path, "not json").unwrap();
        assert_eq!(load(&JsonFileStore::new(&path)), DisplaySettings::default());
    }
}
