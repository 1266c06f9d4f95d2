use std::path::{Path, PathBuf};

pub const DEFAULT_TRANSLATED_SUFFIX: &str = "_translated";
pub const DEFAULT_PROGRESS_SUFFIX: &str = "_progress";
pub const DEFAULT_SOURCE_EXTENSION: &str = "txt";
pub const DEFAULT_TARGET_LANGUAGE: &str = "Korean";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub translated_suffix: String,
    pub progress_suffix: String,
    pub source_extension: String,
    pub target_language: String,
    pub config_dir: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            translated_suffix: DEFAULT_TRANSLATED_SUFFIX.to_string(),
            progress_suffix: DEFAULT_PROGRESS_SUFFIX.to_string(),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            target_language: DEFAULT_TARGET_LANGUAGE.to_string(),
            config_dir: PathBuf::from("locedit"),
        }
    }
}

impl CoreConfig {
    pub fn from_env() -> Self {
        let mut cfg = CoreConfig {
            config_dir: config_base_dir(),
            ..CoreConfig::default()
        };
        if let Ok(lang) = std::env::var("LOCEDIT_TARGET_LANG") {
            if !lang.trim().is_empty() {
                cfg.target_language = lang.trim().to_string();
            }
        }
        cfg
    }

    pub fn with_config_dir(dir: impl AsRef<Path>) -> Self {
        CoreConfig {
            config_dir: dir.as_ref().to_path_buf(),
            ..CoreConfig::default()
        }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }
}

fn config_base_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LOCEDIT_HOME") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        return PathBuf::from(local).join("locedit");
    }
    if let Ok(dir) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(dir).join("locedit");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config").join("locedit");
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("locedit")
}
