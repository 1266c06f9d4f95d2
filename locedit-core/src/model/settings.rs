use serde::{Deserialize, Serialize};

fn default_font() -> String {
    "'Courier New', monospace".to_string()
}

fn default_size() -> String {
    "16".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Font and layout preferences the host applies when rendering entries.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    #[serde(default = "default_font")]
    pub original_font: String,

    #[serde(default = "default_size")]
    pub original_size: String,

    #[serde(default = "default_font")]
    pub translation_font: String,

    #[serde(default = "default_size")]
    pub translation_size: String,

    #[serde(default)]
    pub text_alignment: TextAlignment,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            original_font: default_font(),
            original_size: default_size(),
            translation_font: default_font(),
            translation_size: default_size(),
            text_alignment: TextAlignment::Left,
        }
    }
}
