use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationEntry {
    pub original: String,

    #[serde(default)]
    pub translation: String,

    pub line_number: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_line: Option<String>,

    #[serde(default)]
    pub completed: bool,
}

impl TranslationEntry {
    pub fn new(original: String, translation: String, line_number: usize) -> Self {
        TranslationEntry {
            original,
            translation,
            line_number,
            full_line: None,
            completed: false,
        }
    }

    pub fn has_translation(&self) -> bool {
        !self.translation.trim().is_empty()
    }
}
