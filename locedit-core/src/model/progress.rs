use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::entry::TranslationEntry;

/// Characters of `original` kept in a progress record, for identification only.
pub const ORIGINAL_PREFIX_CHARS: usize = 50;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub line_number: usize,

    #[serde(default, rename = "original")]
    pub original_prefix: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub has_translation: bool,

    #[serde(default)]
    pub last_modified: String,
}

impl ProgressRecord {
    pub fn from_entry(entry: &TranslationEntry, now: DateTime<Utc>) -> Self {
        ProgressRecord {
            line_number: entry.line_number,
            original_prefix: entry.original.chars().take(ORIGINAL_PREFIX_CHARS).collect(),
            completed: entry.completed,
            has_translation: entry.has_translation(),
            last_modified: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_keeps_prefix_and_flags() {
        let mut entry = TranslationEntry::new("가".repeat(60), "  done ".into(), 7);
        entry.completed = true;
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let record = ProgressRecord::from_entry(&entry, now);

        assert_eq!(record.line_number, 7);
        assert_eq!(record.original_prefix.chars().count(), 50);
        assert!(record.completed);
        assert!(record.has_translation);
        assert_eq!(record.last_modified, "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn record_json_uses_file_keys() {
        let entry = TranslationEntry::new("Hello".into(), "   ".into(), 12);
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let value = serde_json::to_value(ProgressRecord::from_entry(&entry, now)).unwrap();

        assert_eq!(value["lineNumber"], 12);
        assert_eq!(value["original"], "Hello");
        assert_eq!(value["completed"], false);
        assert_eq!(value["hasTranslation"], false);
    }
}
