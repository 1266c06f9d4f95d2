use std::fs;
use std::path::Path;

use chrono::Utc;
use serde_json::Value;

use crate::error::{EditorError, Result};
use crate::model::entry::TranslationEntry;
use crate::model::progress::ProgressRecord;
use crate::services::files::write_atomic;

/// Sets `completed` from the first record sharing each entry's line number.
/// Entries without a record keep their current flag.
pub fn apply(entries: &mut [TranslationEntry], records: &[ProgressRecord]) -> usize {
    let mut restored = 0usize;

    for entry in entries.iter_mut() {
        if let Some(record) = records.iter().find(|r| r.line_number == entry.line_number) {
            entry.completed = record.completed;
            restored += 1;
        }
    }

    restored
}

/// Reads persisted records. Malformed individual records are skipped.
pub fn read_records(path: &Path) -> Result<Vec<ProgressRecord>> {
    let data = fs::read_to_string(path).map_err(|e| EditorError::io("read", path, e))?;
    let value: Value = serde_json::from_str(&data)?;

    let Value::Array(items) = value else {
        return Err(EditorError::Json(serde::de::Error::custom(
            "progress file is not an array",
        )));
    };

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<ProgressRecord>(item) {
            Ok(r) => records.push(r),
            Err(e) => log::warn!("[progress] skipping record {i} in {}: {e}", path.display()),
        }
    }

    Ok(records)
}

/// Merges saved progress onto freshly parsed entries. Never fails: a missing,
/// unreadable or malformed file leaves every entry incomplete.
pub fn load(entries: &mut [TranslationEntry], path: &Path) {
    if !path.exists() {
        log::debug!("[progress] no progress file at {}", path.display());
        return;
    }

    match read_records(path) {
        Ok(records) => {
            let restored = apply(entries, &records);
            log::info!(
                "[progress] loaded {}: {restored}/{} entries restored",
                path.display(),
                entries.len()
            );
        }
        Err(e) => {
            for entry in entries.iter_mut() {
                entry.completed = false;
            }
            log::warn!("[progress] ignoring {}: {e}", path.display());
        }
    }
}

pub fn snapshot(entries: &[TranslationEntry]) -> Vec<ProgressRecord> {
    let now = Utc::now();
    entries
        .iter()
        .map(|e| ProgressRecord::from_entry(e, now))
        .collect()
}

pub fn save(entries: &[TranslationEntry], path: &Path) -> Result<()> {
    let records = snapshot(entries);
    let json = serde_json::to_string_pretty(&records)?;

    write_atomic(path, json.as_bytes())?;

    let completed = records.iter().filter(|r| r.completed).count();
    let translated = records.iter().filter(|r| r.has_translation).count();
    log::info!(
        "[progress] saved {}: completed {completed}/{n}, translated {translated}/{n}",
        path.display(),
        n = records.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entries(lines: &[usize]) -> Vec<TranslationEntry> {
        lines
            .iter()
            .map(|&ln| TranslationEntry::new(format!("line {ln}"), String::new(), ln))
            .collect()
    }

    fn record(line_number: usize, completed: bool) -> ProgressRecord {
        ProgressRecord {
            line_number,
            original_prefix: String::new(),
            completed,
            has_translation: false,
            last_modified: String::new(),
        }
    }

    #[test]
    fn merge_is_keyed_by_line_number() {
        let mut list = entries(&[1, 2, 3]);
        let restored = apply(&mut list, &[record(2, true)]);

        assert_eq!(restored, 1);
        let flags: Vec<bool> = list.iter().map(|e| e.completed).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn first_matching_record_wins() {
        let mut list = entries(&[4]);
        apply(&mut list, &[record(4, true), record(4, false)]);
        assert!(list[0].completed);
    }

    #[test]
    fn missing_completed_defaults_to_false() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        fs::write(&path, r#"[{"lineNumber": 1}, {"lineNumber": 2, "completed": true}]"#).unwrap();

        let mut list = entries(&[1, 2]);
        load(&mut list, &path);

        assert!(!list[0].completed);
        assert!(list[1].completed);
    }

    #[test]
    fn malformed_file_means_no_progress() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");

        for body in ["{not json", r#"{"lineNumber": 1, "completed": true}"#] {
            fs::write(&path, body).unwrap();
            let mut list = entries(&[1]);
            load(&mut list, &path);
            assert!(!list[0].completed);
        }
    }

    #[test]
    fn malformed_records_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        fs::write(
            &path,
            r#"[{"lineNumber": "x", "completed": true}, 7, {"lineNumber": 3, "completed": true}]"#,
        )
        .unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line_number, 3);
    }

    #[test]
    fn save_overwrites_wholesale() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        fs::write(&path, r#"[{"lineNumber": 99, "completed": true}]"#).unwrap();

        let mut list = entries(&[1, 2]);
        list[0].translation = "un".into();
        list[0].completed = true;
        save(&list, &path).unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line_number, 1);
        assert!(records[0].completed && records[0].has_translation);
        assert!(!records[1].completed && !records[1].has_translation);
        assert!(!dir.path().join("p.json.tmp").exists());
    }
}
