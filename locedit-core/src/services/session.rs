use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::CoreConfig;
use crate::error::{EditorError, Result};
use crate::model::entry::TranslationEntry;
use crate::parsers::arrow;
use crate::services::export::{self, ExportReport};
use crate::services::{encoding, paths, progress};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub translated: usize,
    pub percent: u32,
}

impl Stats {
    pub fn of(entries: &[TranslationEntry]) -> Self {
        let total = entries.len();
        let completed = entries.iter().filter(|e| e.completed).count();
        let translated = entries.iter().filter(|e| e.has_translation()).count();
        let percent = if total > 0 {
            (completed as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };

        Stats {
            total,
            completed,
            translated,
            percent,
        }
    }
}

/// Host-side view of one entry, sent back with an export request.
/// Absent fields leave the session's value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntrySnapshot {
    #[serde(default)]
    pub translation: Option<String>,

    #[serde(default)]
    pub completed: Option<bool>,
}

/// The one open file and its entries.
#[derive(Debug)]
pub struct Session {
    cfg: CoreConfig,
    source: PathBuf,
    working: PathBuf,
    progress_path: PathBuf,
    entries: Vec<TranslationEntry>,
    cursor: usize,
}

impl Session {
    /// Opens `source`, or its translated copy when one already exists.
    pub fn open(source: &Path, cfg: &CoreConfig) -> Result<Session> {
        let translated = paths::translated_path(source, cfg);
        let working = if translated.exists() {
            log::info!("[session] using translated copy {}", translated.display());
            translated
        } else {
            source.to_path_buf()
        };

        let decoded = encoding::read_text(&working)?;
        let mut entries = arrow::parse(&decoded.text);

        let progress_path = paths::progress_path(source, cfg);
        progress::load(&mut entries, &progress_path);

        log::info!(
            "[session] {}: {} lines, {} entries",
            working.display(),
            decoded.text.split('\n').count(),
            entries.len()
        );

        Ok(Session {
            cfg: cfg.clone(),
            source: source.to_path_buf(),
            working,
            progress_path,
            entries,
            cursor: 0,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// File the entries were parsed from.
    pub fn working_file(&self) -> &Path {
        &self.working
    }

    pub fn progress_path(&self) -> &Path {
        &self.progress_path
    }

    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Result<&TranslationEntry> {
        self.entries.get(index).ok_or(EditorError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut TranslationEntry> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or(EditorError::IndexOutOfRange { index, len })
    }

    pub fn stats(&self) -> Stats {
        Stats::of(&self.entries)
    }

    /// Replaces the translation text. Any edit clears `completed`.
    pub fn set_translation(&mut self, index: usize, text: &str) -> Result<()> {
        check_single_line(index, text)?;
        apply_translation(self.entry_mut(index)?, text);
        self.save_progress()
    }

    /// Marks the entry completed if it has non-blank text; returns whether it did.
    pub fn mark_completed(&mut self, index: usize) -> Result<bool> {
        let marked = apply_completed(self.entry_mut(index)?);
        self.save_progress()?;
        Ok(marked)
    }

    /// Stores `text` and marks the entry completed in one step.
    pub fn commit(&mut self, index: usize, text: &str) -> Result<bool> {
        check_single_line(index, text)?;
        let entry = self.entry_mut(index)?;
        apply_translation(entry, text);
        let marked = apply_completed(entry);
        self.save_progress()?;
        Ok(marked)
    }

    /// Applies the host's view of the entries, then exports and saves progress.
    pub fn export_now(&mut self, snapshot: &[EntrySnapshot]) -> Result<ExportReport> {
        for (entry, seen) in self.entries.iter_mut().zip(snapshot) {
            if let Some(t) = &seen.translation {
                entry.translation = t.clone();
            }
            match seen.completed {
                Some(true) if !entry.has_translation() => {
                    log::warn!(
                        "[session] line {} sent as completed with no text, left incomplete",
                        entry.line_number
                    );
                    entry.completed = false;
                }
                Some(c) => entry.completed = c,
                None => {}
            }
        }
        if snapshot.len() > self.entries.len() {
            log::warn!(
                "[session] export snapshot has {} items, session has {}",
                snapshot.len(),
                self.entries.len()
            );
        }

        let stats = self.stats();
        log::info!(
            "[session] export: {} entries, {} completed, {} translated",
            stats.total,
            stats.completed,
            stats.translated
        );

        let report = export::export_to_disk(&self.source, &self.entries, &self.cfg)?;
        self.working = report.path.clone();
        self.save_progress()?;
        Ok(report)
    }

    fn save_progress(&self) -> Result<()> {
        progress::save(&self.entries, &self.progress_path)
    }

    pub fn current_index(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&TranslationEntry> {
        self.entries.get(self.cursor)
    }

    pub fn next(&mut self) -> Option<usize> {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            Some(self.cursor)
        } else {
            None
        }
    }

    pub fn previous(&mut self) -> Option<usize> {
        if self.cursor > 0 {
            self.cursor -= 1;
            Some(self.cursor)
        } else {
            None
        }
    }

    pub fn go_to(&mut self, index: usize) -> Result<usize> {
        self.entry(index)?;
        self.cursor = index;
        Ok(index)
    }

    /// Moves to the first entry not yet completed, scanning from the top.
    pub fn first_incomplete(&mut self) -> Option<usize> {
        let index = self.entries.iter().position(|e| !e.completed)?;
        self.cursor = index;
        Some(index)
    }
}

// A line break would shift every later line of the exported file.
fn check_single_line(index: usize, text: &str) -> Result<()> {
    if text.contains('\n') {
        return Err(EditorError::MultilineTranslation { index });
    }
    Ok(())
}

fn apply_translation(entry: &mut TranslationEntry, text: &str) {
    entry.translation = text.to_string();
    entry.completed = false;
}

fn apply_completed(entry: &mut TranslationEntry) -> bool {
    if entry.has_translation() {
        entry.completed = true;
        true
    } else {
        false
    }
}
