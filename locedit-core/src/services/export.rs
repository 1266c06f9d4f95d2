use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::CoreConfig;
use crate::error::Result;
use crate::model::entry::TranslationEntry;
use crate::parsers::arrow;
use crate::services::{encoding, files, paths};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub text: String,
    pub patched: usize,
    /// Line numbers whose rewrite was skipped for lack of anchors.
    pub skipped: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    pub overwritten: bool,
    pub patched: usize,
    pub skipped: Vec<usize>,
}

/// Rewrites the translation span of one line, keeping everything else
/// (indentation, spacing around `->`, trailing content) byte-for-byte.
pub fn patch_line(line: &str, translation: &str) -> Option<String> {
    let body = line.trim_start();
    let lead = line.len() - body.len();
    let m = arrow::match_line(body)?;

    let start = lead + m.translation.start;
    let end = lead + m.translation.end;

    let mut out = String::with_capacity(line.len() - (end - start) + translation.len());
    out.push_str(&line[..start]);
    out.push_str(translation);
    out.push_str(&line[end..]);
    Some(out)
}

/// Substitutes each non-empty translation into its line of `original_text`.
/// Lines are addressed by index, so identical lines never affect each other.
pub fn export(original_text: &str, entries: &[TranslationEntry]) -> ExportOutcome {
    let source: Vec<&str> = original_text.split('\n').collect();
    let mut out: Vec<String> = source.iter().map(|l| l.to_string()).collect();

    let mut patched = 0usize;
    let mut skipped = Vec::new();

    for e in entries {
        if !e.has_translation() {
            continue;
        }

        if e.translation.contains('\n') {
            log::warn!(
                "[export] line {} translation contains a line break, left as is",
                e.line_number
            );
            skipped.push(e.line_number);
            continue;
        }

        let Some(line) = e.line_number.checked_sub(1).and_then(|i| source.get(i)) else {
            log::warn!("[export] line {} is past the end of the file", e.line_number);
            skipped.push(e.line_number);
            continue;
        };

        match patch_line(line, &e.translation) {
            Some(new_line) => {
                if let Some(m) = arrow::match_line(line.trim_start()) {
                    let current = &line.trim_start()[m.original];
                    if current != e.original {
                        log::warn!(
                            "[export] line {} original changed since parse: {:?}",
                            e.line_number,
                            current
                        );
                    }
                }
                out[e.line_number - 1] = new_line;
                patched += 1;
            }
            None => {
                log::warn!("[export] line {} has no entry anchors, left as is", e.line_number);
                skipped.push(e.line_number);
            }
        }
    }

    ExportOutcome {
        text: out.join("\n"),
        patched,
        skipped,
    }
}

/// Exports next to `source`: into the existing translated copy when there is
/// one (overwriting it), otherwise into a new translated sibling.
pub fn export_to_disk(
    source: &Path,
    entries: &[TranslationEntry],
    cfg: &CoreConfig,
) -> Result<ExportReport> {
    let translated = paths::translated_path(source, cfg);
    let overwritten = translated.exists();
    let input = if overwritten { translated.as_path() } else { source };

    let decoded = encoding::read_text(input)?;
    let outcome = export(&decoded.text, entries);
    let bytes = encoding::encode(&decoded, &outcome.text);

    files::write_atomic(&translated, &bytes)?;

    log::info!(
        "[export] wrote {} ({} patched, {} skipped)",
        translated.display(),
        outcome.patched,
        outcome.skipped.len()
    );

    Ok(ExportReport {
        path: translated,
        overwritten,
        patched: outcome.patched,
        skipped: outcome.skipped,
    })
}
