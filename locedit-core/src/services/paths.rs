use std::path::{Path, PathBuf};

use crate::config::CoreConfig;

/// File name without the source extension; other extensions are kept.
fn source_stem(source: &Path, cfg: &CoreConfig) -> String {
    let name = source
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let ext = format!(".{}", cfg.source_extension);
    match name.strip_suffix(&ext) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => name,
    }
}

fn sibling(source: &Path, file_name: String) -> PathBuf {
    match source.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

pub fn translated_path(source: &Path, cfg: &CoreConfig) -> PathBuf {
    let stem = source_stem(source, cfg);
    sibling(
        source,
        format!("{stem}{}.{}", cfg.translated_suffix, cfg.source_extension),
    )
}

pub fn progress_path(source: &Path, cfg: &CoreConfig) -> PathBuf {
    let stem = source_stem(source, cfg);
    sibling(source, format!("{stem}{}.json", cfg.progress_suffix))
}
