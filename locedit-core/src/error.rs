use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no file is open")]
    NoSession,

    #[error("entry index {index} out of range (entries: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("translation for entry {index} spans more than one line")]
    MultilineTranslation { index: usize },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl EditorError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        EditorError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
