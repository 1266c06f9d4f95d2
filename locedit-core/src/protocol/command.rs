use serde::Deserialize;

use crate::model::settings::DisplaySettings;
use crate::services::session::EntrySnapshot;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "to", rename_all = "snake_case")]
pub enum CursorTarget {
    Next,
    Previous,
    FirstIncomplete,
    Index { index: usize },
}

/// Every request the host can send, tagged by `cmd` with its `payload`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "cmd", content = "payload")]
pub enum Request {
    #[serde(rename = "ping")]
    Ping,

    #[serde(rename = "session.open")]
    Open { path: String },

    #[serde(rename = "session.entries")]
    Entries,

    #[serde(rename = "session.stats")]
    Stats,

    #[serde(rename = "entry.set_translation")]
    SetTranslation { index: usize, translation: String },

    #[serde(rename = "entry.mark_completed")]
    MarkCompleted { index: usize },

    #[serde(rename = "entry.commit")]
    Commit { index: usize, translation: String },

    #[serde(rename = "session.export")]
    Export {
        #[serde(default)]
        entries: Vec<EntrySnapshot>,
    },

    #[serde(rename = "cursor.move")]
    MoveCursor(CursorTarget),

    #[serde(rename = "settings.load")]
    LoadSettings,

    #[serde(rename = "settings.save")]
    SaveSettings { settings: DisplaySettings },

    #[serde(rename = "encoding.detect")]
    DetectEncoding { path: String },

    #[serde(rename = "translation.prompt")]
    TranslationPrompt { index: usize },
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::Ping => "ping",
            Request::Open { .. } => "session.open",
            Request::Entries => "session.entries",
            Request::Stats => "session.stats",
            Request::SetTranslation { .. } => "entry.set_translation",
            Request::MarkCompleted { .. } => "entry.mark_completed",
            Request::Commit { .. } => "entry.commit",
            Request::Export { .. } => "session.export",
            Request::MoveCursor(_) => "cursor.move",
            Request::LoadSettings => "settings.load",
            Request::SaveSettings { .. } => "settings.save",
            Request::DetectEncoding { .. } => "encoding.detect",
            Request::TranslationPrompt { .. } => "translation.prompt",
        }
    }
}
