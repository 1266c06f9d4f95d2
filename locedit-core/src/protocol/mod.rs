use std::path::PathBuf;

use serde_json::{json, Map, Value};

use crate::config::CoreConfig;
use crate::error::{EditorError, Result};
use crate::services::session::Session;
use crate::services::settings::{self, JsonFileStore, KeyValueStore};
use crate::services::{encoding, prompt};

mod command;
pub use command::{CursorTarget, Request};

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

/// Splits a raw request into its typed body.
fn decode(req: &Value) -> std::result::Result<Request, String> {
    let cmd = req.get("cmd").and_then(|v| v.as_str()).unwrap_or("");
    if cmd.is_empty() {
        return Err("cmd is required".into());
    }

    let payload = match req.get("payload") {
        None | Some(Value::Null) => None,
        Some(p) => Some(p.clone()),
    };

    let body = |payload: Option<Value>| {
        let mut map = Map::new();
        map.insert("cmd".into(), Value::String(cmd.to_string()));
        if let Some(p) = payload {
            map.insert("payload".into(), p);
        }
        Value::Object(map)
    };

    // Unit commands reject `{}` and struct commands reject a missing payload,
    // so an absent or empty payload gets one retry in the other shape.
    let alternative = match &payload {
        None => Some(Some(json!({}))),
        Some(Value::Object(m)) if m.is_empty() => Some(None),
        Some(_) => None,
    };

    let result = serde_json::from_value::<Request>(body(payload)).or_else(|e| match alternative {
        Some(alt) if !e.to_string().starts_with("unknown variant") => {
            serde_json::from_value::<Request>(body(alt))
        }
        _ => Err(e),
    });

    result.map_err(|e| {
        let msg = e.to_string();
        if msg.starts_with("unknown variant") {
            format!("unknown command: {cmd}")
        } else {
            format!("invalid {cmd} request: {msg}")
        }
    })
}

/// State behind the protocol: at most one open session plus settings storage.
pub struct Core {
    cfg: CoreConfig,
    session: Option<Session>,
    store: Box<dyn KeyValueStore>,
}

impl Core {
    pub fn new(cfg: CoreConfig) -> Self {
        let store = JsonFileStore::new(cfg.settings_path());
        Core::with_store(cfg, Box::new(store))
    }

    pub fn with_store(cfg: CoreConfig, store: Box<dyn KeyValueStore>) -> Self {
        Core {
            cfg,
            session: None,
            store,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn session_mut(&mut self) -> Result<&mut Session> {
        self.session.as_mut().ok_or(EditorError::NoSession)
    }

    pub fn handle(&mut self, input: &str) -> String {
        let req: Value = match serde_json::from_str(input) {
            Ok(v) => v,
            Err(_) => {
                return json!({
                    "status": "error",
                    "message": "invalid json"
                })
                .to_string();
            }
        };

        let id = get_id(&req);
        let request = match decode(&req) {
            Ok(r) => r,
            Err(e) => return err(id, e),
        };

        let name = request.name();
        match self.dispatch(request) {
            Ok(payload) => ok(id, payload),
            Err(e) => {
                log::warn!("[protocol] {name} failed: {e}");
                err(id, e.to_string())
            }
        }
    }

    pub fn dispatch(&mut self, request: Request) -> Result<Value> {
        match request {
            Request::Ping => Ok(json!({ "message": "locedit-core alive" })),

            Request::Open { path } => {
                self.session = None;
                let session = Session::open(&PathBuf::from(path), &self.cfg)?;
                let reply = json!({
                    "file": session.working_file().display().to_string(),
                    "entries": session.entries(),
                    "stats": session.stats(),
                });
                self.session = Some(session);
                Ok(reply)
            }

            Request::Entries => {
                let s = self.session_mut()?;
                Ok(json!({ "entries": s.entries() }))
            }

            Request::Stats => {
                let s = self.session_mut()?;
                Ok(serde_json::to_value(s.stats())?)
            }

            Request::SetTranslation { index, translation } => {
                let s = self.session_mut()?;
                s.set_translation(index, &translation)?;
                Ok(json!({ "entry": s.entry(index)?, "stats": s.stats() }))
            }

            Request::MarkCompleted { index } => {
                let s = self.session_mut()?;
                let marked = s.mark_completed(index)?;
                Ok(json!({ "entry": s.entry(index)?, "marked": marked, "stats": s.stats() }))
            }

            Request::Commit { index, translation } => {
                let s = self.session_mut()?;
                let marked = s.commit(index, &translation)?;
                Ok(json!({ "entry": s.entry(index)?, "marked": marked, "stats": s.stats() }))
            }

            Request::Export { entries } => {
                let s = self.session_mut()?;
                let report = s.export_now(&entries)?;
                Ok(serde_json::to_value(report)?)
            }

            Request::MoveCursor(target) => {
                let s = self.session_mut()?;
                let moved = match target {
                    CursorTarget::Next => s.next().is_some(),
                    CursorTarget::Previous => s.previous().is_some(),
                    CursorTarget::FirstIncomplete => s.first_incomplete().is_some(),
                    CursorTarget::Index { index } => {
                        s.go_to(index)?;
                        true
                    }
                };
                Ok(json!({
                    "index": s.current_index(),
                    "moved": moved,
                    "entry": s.current(),
                }))
            }

            Request::LoadSettings => Ok(json!({ "settings": settings::load(self.store.as_ref()) })),

            Request::SaveSettings { settings: new } => {
                settings::save(self.store.as_mut(), &new)?;
                Ok(json!({ "settings": new }))
            }

            Request::DetectEncoding { path } => {
                let result = encoding::detect_from_file(&PathBuf::from(path))?;
                Ok(serde_json::to_value(result)?)
            }

            Request::TranslationPrompt { index } => {
                let target = self.cfg.target_language.clone();
                let s = self.session_mut()?;
                let entry = s.entry(index)?;
                Ok(json!({ "prompt": prompt::translation_prompt(&entry.original, &target) }))
            }
        }
    }
}
