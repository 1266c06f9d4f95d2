use std::fs;

use locedit_core::{Core, CoreConfig};
use serde_json::{json, Value};
use tempfile::TempDir;

fn send(core: &mut Core, req: Value) -> Value {
    let raw = core.handle(&req.to_string());
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn host_session_round_trip() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("intro.txt");
    fs::write(&src, "'Open the door.' -> ''  // cmd_042\n'Run!' -> ''\n").unwrap();
    let mut core = Core::new(CoreConfig::with_config_dir(dir.path().join("config")));

    let opened = send(
        &mut core,
        json!({ "id": 1, "cmd": "session.open", "payload": { "path": src } }),
    );
    assert_eq!(opened["status"], "ok");
    assert_eq!(opened["payload"]["entries"][0]["lineNumber"], 1);
    assert_eq!(opened["payload"]["stats"]["total"], 2);

    let committed = send(
        &mut core,
        json!({ "id": 2, "cmd": "entry.commit", "payload": { "index": 0, "translation": "문을 열어라." } }),
    );
    assert_eq!(committed["payload"]["marked"], true);
    assert_eq!(committed["payload"]["stats"]["percent"], 50);

    let moved = send(
        &mut core,
        json!({ "id": 3, "cmd": "cursor.move", "payload": { "to": "first_incomplete" } }),
    );
    assert_eq!(moved["payload"]["index"], 1);
    assert_eq!(moved["payload"]["entry"]["original"], "Run!");

    let blank = send(
        &mut core,
        json!({ "id": 4, "cmd": "entry.mark_completed", "payload": { "index": 1 } }),
    );
    assert_eq!(blank["payload"]["marked"], false);

    let exported = send(&mut core, json!({ "id": 5, "cmd": "session.export" }));
    assert_eq!(exported["status"], "ok");
    assert_eq!(exported["payload"]["patched"], 1);

    let out = fs::read_to_string(dir.path().join("intro_translated.txt")).unwrap();
    assert_eq!(out, "'Open the door.' -> '문을 열어라.'  // cmd_042\n'Run!' -> ''\n");

    let prompt = send(
        &mut core,
        json!({ "id": 6, "cmd": "translation.prompt", "payload": { "index": 1 } }),
    );
    assert!(prompt["payload"]["prompt"].as_str().unwrap().contains("\"Run!\""));
}

#[test]
fn failed_open_drops_the_previous_session() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("a.txt");
    fs::write(&src, "'A' -> ''").unwrap();
    let mut core = Core::new(CoreConfig::with_config_dir(dir.path().join("config")));

    send(&mut core, json!({ "cmd": "session.open", "payload": { "path": src } }));
    assert!(core.session().is_some());

    let r = send(
        &mut core,
        json!({ "cmd": "session.open", "payload": { "path": dir.path().join("missing.txt") } }),
    );
    assert_eq!(r["status"], "error");
    assert!(core.session().is_none());
}

#[test]
fn settings_round_trip_through_the_store() {
    let dir = TempDir::new().unwrap();
    let mut core = Core::new(CoreConfig::with_config_dir(dir.path().join("config")));

    let defaults = send(&mut core, json!({ "cmd": "settings.load" }));
    assert_eq!(defaults["payload"]["settings"]["originalSize"], "16");
    assert_eq!(defaults["payload"]["settings"]["textAlignment"], "left");

    let mut settings = defaults["payload"]["settings"].clone();
    settings["translationSize"] = json!("22");
    settings["textAlignment"] = json!("right");
    let saved = send(
        &mut core,
        json!({ "cmd": "settings.save", "payload": { "settings": settings } }),
    );
    assert_eq!(saved["status"], "ok");

    let mut fresh = Core::new(CoreConfig::with_config_dir(dir.path().join("config")));
    let loaded = send(&mut fresh, json!({ "cmd": "settings.load" }));
    assert_eq!(loaded["payload"]["settings"]["translationSize"], "22");
    assert_eq!(loaded["payload"]["settings"]["textAlignment"], "right");
}

#[test]
fn encoding_detect_reports_bom() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bom.txt");
    fs::write(&path, b"\xEF\xBB\xBF'A' -> 'B'").unwrap();
    let mut core = Core::new(CoreConfig::with_config_dir(dir.path().join("config")));

    let r = send(
        &mut core,
        json!({ "cmd": "encoding.detect", "payload": { "path": path } }),
    );
    assert_eq!(r["payload"]["best"], "utf-8-sig");
}
