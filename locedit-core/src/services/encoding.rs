use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use serde::Serialize;

use crate::error::{EditorError, Result};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug, Serialize)]
pub struct EncodingCandidate {
    pub name: String,
    pub confidence: f32,
}

#[derive(Debug, Serialize)]
pub struct EncodingDetectionResult {
    pub best: String,
    pub confidence: f32,
    pub candidates: Vec<EncodingCandidate>,
}

/// Text decoded from disk, remembering how to write it back.
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static Encoding,
    pub bom: bool,
}

pub fn decode(bytes: &[u8]) -> DecodedText {
    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        let (text, _) = UTF_8.decode_without_bom_handling(rest);
        return DecodedText {
            text: text.into_owned(),
            encoding: UTF_8,
            bom: true,
        };
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return DecodedText {
            text: text.to_string(),
            encoding: UTF_8,
            bom: false,
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::warn!("decoding as {} replaced malformed bytes", encoding.name());
    }

    DecodedText {
        text: text.into_owned(),
        encoding,
        bom: false,
    }
}

/// Encodes `text` the way `like` was read. Text the source encoding cannot
/// represent is written as UTF-8 instead.
///
/// Bytes that were malformed on read come back as U+FFFD, so a legacy file
/// with bad bytes is not reproduced exactly even on untouched lines.
pub fn encode(like: &DecodedText, text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 3);
    if like.bom {
        out.extend_from_slice(&UTF8_BOM);
    }

    if like.encoding == UTF_8 {
        out.extend_from_slice(text.as_bytes());
        return out;
    }

    let (bytes, used, had_errors) = like.encoding.encode(text);
    if had_errors || used != like.encoding {
        log::warn!(
            "[encoding] output does not fit {}, writing utf-8",
            like.encoding.name()
        );
        out.extend_from_slice(text.as_bytes());
        return out;
    }
    out.extend_from_slice(&bytes);
    out
}

pub fn read_text(path: &Path) -> Result<DecodedText> {
    let bytes = fs::read(path).map_err(|e| EditorError::io("read", path, e))?;
    Ok(decode(&bytes))
}

pub fn detect_from_file(path: &Path) -> Result<EncodingDetectionResult> {
    let bytes = fs::read(path).map_err(|e| EditorError::io("read", path, e))?;

    if bytes.starts_with(&UTF8_BOM) {
        return Ok(EncodingDetectionResult {
            best: "utf-8-sig".into(),
            confidence: 0.99,
            candidates: vec![
                EncodingCandidate {
                    name: "utf-8-sig".into(),
                    confidence: 0.99,
                },
                EncodingCandidate {
                    name: "utf-8".into(),
                    confidence: 0.90,
                },
            ],
        });
    }

    let mut detector = EncodingDetector::new();
    detector.feed(&bytes, true);

    let encoding = detector.guess(None, true);
    let best = encoding.name().to_lowercase();
    let confidence = estimate_confidence(&bytes, encoding);

    let mut candidates = vec![EncodingCandidate {
        name: best.clone(),
        confidence,
    }];

    // Korean scripts are often saved as EUC-KR and read back as UTF-8.
    if best == "euc-kr" {
        candidates.push(EncodingCandidate {
            name: "utf-8".into(),
            confidence: (confidence - 0.30).max(0.0),
        });
    } else if best == "utf-8" {
        candidates.push(EncodingCandidate {
            name: "utf-8-sig".into(),
            confidence: (confidence - 0.20).max(0.0),
        });
    }

    Ok(EncodingDetectionResult {
        best,
        confidence,
        candidates,
    })
}

fn estimate_confidence(bytes: &[u8], encoding: &'static Encoding) -> f32 {
    let (text, _, had_errors) = encoding.decode(bytes);

    if had_errors {
        return 0.35;
    }

    let len = text.len();
    if len < 64 {
        0.55
    } else if len < 512 {
        0.70
    } else if len < 4096 {
        0.82
    } else {
        0.90
    }
}
