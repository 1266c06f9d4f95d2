use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::entry::TranslationEntry;

/// Literal separator a line must contain before the pattern is even tried.
pub const SEPARATOR: &str = " -> ";

// Each side is quoted with ' or ", and closes with the quote it opened with.
// `regex` has no backreferences, so the two quote kinds are alternated per side.
static ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:'(?P<os>.*?)'|"(?P<od>.*?)")\s*->\s*(?:'(?P<ts>.*?)'|"(?P<td>.*?)")(?P<rest>.*)$"#,
    )
    .expect("entry pattern")
});

/// Byte ranges of the quoted spans inside a matched line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub original: Range<usize>,
    pub translation: Range<usize>,
    pub translation_quote: char,
}

/// Matches `<q>original<q> -> <q>translation<q><rest>` against `line`.
/// `line` must already start at the opening quote (no leading whitespace).
pub fn match_line(line: &str) -> Option<LineMatch> {
    if !line.contains(SEPARATOR) {
        return None;
    }

    let caps = ENTRY_RE.captures(line)?;
    let original = caps.name("os").or_else(|| caps.name("od"))?;

    let (translation, translation_quote) = match (caps.name("ts"), caps.name("td")) {
        (Some(m), _) => (m, '\''),
        (None, Some(m)) => (m, '"'),
        (None, None) => return None,
    };

    Some(LineMatch {
        original: original.range(),
        translation: translation.range(),
        translation_quote,
    })
}

pub fn parse(text: &str) -> Vec<TranslationEntry> {
    let mut entries = Vec::new();

    for (i, line) in text.split('\n').enumerate() {
        let ln = i + 1;
        let logical = line.trim();

        if logical.is_empty() || !logical.contains(SEPARATOR) {
            continue;
        }

        let Some(m) = match_line(logical) else {
            continue;
        };

        let original = &logical[m.original.clone()];
        if original.trim().is_empty() {
            continue;
        }

        entries.push(TranslationEntry {
            original: original.to_string(),
            translation: logical[m.translation.clone()].to_string(),
            line_number: ln,
            full_line: Some(logical.to_string()),
            completed: false,
        });
    }

    entries
}
