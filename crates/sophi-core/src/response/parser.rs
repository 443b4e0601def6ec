//! Structured-tag extraction from raw model output.
//!
//! Grammar (whitespace around fields is insignificant):
//!
//! ```text
//! contradiction := "[LOGICAL_INCONSISTENCY]"
//! fallacy       := "[FALLACY:" field "|" field "|" field "]"
//! field         := any run of characters other than "|" and "]"
//! ```
//!
//! Anything that does not match the grammar is ordinary text and passes
//! through unchanged.

use crate::conversation::{Fallacy, MessageMetadata};
use crate::prompt::CONTRADICTION_SENTINEL;
use once_cell::sync::Lazy;
use regex::Regex;

static FALLACY_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[FALLACY:\s*([^|\]]*?)\s*\|\s*([^|\]]*?)\s*\|\s*([^|\]]*?)\s*\]")
        .expect("fallacy tag pattern is valid")
});

/// Raw model output split into display text and typed metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    /// Output with every fallacy tag removed, trimmed
    pub cleaned_text: String,
    pub contradiction_detected: bool,
    /// Fallacy tags in source order
    pub fallacies: Vec<Fallacy>,
}

impl ParsedResponse {
    pub fn metadata(&self) -> MessageMetadata {
        MessageMetadata {
            contradiction_detected: self.contradiction_detected,
            fallacies: self.fallacies.clone(),
            error: false,
        }
    }
}

/// Parses raw model output. Never fails.
///
/// The contradiction sentinel is detected but left in the text. Fallacy tags
/// are stripped layer by layer until none remain; every tag removed on a
/// layer is recorded, so a tag that only becomes well-formed once an inner
/// tag is gone still yields a `Fallacy`. Order is layer order, then source
/// order within a layer.
pub fn parse_response(raw: &str) -> ParsedResponse {
    let mut fallacies = Vec::new();
    let mut cleaned = raw.to_string();

    loop {
        let layer: Vec<Fallacy> = FALLACY_TAG
            .captures_iter(&cleaned)
            .map(|caps| Fallacy {
                name: caps[1].trim().to_string(),
                definition: caps[2].trim().to_string(),
                example: caps[3].trim().to_string(),
            })
            .collect();
        if layer.is_empty() {
            break;
        }
        fallacies.extend(layer);
        cleaned = strip_tags(&cleaned);
    }

    ParsedResponse {
        cleaned_text: cleaned.trim().to_string(),
        contradiction_detected: raw.contains(CONTRADICTION_SENTINEL),
        fallacies,
    }
}

/// Removes one layer of fallacy tags.
///
/// When the text left of a tag already ends in whitespace (or is empty), the
/// spaces and tabs right of it are dropped so no double gap remains.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for tag in FALLACY_TAG.find_iter(text) {
        out.push_str(&text[cursor..tag.start()]);
        cursor = tag.end();

        let left_is_gap = out.chars().last().is_none_or(char::is_whitespace);
        if left_is_gap {
            let rest = &text[cursor..];
            cursor += rest.len() - rest.trim_start_matches([' ', '\t']).len();
        }
    }

    out.push_str(&text[cursor..]);
    out
}
