//! Natural-language action parsing.
//!
//! Each sub-grammar is a self-contained recognizer: it either matches the
//! whole shape it expects and returns structured transitions, or it rejects
//! and returns nothing. Recognizers never partially apply.

pub mod baserunning;
pub mod batting;
pub mod names;
pub mod substitutions;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Base;

/// Multi-token name suffixes whose periods must not end a sentence.
const PROTECTED_SUFFIXES: [&str; 6] = ["Jr.", "Sr.", "II", "III", "IV", "V"];

const MASK: char = '\u{1}';

static CHALLENGED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)challenged").unwrap());
static CHALLENGE_RESOLUTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(overturned|upheld):\s*(.*)").unwrap());

/// Split a description into sentences on periods, protecting periods that
/// belong to name suffixes.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let mut masked = text.to_string();
    for suffix in PROTECTED_SUFFIXES {
        if suffix.contains('.') {
            masked = masked.replace(suffix, &suffix.replace('.', &MASK.to_string()));
        }
    }
    masked
        .split('.')
        .map(|sentence| sentence.replace(MASK, ".").trim().to_string())
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Handle replay-challenge phrasing.
///
/// When a description mentions a challenge, everything before it is
/// discarded and the text after the `overturned:` / `upheld:` marker is the
/// real description. A challenge with neither marker aborts the event.
pub(crate) fn strip_challenge(description: &str) -> Option<String> {
    let Some(found) = CHALLENGED.find(description) else {
        return Some(description.to_string());
    };
    let tail = &description[found.start()..];
    match CHALLENGE_RESOLUTION.captures(tail) {
        Some(captures) => Some(captures[2].trim().to_string()),
        None => {
            log::debug!("challenge without overturned/upheld marker: {description:?}");
            None
        }
    }
}

/// Parse `1st` / `first` style base tokens.
pub(crate) fn base_from_token(token: &str) -> Option<Base> {
    match token.trim().to_lowercase().as_str() {
        "1st" | "first" => Some(Base::First),
        "2nd" | "second" => Some(Base::Second),
        "3rd" | "third" => Some(Base::Third),
        _ => None,
    }
}
