//! Fuzzy resolution of free-text player names against the game roster.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{PlayerId, PlayerMap};

/// Minimum similarity for a roster match, on a 0..1 scale.
const MATCH_THRESHOLD: f64 = 0.6;

static MIDDLE_INITIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\s+(?:[A-Za-z]\.?\s+)+(\w+)$").unwrap());

/// Collapse a run of leading initials: `"J. R. Smith"` -> `"JR Smith"`.
fn collapse_initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    if parts.len() >= 3 && parts[..parts.len() - 1]
        .iter()
        .all(|part| part.len() == 2 && part.ends_with('.'))
    {
        let initials: String = parts[..parts.len() - 1]
            .iter()
            .map(|part| part.trim_end_matches('.'))
            .collect();
        return format!("{initials} {}", parts[parts.len() - 1]);
    }
    name.to_string()
}

/// Drop a middle-initial token between first and last name.
fn strip_middle_initial(name: &str) -> String {
    match MIDDLE_INITIAL.captures(name) {
        Some(captures) => format!("{} {}", &captures[1], &captures[2]),
        None => name.to_string(),
    }
}

/// Canonical form used on both sides of the fuzzy match.
///
/// The nickname substitutions are a fixed table the feed is known to need;
/// the Garcia entry appends the generational suffix the feed omits.
pub fn normalize_name(raw: &str) -> String {
    let name = collapse_initials(raw);
    let name = name
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_punctuation());
    let name = name.replace("joshua", "josh").replace("Joshua", "josh");
    let name = name
        .replace("luis garcia", "luis garcia jr.")
        .replace("Luis Garcia", "Luis Garcia Jr.");
    let name = name.to_lowercase();
    strip_middle_initial(&name)
}

/// Resolve a raw name to the best roster match at or above the threshold.
///
/// Pure and deterministic: candidates are scanned in the roster's
/// first-seen order and ties keep the earlier entry. `None` means no
/// acceptable match; the caller decides what to log.
pub fn resolve(raw: &str, roster: &PlayerMap) -> Option<PlayerId> {
    let query = normalize_name(raw);
    if query.is_empty() {
        return None;
    }

    let mut best: Option<(f64, PlayerId)> = None;
    for (id, name) in roster.iter() {
        let score = strsim::normalized_levenshtein(&query, &normalize_name(name));
        if score >= MATCH_THRESHOLD && best.map_or(true, |(top, _)| score > top) {
            best = Some((score, id));
        }
    }
    best.map(|(_, id)| id)
}
