//! Player identity and per-game roster mapping.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque player identifier, stable within a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable id -> display-name mapping for one game (both teams merged).
///
/// Insertion order is preserved so that fuzzy-match ties resolve the same
/// way on every run.
#[derive(Debug, Clone, Default)]
pub struct PlayerMap {
    by_id: HashMap<PlayerId, String>,
    order: Vec<(PlayerId, String)>,
}

impl PlayerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from id/name pairs, keeping first-seen order.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (PlayerId, String)>,
    {
        let mut map = Self::new();
        for (id, name) in pairs {
            map.insert(id, name);
        }
        map
    }

    /// Merge two rosters (home + away) into one per-game map.
    pub fn merged(first: &PlayerMap, second: &PlayerMap) -> Self {
        let mut map = first.clone();
        for (id, name) in &second.order {
            map.insert(*id, name.clone());
        }
        map
    }

    pub fn insert(&mut self, id: PlayerId, name: String) {
        if self.by_id.insert(id, name.clone()).is_none() {
            self.order.push((id, name));
        }
    }

    pub fn name(&self, id: PlayerId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    /// Exact case-insensitive name lookup, first-seen order.
    ///
    /// Used where the original feed is trusted to spell the name verbatim
    /// (pinch-runner rollback during synchronization); everything else goes
    /// through the fuzzy resolver.
    pub fn id_by_exact_name(&self, name: &str) -> Option<PlayerId> {
        let wanted = name.trim().to_lowercase();
        self.order
            .iter()
            .find(|(_, n)| n.to_lowercase() == wanted)
            .map(|(id, _)| *id)
    }

    /// Iterate entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &str)> {
        self.order.iter().map(|(id, name)| (*id, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
