//! Independent per-at-bat base-occupancy feed, trusted over the simulation
//! at at-bat boundaries.

use std::collections::HashMap;

use super::field::Half;
use super::player::PlayerId;

/// Base occupancy at the start of one at-bat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseOccupancy {
    pub on_first: Option<PlayerId>,
    pub on_second: Option<PlayerId>,
    pub on_third: Option<PlayerId>,
}

/// Per-game lookup table keyed by (inning, half, at-bat number).
///
/// The first record seen for a key wins; the feed repeats rows per pitch
/// and only the first pitch of an at-bat describes its starting bases.
#[derive(Debug, Clone, Default)]
pub struct GroundTruth {
    rows: HashMap<(u32, Half, u32), BaseOccupancy>,
}

impl GroundTruth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless an earlier record already claimed this at-bat.
    pub fn insert_first(&mut self, inning: u32, half: Half, at_bat: u32, bases: BaseOccupancy) {
        self.rows.entry((inning, half, at_bat)).or_insert(bases);
    }

    pub fn lookup(&self, inning: u32, half: Half, at_bat: u32) -> Option<&BaseOccupancy> {
        self.rows.get(&(inning, half, at_bat))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_record_wins() {
        let mut truth = GroundTruth::new();
        let first = BaseOccupancy {
            on_first: Some(PlayerId(10)),
            ..Default::default()
        };
        let later = BaseOccupancy {
            on_first: Some(PlayerId(99)),
            ..Default::default()
        };
        truth.insert_first(3, Half::Top, 21, first);
        truth.insert_first(3, Half::Top, 21, later);

        assert_eq!(truth.lookup(3, Half::Top, 21), Some(&first));
        assert_eq!(truth.lookup(3, Half::Bottom, 21), None);
    }
}
