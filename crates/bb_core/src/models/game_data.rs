//! Scraped-game input model: rosters, lineups, and the per-inning event log
//! as stored by the acquisition layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::events::RawEvent;
use super::field::{FieldPosition, Half};
use super::player::{PlayerId, PlayerMap};
use crate::error::BbError;

/// Player ids arrive as either JSON numbers or strings depending on the
/// scrape vintage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Num(i64),
    Text(String),
}

impl RawId {
    pub fn to_player_id(&self) -> Option<PlayerId> {
        match self {
            RawId::Num(n) => Some(PlayerId(*n)),
            RawId::Text(s) => s.trim().parse::<i64>().ok().map(PlayerId),
        }
    }
}

/// One half-inning of scraped events, labeled like `"Top 1st"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InningSummary {
    pub inning: String,
    pub events: Vec<RawEvent>,
}

impl InningSummary {
    /// Parse the `"Top 1st"` / `"Bot 9th"` label into half and number.
    pub fn parse_label(&self) -> Result<(Half, u32), BbError> {
        let mut parts = self.inning.split_whitespace();
        let half = match parts.next() {
            Some("Top") => Half::Top,
            Some("Bot") | Some("Bottom") => Half::Bottom,
            _ => return Err(BbError::BadInningLabel(self.inning.clone())),
        };
        let number = parts
            .next()
            .and_then(|n| n.trim_end_matches(['s', 't', 'n', 'd', 'r', 'h']).parse::<u32>().ok())
            .ok_or_else(|| BbError::BadInningLabel(self.inning.clone()))?;
        Ok((half, number))
    }
}

/// Everything the acquisition layer captured for one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameData {
    pub away_lineup: Vec<RawId>,
    #[serde(default)]
    pub away_sub_ins: Vec<RawId>,
    pub away_player_map: HashMap<String, String>,
    pub away_bullpen: Vec<RawId>,
    pub away_position_map: HashMap<String, String>,
    pub home_lineup: Vec<RawId>,
    #[serde(default)]
    pub home_sub_ins: Vec<RawId>,
    pub home_player_map: HashMap<String, String>,
    pub home_bullpen: Vec<RawId>,
    pub home_position_map: HashMap<String, String>,
    pub game_summary: Vec<InningSummary>,
    pub game_pk: String,
    pub home_abbr: String,
    pub away_abbr: String,
}

impl GameData {
    /// Merge both team rosters into one per-game player map.
    ///
    /// Raw map keys are in arbitrary hash order; they are sorted by id so
    /// the merged map (and therefore fuzzy-match tie-breaks) is stable.
    pub fn merged_player_map(&self) -> PlayerMap {
        let mut map = PlayerMap::new();
        for raw in [&self.home_player_map, &self.away_player_map] {
            let mut pairs: Vec<(PlayerId, String)> = raw
                .iter()
                .filter_map(|(id, name)| {
                    id.trim().parse::<i64>().ok().map(|n| (PlayerId(n), name.clone()))
                })
                .collect();
            pairs.sort_by_key(|(id, _)| *id);
            for (id, name) in pairs {
                map.insert(id, name);
            }
        }
        map
    }

    /// Starting lineup as nine slots, short lineups padded with `None`.
    pub fn lineup_slots(raw: &[RawId]) -> [Option<PlayerId>; 9] {
        let mut slots = [None; 9];
        for (slot, raw_id) in raw.iter().take(9).enumerate() {
            slots[slot] = raw_id.to_player_id();
        }
        slots
    }

    /// Initial fielding assignment for one team's position map.
    pub fn position_assignment(raw: &HashMap<String, String>) -> Vec<(FieldPosition, PlayerId)> {
        let mut assigned: Vec<(FieldPosition, PlayerId)> = raw
            .iter()
            .filter_map(|(id, code)| {
                let player = id.trim().parse::<i64>().ok().map(PlayerId)?;
                let position = FieldPosition::from_code(code.trim())?;
                Some((position, player))
            })
            .collect();
        assigned.sort_by_key(|(position, _)| position.index());
        assigned
    }

    /// First arm listed in the bullpen is the starter.
    pub fn starting_pitcher(bullpen: &[RawId]) -> Option<PlayerId> {
        bullpen.first().and_then(RawId::to_player_id)
    }
}
