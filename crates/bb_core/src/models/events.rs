//! Raw play-by-play events as delivered by the scraped feed.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of event kinds the engine dispatches on.
///
/// The feed labels events with free-form strings; everything the engine has
/// no dedicated handler for arrives as `Other` and falls back to the generic
/// base-update grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    StolenBase2B,
    StolenBase3B,
    StolenBaseHome,
    WildPitch,
    PassedBall,
    Balk,
    PickoffError1B,
    PickoffError2B,
    PickoffError3B,
    PitchingSubstitution,
    DefensiveSub,
    DefensiveSwitch,
    OffensiveSubstitution,
    PickoffCaughtStealing2B,
    PickoffCaughtStealing3B,
    PickoffCaughtStealingHome,
    CaughtStealing2B,
    CaughtStealing3B,
    CaughtStealingHome,
    Single,
    Double,
    Triple,
    IntentWalk,
    SacBunt,
    BuntGroundout,
    BuntPopOut,
    BuntLineout,
    Ejection,
    Injury,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::StolenBase2B => "Stolen Base 2B",
            EventType::StolenBase3B => "Stolen Base 3B",
            EventType::StolenBaseHome => "Stolen Base Home",
            EventType::WildPitch => "Wild Pitch",
            EventType::PassedBall => "Passed Ball",
            EventType::Balk => "Balk",
            EventType::PickoffError1B => "Pickoff Error 1B",
            EventType::PickoffError2B => "Pickoff Error 2B",
            EventType::PickoffError3B => "Pickoff Error 3B",
            EventType::PitchingSubstitution => "Pitching Substitution",
            EventType::DefensiveSub => "Defensive Sub",
            EventType::DefensiveSwitch => "Defensive Switch",
            EventType::OffensiveSubstitution => "Offensive Substitution",
            EventType::PickoffCaughtStealing2B => "Pickoff Caught Stealing 2B",
            EventType::PickoffCaughtStealing3B => "Pickoff Caught Stealing 3B",
            EventType::PickoffCaughtStealingHome => "Pickoff Caught Stealing Home",
            EventType::CaughtStealing2B => "Caught Stealing 2B",
            EventType::CaughtStealing3B => "Caught Stealing 3B",
            EventType::CaughtStealingHome => "Caught Stealing Home",
            EventType::Single => "Single",
            EventType::Double => "Double",
            EventType::Triple => "Triple",
            EventType::IntentWalk => "Intent Walk",
            EventType::SacBunt => "Sac Bunt",
            EventType::BuntGroundout => "Bunt Groundout",
            EventType::BuntPopOut => "Bunt Pop Out",
            EventType::BuntLineout => "Bunt Lineout",
            EventType::Ejection => "Ejection",
            EventType::Injury => "Injury",
            EventType::Other(label) => label,
        }
    }

    /// Caught-stealing family: the ground-truth row sharing this event's
    /// at-bat already reflects the runner's removal.
    pub fn is_caught_stealing(&self) -> bool {
        matches!(
            self,
            EventType::PickoffCaughtStealing2B
                | EventType::PickoffCaughtStealing3B
                | EventType::PickoffCaughtStealingHome
                | EventType::CaughtStealing2B
                | EventType::CaughtStealing3B
                | EventType::CaughtStealingHome
        )
    }

    /// Events the feed delivered without a usable type label.
    pub fn is_unlabeled(&self) -> bool {
        matches!(self, EventType::Other(label) if label.trim().is_empty())
    }
}

impl From<String> for EventType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Stolen Base 2B" => EventType::StolenBase2B,
            "Stolen Base 3B" => EventType::StolenBase3B,
            "Stolen Base Home" => EventType::StolenBaseHome,
            "Wild Pitch" => EventType::WildPitch,
            "Passed Ball" => EventType::PassedBall,
            "Balk" => EventType::Balk,
            "Pickoff Error 1B" => EventType::PickoffError1B,
            "Pickoff Error 2B" => EventType::PickoffError2B,
            "Pickoff Error 3B" => EventType::PickoffError3B,
            "Pitching Substitution" => EventType::PitchingSubstitution,
            "Defensive Sub" => EventType::DefensiveSub,
            "Defensive Switch" => EventType::DefensiveSwitch,
            "Offensive Substitution" => EventType::OffensiveSubstitution,
            "Pickoff Caught Stealing 2B" => EventType::PickoffCaughtStealing2B,
            "Pickoff Caught Stealing 3B" => EventType::PickoffCaughtStealing3B,
            "Pickoff Caught Stealing Home" => EventType::PickoffCaughtStealingHome,
            "Caught Stealing 2B" => EventType::CaughtStealing2B,
            "Caught Stealing 3B" => EventType::CaughtStealing3B,
            "Caught Stealing Home" => EventType::CaughtStealingHome,
            "Single" => EventType::Single,
            "Double" => EventType::Double,
            "Triple" => EventType::Triple,
            "Intent Walk" => EventType::IntentWalk,
            "Sac Bunt" => EventType::SacBunt,
            "Bunt Groundout" => EventType::BuntGroundout,
            "Bunt Pop Out" => EventType::BuntPopOut,
            "Bunt Lineout" => EventType::BuntLineout,
            "Ejection" => EventType::Ejection,
            "Injury" => EventType::Injury,
            _ => EventType::Other(label),
        }
    }
}

impl From<EventType> for String {
    fn from(kind: EventType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scraped play event, immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub description: String,
    /// Post-event score keyed by team abbreviation, when the feed shows one.
    #[serde(default)]
    pub score_update: Option<HashMap<String, u32>>,
    /// Post-event out count, when the feed shows one.
    #[serde(default)]
    pub outs_update: Option<u8>,
    /// Ground-truth at-bat index; absent when the feed element carried none.
    #[serde(default)]
    pub atbat_index: Option<u32>,
}
