//! Labeling of events as strategic decision points.

use crate::models::{EventType, RawEvent};
use crate::state::GameState;

/// Whether this event represents an actor's choice rather than a chance
/// outcome.
///
/// Most event types carry a fixed label. Singles, doubles, and triples are
/// reclassified as decisions only when the text reveals a disguised bunt
/// with runners on and fewer than two outs; an injury counts only when the
/// player actually left the game.
pub fn is_decision(event: &RawEvent, state: &GameState) -> bool {
    match &event.event_type {
        EventType::PitchingSubstitution
        | EventType::OffensiveSubstitution
        | EventType::DefensiveSwitch
        | EventType::DefensiveSub
        | EventType::StolenBase2B
        | EventType::StolenBase3B
        | EventType::StolenBaseHome
        | EventType::CaughtStealing2B
        | EventType::CaughtStealing3B
        | EventType::CaughtStealingHome
        | EventType::PickoffCaughtStealing2B
        | EventType::PickoffCaughtStealing3B
        | EventType::PickoffCaughtStealingHome
        | EventType::IntentWalk
        | EventType::SacBunt
        | EventType::BuntGroundout
        | EventType::BuntPopOut
        | EventType::BuntLineout
        | EventType::Ejection => true,

        EventType::Single | EventType::Double | EventType::Triple | EventType::Injury => {
            verify_conditional(event, state)
        }

        _ => false,
    }
}

fn verify_conditional(event: &RawEvent, state: &GameState) -> bool {
    let description = event.description.to_lowercase();

    if event.event_type == EventType::Injury && description.contains("left the game") {
        return true;
    }

    description.contains("soft bunt") && state.bases.any_occupied() && state.outs < 2
}
