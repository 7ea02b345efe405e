//! Ground-truth base synchronization at at-bat boundaries.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{EventType, PlayerMap, RawEvent};
use crate::parser::baserunning;
use crate::state::{BaseMap, GameState};

static PINCH_RUNNER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)runner\s+(.+?)\s+replaces").unwrap());

/// Overwrite the simulated bases with the ground-truth occupancy for the
/// at-bat now starting.
///
/// Two exceptions are applied before the overwrite is trusted:
///
/// * caught-stealing / pickoff-caught-stealing events share their at-bat
///   with the following event, so the ground truth already reflects the
///   runner's removal; the runner is re-inserted onto the pre-event base
///   when missing, because the event being recorded is the one that
///   removes them;
/// * a pinch-runner substitution shows the incoming runner on base in the
///   ground truth, but the about-to-be-recorded snapshot belongs to the
///   outgoing player, so the base is temporarily re-attributed.
///
/// A missing ground-truth row skips synchronization entirely and keeps
/// the simulated state.
pub(crate) fn synchronize_bases(
    state: &mut GameState,
    truth_row: Option<&crate::models::BaseOccupancy>,
    roster: &PlayerMap,
    event: &RawEvent,
) {
    let Some(occupancy) = truth_row else {
        log::warn!(
            "ground truth has no at-bat {} ({} {}); keeping simulated bases",
            state.at_bat,
            state.half,
            state.inning
        );
        return;
    };
    let mut new_bases = BaseMap::from(occupancy);

    if event.event_type.is_caught_stealing() {
        let play = match event.event_type {
            EventType::PickoffCaughtStealing2B
            | EventType::PickoffCaughtStealing3B
            | EventType::PickoffCaughtStealingHome => {
                baserunning::parse_pickoff_caught_stealing(&event.description, roster)
            }
            _ => baserunning::parse_caught_stealing(&event.description, roster),
        };
        if let Some(play) = play {
            if new_bases.get(play.from) != Some(play.runner) {
                log::info!(
                    "re-inserting runner {} on {} ahead of caught-stealing removal",
                    play.runner,
                    play.from
                );
                new_bases.set(play.from, Some(play.runner));
            }
        }
    }

    if event.event_type == EventType::OffensiveSubstitution && event.description.contains("runner")
    {
        rewind_pinch_runner(&mut new_bases, roster, &event.description);
    }

    state.bases = new_bases;
}

/// The ground truth already lists the incoming pinch-runner; put the
/// outgoing player back for the snapshot that records the substitution.
/// Names here come from the structured feed, so the lookup is exact, not
/// fuzzy.
fn rewind_pinch_runner(bases: &mut BaseMap, roster: &PlayerMap, description: &str) {
    let Some(outgoing_raw) = description.split("replaces").nth(1) else {
        return;
    };
    let outgoing_name = outgoing_raw.trim().trim_end_matches('.');
    let incoming_name = PINCH_RUNNER
        .captures(description)
        .map(|captures| captures[1].to_string());

    let outgoing = roster.id_by_exact_name(outgoing_name);
    let incoming = incoming_name.as_deref().and_then(|name| roster.id_by_exact_name(name));
    let (Some(outgoing), Some(incoming)) = (outgoing, incoming) else {
        log::debug!("pinch-runner names not exactly matched in {description:?}");
        return;
    };

    for base in crate::models::Base::LEAD_FIRST {
        if bases.get(base) == Some(incoming) {
            bases.set(base, Some(outgoing));
            log::debug!("rewound pinch-runner {incoming} to {outgoing} on {base}");
        }
    }
}
