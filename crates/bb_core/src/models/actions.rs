//! Structured transitions produced by the action parser.

use super::field::{Base, FieldPosition, TargetBase};
use super::player::PlayerId;

/// One state transition extracted from a play description.
///
/// Batter variants carry their own forced-advance semantics: existing
/// runners move ahead of the batter by the number of bases the hit earns
/// before the batter is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerAction {
    BatterReaches { batter: PlayerId, base: Base },
    BatterScores { batter: PlayerId },
    BatterOut { batter: PlayerId },
    RunnerAdvances { runner: PlayerId, to: Base },
    RunnerScores { runner: PlayerId },
    RunnerOutAt { runner: PlayerId, at: TargetBase },
    Roster(RosterChange),
}

/// A substitution or fielding reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterChange {
    /// Pinch-hitter or pinch-runner for the team at bat.
    Offensive {
        incoming: PlayerId,
        outgoing: PlayerId,
        pinch_runner: bool,
    },
    /// New fielder enters; batting order inherits the slot of the player
    /// leaving, when that player could be identified.
    DefensiveSub {
        incoming: PlayerId,
        outgoing: Option<PlayerId>,
        position: Option<FieldPosition>,
    },
    /// A fielder already in the game moves to a different position.
    PositionSwitch {
        player: PlayerId,
        to: FieldPosition,
        from: Option<FieldPosition>,
    },
    /// Relief pitcher enters, optionally taking an explicit batting slot.
    PitchingChange {
        incoming: PlayerId,
        outgoing: PlayerId,
        batting_slot: Option<usize>,
    },
    /// A pitcher enters the batting order mid-game at a stated slot
    /// (the no-DH path), without touching the mound.
    LineupEntry {
        incoming: PlayerId,
        outgoing: PlayerId,
        batting_slot: usize,
    },
}

/// Parsed caught-stealing / pickoff-caught-stealing play.
///
/// Kept structured (rather than flattened to a `RunnerAction`) because the
/// reconciliation step needs the pre-event base to re-insert the runner
/// into a synchronized snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaughtStealingPlay {
    pub runner: PlayerId,
    /// Base the runner held before the attempt.
    pub from: Base,
    /// Base the runner was thrown out trying to take.
    pub target: TargetBase,
}
