//! Event replay and reconciliation.
//!
//! `GameProcessor` owns one game's state and decision log, applies events
//! strictly in feed order, re-synchronizes against ground truth at every
//! at-bat boundary, and retroactively repairs rows of the at-bat that just
//! closed. No failure inside a handler aborts the event stream.

mod corrections;
mod decision;
mod sync;

pub use decision::is_decision;

use crate::models::{
    Base, DecisionLog, EventType, GroundTruth, Half, PlayerMap, RawEvent, RunnerAction,
};
use crate::parser::{baserunning, batting, substitutions};
use crate::state::{apply_actions, GameState};

/// Per-game replay driver.
pub struct GameProcessor<'a> {
    state: GameState,
    roster: &'a PlayerMap,
    truth: &'a GroundTruth,
    log: DecisionLog,
}

impl<'a> GameProcessor<'a> {
    pub fn new(state: GameState, roster: &'a PlayerMap, truth: &'a GroundTruth) -> Self {
        Self {
            state,
            roster,
            truth,
            log: DecisionLog::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn log(&self) -> &DecisionLog {
        &self.log
    }

    pub fn into_log(self) -> DecisionLog {
        self.log
    }

    /// Apply one event within the given half-inning.
    ///
    /// Order matters: outs reset on an inning boundary, bases synchronize
    /// and past rows repair on an at-bat boundary, the decision label and
    /// snapshot are taken from the *pre*-event state, and only then does
    /// the event's handler mutate the state. Feed-supplied score and out
    /// overrides land last and win over anything the handler inferred.
    pub fn process_event(&mut self, event: &RawEvent, inning: u32, half: Half) {
        if self.state.inning != inning || self.state.half != half {
            self.state.outs = 0;
        }
        self.state.inning = inning;
        self.state.half = half;

        log::debug!(
            "{half} {inning}, at-bat {}: {} - {:?}",
            self.state.at_bat,
            event.event_type,
            event.description
        );

        if let Some(at_bat) = event.atbat_index {
            if self.state.at_bat != at_bat && !event.event_type.is_unlabeled() {
                let previous_at_bat = self.state.at_bat;
                self.state.at_bat = at_bat;

                let truth_row =
                    self.truth
                        .lookup(self.state.inning, self.state.half, self.state.at_bat);
                sync::synchronize_bases(&mut self.state, truth_row, self.roster, event);

                // A caught-stealing event is still part of the at-bat being
                // recorded; its rows are not safe to rewrite yet.
                if !event.event_type.is_caught_stealing() {
                    corrections::repair_previous_at_bat(
                        &mut self.log,
                        previous_at_bat,
                        &self.state,
                    );
                }
            }
        }

        let is_decision = decision::is_decision(event, &self.state);
        self.log
            .push(self.state.decision_row(&event.event_type, is_decision));

        self.dispatch(event);

        if let Some(update) = &event.score_update {
            if let Some(away) = update.get(&self.state.away_abbr) {
                self.state.score_away = *away;
            }
            if let Some(home) = update.get(&self.state.home_abbr) {
                self.state.score_home = *home;
            }
        }
        if let Some(outs) = event.outs_update {
            self.state.outs = outs;
        }
    }

    /// Exhaustive dispatch on the event kind. Types with no dedicated
    /// recognizer run the full batting grammar against the raw text.
    fn dispatch(&mut self, event: &RawEvent) {
        let description = event.description.as_str();
        match &event.event_type {
            EventType::StolenBase2B | EventType::StolenBase3B | EventType::StolenBaseHome => {
                let actions = baserunning::parse_stolen_base(description, self.roster);
                apply_actions(&mut self.state, &actions);
            }
            EventType::WildPitch => {
                let actions = baserunning::parse_wild_pitch(description, self.roster);
                apply_actions(&mut self.state, &actions);
            }
            EventType::PassedBall => {
                let actions = baserunning::parse_passed_ball(description, self.roster);
                apply_actions(&mut self.state, &actions);
            }
            EventType::Balk => {
                let actions = baserunning::parse_balk(description, self.roster);
                apply_actions(&mut self.state, &actions);
            }
            EventType::PickoffError1B | EventType::PickoffError2B => {
                self.handle_pickoff_error(description, true);
            }
            EventType::PickoffError3B => {
                self.handle_pickoff_error(description, false);
            }
            EventType::CaughtStealing2B
            | EventType::CaughtStealing3B
            | EventType::CaughtStealingHome => {
                let play = baserunning::parse_caught_stealing(description, self.roster);
                self.handle_caught_stealing(play);
            }
            EventType::PickoffCaughtStealing2B
            | EventType::PickoffCaughtStealing3B
            | EventType::PickoffCaughtStealingHome => {
                let play = baserunning::parse_pickoff_caught_stealing(description, self.roster);
                self.handle_caught_stealing(play);
            }
            EventType::PitchingSubstitution => {
                self.apply_roster(substitutions::parse_pitching_change(description, self.roster));
            }
            EventType::DefensiveSub => {
                self.apply_roster(substitutions::parse_defensive_sub(description, self.roster));
            }
            EventType::DefensiveSwitch => {
                self.apply_roster(substitutions::parse_defensive_switch(description, self.roster));
            }
            EventType::OffensiveSubstitution => {
                self.apply_roster(substitutions::parse_offensive_sub(description, self.roster));
            }
            EventType::Single
            | EventType::Double
            | EventType::Triple
            | EventType::IntentWalk
            | EventType::SacBunt
            | EventType::BuntGroundout
            | EventType::BuntPopOut
            | EventType::BuntLineout
            | EventType::Ejection
            | EventType::Injury
            | EventType::Other(_) => {
                let actions = batting::parse_base_update(description, self.roster);
                apply_actions(&mut self.state, &actions);
            }
        }
    }

    fn apply_roster(&mut self, change: Option<crate::models::RosterChange>) {
        if let Some(change) = change {
            apply_actions(&mut self.state, &[RunnerAction::Roster(change)]);
        }
    }

    /// A runner is caught only if the simulation agrees they hold the base
    /// the throw came to. The mismatch case is a known ground-truth defect
    /// that stays a warning rather than a guessed repair.
    fn handle_caught_stealing(&mut self, play: Option<crate::models::CaughtStealingPlay>) {
        let Some(play) = play else {
            return;
        };
        if self.state.bases.get(play.from) == Some(play.runner) {
            self.state.vacate(play.from);
            log::debug!("runner {} caught stealing {}", play.runner, play.target);
        } else {
            log::warn!(
                "no runner {} on {} to catch stealing {}",
                play.runner,
                play.from,
                play.target
            );
        }
    }

    /// An errant pickoff throw: named runners score, everyone else moves
    /// up one base (none for an error at third, where there is nowhere
    /// left to advance). Lead runners move first so trailing runners can
    /// take the vacated base.
    fn handle_pickoff_error(&mut self, description: &str, advance_runners: bool) {
        let scorers = baserunning::parse_pickoff_error_scorers(description, self.roster);
        for runner in &scorers {
            if self.state.runner_base(*runner).is_some() {
                self.state.score_runner(*runner);
            }
        }
        if !advance_runners {
            return;
        }
        for base in [Base::Second, Base::First] {
            let Some(runner) = self.state.bases.get(base) else {
                continue;
            };
            if let Some(target) = base.advanced(1) {
                self.state.vacate(base);
                self.state.occupy(target, runner);
            }
        }
    }
}
