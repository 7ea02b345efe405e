//! Mutable per-game state and its transition operations.
//!
//! One `GameState` exists per game, owned by the replay loop and threaded
//! by exclusive reference; there is no global instance. Every transition
//! tolerates garbled input: a missing player or occupied base is logged and
//! skipped, never an error.

mod apply;

pub use apply::apply_actions;

use crate::models::{
    Base, BaseOccupancy, DecisionRow, EventType, FieldPosition, Half, PlayerId,
};

/// Which dugout a roster operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Home,
    Away,
}

impl Team {
    /// The team in the field: home defends the top of an inning.
    pub fn fielding(half: Half) -> Team {
        match half {
            Half::Top => Team::Home,
            Half::Bottom => Team::Away,
        }
    }

    /// The team at bat, inverse of [`Team::fielding`].
    pub fn batting(half: Half) -> Team {
        match half {
            Half::Top => Team::Away,
            Half::Bottom => Team::Home,
        }
    }
}

/// The three bases. At most one runner per base, and a runner holds at
/// most one base; `occupy` refuses rather than evicts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseMap([Option<PlayerId>; 3]);

impl BaseMap {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, base: Base) -> Option<PlayerId> {
        self.0[base.index()]
    }

    pub fn set(&mut self, base: Base, occupant: Option<PlayerId>) {
        self.0[base.index()] = occupant;
    }

    /// The base currently held by `runner`, if any.
    pub fn base_of(&self, runner: PlayerId) -> Option<Base> {
        Base::LEAD_FIRST
            .iter()
            .copied()
            .find(|base| self.get(*base) == Some(runner))
    }

    pub fn any_occupied(&self) -> bool {
        self.0.iter().any(Option::is_some)
    }

    pub fn clear(&mut self) {
        self.0 = [None; 3];
    }
}

impl From<&BaseOccupancy> for BaseMap {
    fn from(occupancy: &BaseOccupancy) -> Self {
        let mut bases = BaseMap::empty();
        bases.set(Base::First, occupancy.on_first);
        bases.set(Base::Second, occupancy.on_second);
        bases.set(Base::Third, occupancy.on_third);
        bases
    }
}

/// One team's fielding table, indexed by `FieldPosition`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionMap([Option<PlayerId>; 9]);

impl PositionMap {
    pub fn get(&self, position: FieldPosition) -> Option<PlayerId> {
        self.0[position.index()]
    }

    pub fn set(&mut self, position: FieldPosition, player: Option<PlayerId>) {
        self.0[position.index()] = player;
    }

    pub fn position_of(&self, player: PlayerId) -> Option<FieldPosition> {
        FieldPosition::ALL
            .iter()
            .copied()
            .find(|pos| self.get(*pos) == Some(player))
    }

    pub fn as_slots(&self) -> [Option<PlayerId>; 9] {
        self.0
    }
}

/// Initial lineups, mound, and fielding assignment, taken from the box
/// score before the first event.
#[derive(Debug, Clone, Default)]
pub struct RosterSnapshot {
    pub home_lineup: [Option<PlayerId>; 9],
    pub away_lineup: [Option<PlayerId>; 9],
    pub home_pitcher: Option<PlayerId>,
    pub away_pitcher: Option<PlayerId>,
    pub home_positions: Vec<(FieldPosition, PlayerId)>,
    pub away_positions: Vec<(FieldPosition, PlayerId)>,
}

/// Mutable snapshot of one game in progress.
#[derive(Debug, Clone)]
pub struct GameState {
    pub home_abbr: String,
    pub away_abbr: String,
    pub inning: u32,
    pub half: Half,
    pub outs: u8,
    pub score_home: u32,
    pub score_away: u32,
    pub bases: BaseMap,
    pub home_lineup: [Option<PlayerId>; 9],
    pub away_lineup: [Option<PlayerId>; 9],
    pub home_pitcher: Option<PlayerId>,
    pub away_pitcher: Option<PlayerId>,
    pub home_positions: PositionMap,
    pub away_positions: PositionMap,
    pub at_bat: u32,
}

impl GameState {
    pub fn new(home_abbr: impl Into<String>, away_abbr: impl Into<String>) -> Self {
        Self {
            home_abbr: home_abbr.into(),
            away_abbr: away_abbr.into(),
            inning: 1,
            half: Half::Top,
            outs: 0,
            score_home: 0,
            score_away: 0,
            bases: BaseMap::empty(),
            home_lineup: [None; 9],
            away_lineup: [None; 9],
            home_pitcher: None,
            away_pitcher: None,
            home_positions: PositionMap::default(),
            away_positions: PositionMap::default(),
            at_bat: 1,
        }
    }

    /// Seed a fresh state from the pre-game roster snapshot.
    pub fn from_roster(
        home_abbr: impl Into<String>,
        away_abbr: impl Into<String>,
        roster: &RosterSnapshot,
    ) -> Self {
        let mut state = GameState::new(home_abbr, away_abbr);
        state.home_lineup = roster.home_lineup;
        state.away_lineup = roster.away_lineup;
        state.home_pitcher = roster.home_pitcher;
        state.away_pitcher = roster.away_pitcher;
        for (position, player) in &roster.home_positions {
            state.home_positions.set(*position, Some(*player));
        }
        for (position, player) in &roster.away_positions {
            state.away_positions.set(*position, Some(*player));
        }
        state
    }

    // ========================
    // Base transitions
    // ========================

    /// Place a runner on an empty base. An occupied target is a modeling
    /// error: it is logged and the existing occupant is never evicted.
    pub fn occupy(&mut self, base: Base, player: PlayerId) {
        match self.bases.get(base) {
            None => self.bases.set(base, Some(player)),
            Some(occupant) => {
                log::warn!("base {base} already held by {occupant}; refusing to place {player}");
            }
        }
    }

    pub fn vacate(&mut self, base: Base) {
        self.bases.set(base, None);
    }

    /// Remove `player` from whichever base they hold. Scoring a player who
    /// is not on base (a batter crossing on a home run) is a no-op.
    pub fn score_runner(&mut self, player: PlayerId) {
        if let Some(base) = self.bases.base_of(player) {
            self.bases.set(base, None);
        }
        log::debug!("runner {player} scored");
    }

    pub fn runner_base(&self, player: PlayerId) -> Option<Base> {
        self.bases.base_of(player)
    }

    /// Force existing runners ahead by `count` bases, lead runner first so
    /// a vacated base can be refilled by the trailing runner in the same
    /// pass. Runners pushed past third score.
    pub fn advance_runners(&mut self, count: u8) {
        if count == 0 {
            return;
        }
        for base in Base::LEAD_FIRST {
            let Some(runner) = self.bases.get(base) else {
                continue;
            };
            match base.advanced(count) {
                None => {
                    self.bases.set(base, None);
                    log::debug!("runner {runner} forced home from {base}");
                }
                Some(target) => {
                    if self.bases.get(target).is_none() {
                        self.bases.set(base, None);
                        self.bases.set(target, Some(runner));
                    } else {
                        log::warn!(
                            "forced advance blocked: {target} occupied while moving {runner} from {base}"
                        );
                    }
                }
            }
        }
    }

    // ========================
    // Roster transitions
    // ========================

    pub fn lineup(&self, team: Team) -> &[Option<PlayerId>; 9] {
        match team {
            Team::Home => &self.home_lineup,
            Team::Away => &self.away_lineup,
        }
    }

    pub fn pitcher(&self, team: Team) -> Option<PlayerId> {
        match team {
            Team::Home => self.home_pitcher,
            Team::Away => self.away_pitcher,
        }
    }

    pub fn set_pitcher(&mut self, team: Team, pitcher: Option<PlayerId>) {
        match team {
            Team::Home => self.home_pitcher = pitcher,
            Team::Away => self.away_pitcher = pitcher,
        }
    }

    pub fn positions(&self, team: Team) -> &PositionMap {
        match team {
            Team::Home => &self.home_positions,
            Team::Away => &self.away_positions,
        }
    }

    pub fn set_position_player(
        &mut self,
        team: Team,
        position: FieldPosition,
        player: Option<PlayerId>,
    ) {
        match team {
            Team::Home => self.home_positions.set(position, player),
            Team::Away => self.away_positions.set(position, player),
        }
    }

    /// Swap `old` for `new` in the field. The position table takes
    /// precedence; the pitcher slot is used only when `old` is the current
    /// pitcher or no pitcher is set.
    pub fn substitute(&mut self, team: Team, old: PlayerId, new: PlayerId) {
        let positions = match team {
            Team::Home => &mut self.home_positions,
            Team::Away => &mut self.away_positions,
        };
        if let Some(position) = positions.position_of(old) {
            positions.set(position, Some(new));
            log::debug!("replaced {old} at {position} with {new}");
            return;
        }

        let current = self.pitcher(team);
        if current == Some(old) || current.is_none() {
            self.set_pitcher(team, Some(new));
            log::debug!("replaced pitcher {old} with {new}");
        } else {
            log::warn!("substitute: {old} holds no position and is not pitching; no-op");
        }
    }

    /// Replace `old` in the batting order. An explicit slot (1-based)
    /// is written unconditionally; otherwise the first matching entry is
    /// replaced.
    pub fn replace_in_lineup(
        &mut self,
        team: Team,
        old: PlayerId,
        new: PlayerId,
        slot: Option<usize>,
    ) {
        let lineup = match team {
            Team::Home => &mut self.home_lineup,
            Team::Away => &mut self.away_lineup,
        };
        if let Some(slot) = slot {
            if (1..=9).contains(&slot) {
                lineup[slot - 1] = Some(new);
            } else {
                log::warn!("batting slot {slot} out of range");
            }
            return;
        }
        match lineup.iter().position(|entry| *entry == Some(old)) {
            Some(index) => lineup[index] = Some(new),
            None => log::warn!("lineup replace: {old} not found in batting order"),
        }
    }

    /// Swap identities on the base paths (pinch-runner).
    pub fn replace_on_base(&mut self, old: PlayerId, new: PlayerId) {
        match self.bases.base_of(old) {
            Some(base) => {
                self.bases.set(base, Some(new));
                log::debug!("pinch-runner {new} in for {old} at {base}");
            }
            None => log::warn!("pinch-runner: {old} not on any base"),
        }
    }

    /// Drop `old` from the position table wherever they field.
    pub fn clear_position_of(&mut self, team: Team, old: PlayerId) {
        let positions = match team {
            Team::Home => &mut self.home_positions,
            Team::Away => &mut self.away_positions,
        };
        if let Some(position) = positions.position_of(old) {
            positions.set(position, None);
        }
    }

    // ========================
    // Snapshots
    // ========================

    /// Copy the pre-event state into an output row.
    pub fn decision_row(&self, event_type: &EventType, is_decision: bool) -> DecisionRow {
        DecisionRow {
            event_type: event_type.as_str().to_string(),
            is_decision,
            inning: self.inning,
            half: self.half,
            at_bat: self.at_bat,
            score_deficit: self.score_home as i32 - self.score_away as i32,
            outs: self.outs,
            third_base: self.bases.get(Base::Third),
            second_base: self.bases.get(Base::Second),
            first_base: self.bases.get(Base::First),
            home_pitcher: self.home_pitcher,
            away_pitcher: self.away_pitcher,
            home_lineup: self.home_lineup,
            away_lineup: self.away_lineup,
            home_positions: self.home_positions.as_slots(),
            away_positions: self.away_positions.as_slots(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::new("HOU", "TEX")
    }

    #[test]
    fn test_occupy_refuses_eviction() {
        let mut gs = state();
        gs.occupy(Base::First, PlayerId(1));
        gs.occupy(Base::First, PlayerId(2));
        assert_eq!(gs.bases.get(Base::First), Some(PlayerId(1)));
    }

    #[test]
    fn test_forced_advance_on_double() {
        // Runners on first and second, batter doubles: second scores,
        // first takes third, batter lands on second.
        let mut gs = state();
        gs.occupy(Base::First, PlayerId(1));
        gs.occupy(Base::Second, PlayerId(2));

        gs.advance_runners(2);
        gs.occupy(Base::Second, PlayerId(3));

        assert_eq!(gs.bases.get(Base::First), None);
        assert_eq!(gs.bases.get(Base::Second), Some(PlayerId(3)));
        assert_eq!(gs.bases.get(Base::Third), Some(PlayerId(1)));
    }

    #[test]
    fn test_forced_advance_refills_vacated_base() {
        let mut gs = state();
        gs.occupy(Base::First, PlayerId(1));
        gs.occupy(Base::Second, PlayerId(2));
        gs.occupy(Base::Third, PlayerId(3));

        gs.advance_runners(1);

        assert_eq!(gs.bases.get(Base::First), None);
        assert_eq!(gs.bases.get(Base::Second), Some(PlayerId(1)));
        assert_eq!(gs.bases.get(Base::Third), Some(PlayerId(2)));
    }

    #[test]
    fn test_substitute_prefers_position_table() {
        let mut gs = state();
        gs.set_position_player(Team::Home, FieldPosition::Shortstop, Some(PlayerId(5)));
        gs.set_pitcher(Team::Home, Some(PlayerId(5)));

        gs.substitute(Team::Home, PlayerId(5), PlayerId(6));

        assert_eq!(
            gs.positions(Team::Home).get(FieldPosition::Shortstop),
            Some(PlayerId(6))
        );
        // Pitcher slot untouched because the position table matched first.
        assert_eq!(gs.pitcher(Team::Home), Some(PlayerId(5)));
    }

    #[test]
    fn test_substitute_falls_back_to_pitcher() {
        let mut gs = state();
        gs.set_pitcher(Team::Away, Some(PlayerId(30)));
        gs.substitute(Team::Away, PlayerId(30), PlayerId(31));
        assert_eq!(gs.pitcher(Team::Away), Some(PlayerId(31)));
    }

    #[test]
    fn test_replace_in_lineup_explicit_slot() {
        let mut gs = state();
        gs.home_lineup[8] = Some(PlayerId(40));
        gs.replace_in_lineup(Team::Home, PlayerId(99), PlayerId(41), Some(9));
        assert_eq!(gs.home_lineup[8], Some(PlayerId(41)));
    }

    #[test]
    fn test_team_role_mapping() {
        assert_eq!(Team::fielding(Half::Top), Team::Home);
        assert_eq!(Team::batting(Half::Top), Team::Away);
        assert_eq!(Team::fielding(Half::Bottom), Team::Away);
        assert_eq!(Team::batting(Half::Bottom), Team::Home);
    }

    proptest! {
        // A runner never holds two bases, no matter how occupies, forced
        // advances, and scores interleave.
        #[test]
        fn prop_runner_holds_at_most_one_base(ops in prop::collection::vec((0u8..4, 0u8..3, 1i64..6), 0..40)) {
            let mut gs = state();
            for (op, base_index, id) in ops {
                let base = Base::from_ordinal(base_index + 1).unwrap();
                let player = PlayerId(id);
                match op {
                    0 => gs.occupy(base, player),
                    1 => gs.advance_runners(base_index + 1),
                    2 => gs.score_runner(player),
                    _ => gs.vacate(base),
                }
                for candidate in 1..6 {
                    let held = Base::LEAD_FIRST
                        .iter()
                        .filter(|b| gs.bases.get(**b) == Some(PlayerId(candidate)))
                        .count();
                    prop_assert!(held <= 1);
                }
            }
        }
    }
}
