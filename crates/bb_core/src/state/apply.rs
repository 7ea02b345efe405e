//! Application of parsed action sequences to the game state.

use crate::models::{RosterChange, RunnerAction};

use super::{GameState, Team};

/// Apply one event's actions atomically, in the order the parser emitted
/// them. Individual failures (runner not on base, occupied target) degrade
/// to log-and-skip; the rest of the sequence still applies.
pub fn apply_actions(state: &mut GameState, actions: &[RunnerAction]) {
    for action in actions {
        apply_action(state, action);
    }
}

fn apply_action(state: &mut GameState, action: &RunnerAction) {
    match action {
        RunnerAction::BatterReaches { batter, base } => {
            state.advance_runners(base.ordinal());
            state.occupy(*base, *batter);
        }
        RunnerAction::BatterScores { batter } => {
            state.advance_runners(4);
            state.score_runner(*batter);
        }
        RunnerAction::BatterOut { batter } => {
            // Outs arrive through the event's outs override; no base change.
            log::debug!("batter {batter} retired");
        }
        RunnerAction::RunnerAdvances { runner, to } => match state.runner_base(*runner) {
            Some(current) => {
                state.vacate(current);
                state.occupy(*to, *runner);
            }
            None => log::warn!("advance: runner {runner} not on any base"),
        },
        RunnerAction::RunnerScores { runner } => match state.runner_base(*runner) {
            Some(current) => {
                state.vacate(current);
                log::debug!("runner {runner} scored from {current}");
            }
            None => log::warn!("score: runner {runner} not on any base"),
        },
        RunnerAction::RunnerOutAt { runner, at } => match state.runner_base(*runner) {
            Some(current) => {
                state.vacate(current);
                log::debug!("runner {runner} out at {at}");
            }
            None => log::warn!("out at {at}: runner {runner} not on any base"),
        },
        RunnerAction::Roster(change) => apply_roster_change(state, change),
    }
}

fn apply_roster_change(state: &mut GameState, change: &RosterChange) {
    match change {
        RosterChange::Offensive {
            incoming,
            outgoing,
            pinch_runner,
        } => {
            let team = Team::batting(state.half);
            // A position player batting for the pitcher means the pitcher
            // is done; the mound stays open until the next pitching change.
            if state.pitcher(team) == Some(*outgoing) {
                state.set_pitcher(team, None);
            }
            state.replace_in_lineup(team, *outgoing, *incoming, None);
            // The field position stays open until the next defensive move.
            state.clear_position_of(team, *outgoing);
            if *pinch_runner {
                state.replace_on_base(*outgoing, *incoming);
            }
        }
        RosterChange::DefensiveSub {
            incoming,
            outgoing,
            position,
        } => {
            let team = Team::fielding(state.half);
            match position {
                Some(position) => state.set_position_player(team, *position, Some(*incoming)),
                None => log::warn!("defensive sub: no target position for {incoming}"),
            }
            match outgoing {
                Some(outgoing) => state.replace_in_lineup(team, *outgoing, *incoming, None),
                None => log::warn!("defensive sub: departing player unknown for {incoming}"),
            }
        }
        RosterChange::PositionSwitch { player, to, from } => {
            let team = Team::fielding(state.half);
            state.set_position_player(team, *to, Some(*player));
            if let Some(from) = from {
                if state.positions(team).get(*from) == Some(*player) {
                    state.set_position_player(team, *from, None);
                }
            }
        }
        RosterChange::PitchingChange {
            incoming,
            outgoing,
            batting_slot,
        } => {
            let team = Team::fielding(state.half);
            state.substitute(team, *outgoing, *incoming);
            if batting_slot.is_some() {
                state.replace_in_lineup(team, *outgoing, *incoming, *batting_slot);
            }
        }
        RosterChange::LineupEntry {
            incoming,
            outgoing,
            batting_slot,
        } => {
            let team = Team::fielding(state.half);
            state.replace_in_lineup(team, *outgoing, *incoming, Some(*batting_slot));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Base, FieldPosition, Half, PlayerId, TargetBase};

    fn state() -> GameState {
        GameState::new("LAD", "SD")
    }

    #[test]
    fn test_single_on_empty_bases() {
        let mut gs = state();
        apply_actions(
            &mut gs,
            &[RunnerAction::BatterReaches {
                batter: PlayerId(27),
                base: Base::First,
            }],
        );
        assert_eq!(gs.bases.get(Base::First), Some(PlayerId(27)));
        assert_eq!(gs.bases.get(Base::Second), None);
        assert_eq!(gs.bases.get(Base::Third), None);
    }

    #[test]
    fn test_double_with_explicit_score() {
        // Turner on second, Betts doubles, Turner scores: forced advance
        // empties second before the explicit movement is applied.
        let mut gs = state();
        gs.occupy(Base::Second, PlayerId(1)); // Turner
        apply_actions(
            &mut gs,
            &[
                RunnerAction::BatterReaches {
                    batter: PlayerId(2), // Betts
                    base: Base::Second,
                },
                RunnerAction::RunnerScores { runner: PlayerId(1) },
            ],
        );
        assert_eq!(gs.bases.get(Base::Second), Some(PlayerId(2)));
        assert_eq!(gs.bases.base_of(PlayerId(1)), None);
    }

    #[test]
    fn test_home_run_clears_batter_and_runners() {
        let mut gs = state();
        gs.occupy(Base::First, PlayerId(1));
        gs.occupy(Base::Third, PlayerId(3));
        apply_actions(&mut gs, &[RunnerAction::BatterScores { batter: PlayerId(9) }]);
        assert!(!gs.bases.any_occupied());
    }

    #[test]
    fn test_out_at_clears_current_base() {
        let mut gs = state();
        gs.occupy(Base::First, PlayerId(4));
        apply_actions(
            &mut gs,
            &[RunnerAction::RunnerOutAt {
                runner: PlayerId(4),
                at: TargetBase::Second,
            }],
        );
        assert_eq!(gs.bases.get(Base::First), None);
        assert_eq!(gs.bases.get(Base::Second), None);
    }

    #[test]
    fn test_offensive_sub_for_pitcher_opens_mound() {
        let mut gs = state();
        gs.half = Half::Bottom; // home bats
        gs.home_pitcher = Some(PlayerId(50));
        gs.home_lineup[8] = Some(PlayerId(50));

        apply_actions(
            &mut gs,
            &[RunnerAction::Roster(RosterChange::Offensive {
                incoming: PlayerId(51),
                outgoing: PlayerId(50),
                pinch_runner: false,
            })],
        );

        assert_eq!(gs.home_pitcher, None);
        assert_eq!(gs.home_lineup[8], Some(PlayerId(51)));
    }

    #[test]
    fn test_pinch_runner_takes_over_base() {
        let mut gs = state();
        gs.half = Half::Top; // away bats
        gs.away_lineup[0] = Some(PlayerId(10));
        gs.occupy(Base::Second, PlayerId(10));

        apply_actions(
            &mut gs,
            &[RunnerAction::Roster(RosterChange::Offensive {
                incoming: PlayerId(11),
                outgoing: PlayerId(10),
                pinch_runner: true,
            })],
        );

        assert_eq!(gs.bases.get(Base::Second), Some(PlayerId(11)));
        assert_eq!(gs.away_lineup[0], Some(PlayerId(11)));
    }

    #[test]
    fn test_pitching_change_is_fielding_team() {
        let mut gs = state();
        gs.half = Half::Top; // home fields
        gs.home_pitcher = Some(PlayerId(60));

        apply_actions(
            &mut gs,
            &[RunnerAction::Roster(RosterChange::PitchingChange {
                incoming: PlayerId(61),
                outgoing: PlayerId(60),
                batting_slot: None,
            })],
        );

        assert_eq!(gs.home_pitcher, Some(PlayerId(61)));
        // Batting order untouched without an explicit slot.
        assert_eq!(gs.home_lineup, [None; 9]);
    }

    #[test]
    fn test_position_switch_clears_old_slot() {
        let mut gs = state();
        gs.half = Half::Bottom; // away fields
        gs.set_position_player(Team::Away, FieldPosition::LeftField, Some(PlayerId(70)));

        apply_actions(
            &mut gs,
            &[RunnerAction::Roster(RosterChange::PositionSwitch {
                player: PlayerId(70),
                to: FieldPosition::CenterField,
                from: Some(FieldPosition::LeftField),
            })],
        );

        assert_eq!(gs.positions(Team::Away).get(FieldPosition::LeftField), None);
        assert_eq!(
            gs.positions(Team::Away).get(FieldPosition::CenterField),
            Some(PlayerId(70))
        );
    }
}
