//! Retroactive repair of rows from the just-closed at-bat.
//!
//! Ground truth observed at the next at-bat boundary is authoritative over
//! the earlier simulated guesses; this is the only place already-emitted
//! rows are rewritten.

use crate::models::{Base, DecisionLog, PlayerId};
use crate::state::GameState;

const OFFENSIVE_SUB_LABEL: &str = "Offensive Substitution";

/// Repair impossible configurations in the rows of `previous_at_bat`.
///
/// Pass 1: a runner the synchronized state shows on a base cannot have
/// been on a more advanced base earlier in the same at-bat; such rows are
/// pulled back. Pass 2 re-attributes bases around offensive substitutions
/// whose incoming player leaked into pre-substitution rows.
pub(crate) fn repair_previous_at_bat(
    log: &mut DecisionLog,
    previous_at_bat: u32,
    state: &GameState,
) {
    let indexes = log.indexes_for_at_bat(previous_at_bat);
    if indexes.is_empty() {
        log::debug!("no rows recorded for at-bat {previous_at_bat}");
        return;
    }

    regress_runners(log, &indexes, state);
    repair_substitution_lineage(log, &indexes, previous_at_bat);
}

fn regress_runners(log: &mut DecisionLog, indexes: &[usize], state: &GameState) {
    let current_first = state.bases.get(Base::First);
    let current_second = state.bases.get(Base::Second);

    for &index in indexes {
        let Some(row) = log.get_mut(index) else {
            continue;
        };
        if let Some(runner) = current_first {
            if row.second_base == Some(runner) || row.third_base == Some(runner) {
                log::info!("row {index}: pulling runner {runner} back to 1st");
                if row.second_base == Some(runner) {
                    row.second_base = None;
                }
                if row.third_base == Some(runner) {
                    row.third_base = None;
                }
                row.first_base = Some(runner);
            }
        }
        if let Some(runner) = current_second {
            if row.third_base == Some(runner) {
                log::info!("row {index}: pulling runner {runner} back to 2nd");
                row.third_base = None;
                row.second_base = Some(runner);
            }
        }
    }
}

/// When the player introduced by an offensive substitution turns out to be
/// on base within the same at-bat, rows between the substitution and that
/// point may show the new player on a base that, per the lineage of the
/// single changed lineup column, still belonged to the old player.
fn repair_substitution_lineage(log: &mut DecisionLog, indexes: &[usize], previous_at_bat: u32) {
    let sub_indexes: Vec<usize> = indexes
        .iter()
        .copied()
        .filter(|&index| {
            log.get(index)
                .is_some_and(|row| row.event_type == OFFENSIVE_SUB_LABEL)
        })
        .collect();

    for sub_index in sub_indexes {
        let Some((column, old_player, new_player)) = substitution_column(log, sub_index) else {
            continue;
        };

        let on_base_in_sub_row = log
            .get(sub_index)
            .map(|row| {
                [row.first_base, row.second_base, row.third_base].contains(&Some(new_player))
            })
            .unwrap_or(false);
        if !on_base_in_sub_row {
            continue;
        }

        for prev_index in (0..=sub_index).rev() {
            let Some(row) = log.get_mut(prev_index) else {
                continue;
            };
            if row.at_bat != previous_at_bat {
                break;
            }
            if row.player_id_at(column) != Some(Some(old_player)) {
                continue;
            }
            for base in [Base::First, Base::Second, Base::Third] {
                if row.base(base) == Some(new_player) {
                    log::info!(
                        "row {prev_index}: re-attributing {base} from {new_player} to {old_player}"
                    );
                    row.set_base(base, Some(old_player));
                }
            }
        }
    }
}

/// Identify the single lineup column a substitution changed, and the
/// player ids on each side of the change. The substitution row and its
/// successor must differ in exactly two columns (the decision flag plus
/// the changed lineup slot) for the lineage to be unambiguous.
fn substitution_column(log: &DecisionLog, sub_index: usize) -> Option<(usize, PlayerId, PlayerId)> {
    let sub_row = log.get(sub_index)?;
    let next_row = log.get(sub_index + 1)?;

    let changed = sub_row.changed_columns(next_row);
    if changed.len() != 2 {
        return None;
    }
    let column = changed[0];
    let old_player = sub_row.player_id_at(column)??;
    let new_player = next_row.player_id_at(column)??;
    Some((column, old_player, new_player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DecisionRow, EventType, Half};

    fn row(at_bat: u32, event_type: &str) -> DecisionRow {
        let state = GameState::new("PHI", "NYM");
        let mut row = state.decision_row(&EventType::Other(event_type.to_string()), false);
        row.at_bat = at_bat;
        row.half = Half::Top;
        row
    }

    #[test]
    fn test_runner_pulled_back_to_first() {
        let mut log = DecisionLog::new();
        for _ in 0..3 {
            let mut r = row(7, "Single");
            r.second_base = Some(PlayerId(5));
            log.push(r);
        }
        let mut state = GameState::new("PHI", "NYM");
        state.occupy(Base::First, PlayerId(5));

        repair_previous_at_bat(&mut log, 7, &state);

        for r in log.rows() {
            assert_eq!(r.first_base, Some(PlayerId(5)));
            assert_eq!(r.second_base, None);
            assert_eq!(r.third_base, None);
        }
    }

    #[test]
    fn test_runner_pulled_back_to_second() {
        let mut log = DecisionLog::new();
        let mut r = row(4, "Double");
        r.third_base = Some(PlayerId(8));
        log.push(r);

        let mut state = GameState::new("PHI", "NYM");
        state.occupy(Base::Second, PlayerId(8));

        repair_previous_at_bat(&mut log, 4, &state);

        assert_eq!(log.get(0).unwrap().third_base, None);
        assert_eq!(log.get(0).unwrap().second_base, Some(PlayerId(8)));
    }

    #[test]
    fn test_rows_of_other_at_bats_untouched() {
        let mut log = DecisionLog::new();
        let mut r = row(3, "Single");
        r.second_base = Some(PlayerId(5));
        log.push(r);

        let mut state = GameState::new("PHI", "NYM");
        state.occupy(Base::First, PlayerId(5));

        repair_previous_at_bat(&mut log, 4, &state);

        assert_eq!(log.get(0).unwrap().second_base, Some(PlayerId(5)));
    }

    #[test]
    fn test_substitution_lineage_reattributes_base() {
        let mut log = DecisionLog::new();

        // Rows before the substitution wrongly show the incoming player
        // (21) on second; the lineup column still holds the outgoing
        // player (20).
        let mut before = row(9, "Wild Pitch");
        before.away_lineup[2] = Some(PlayerId(20));
        before.away_positions[5] = Some(PlayerId(20));
        before.second_base = Some(PlayerId(21));
        log.push(before);

        let mut sub = row(9, OFFENSIVE_SUB_LABEL);
        sub.away_lineup[2] = Some(PlayerId(20));
        sub.away_positions[5] = Some(PlayerId(20));
        sub.second_base = Some(PlayerId(21));
        log.push(sub);

        // Row after the substitution: the lineup slot now holds 21 and
        // the vacated field position is open, nothing else changed.
        let mut after = row(9, OFFENSIVE_SUB_LABEL);
        after.away_lineup[2] = Some(PlayerId(21));
        after.second_base = Some(PlayerId(21));
        log.push(after);

        let state = GameState::new("PHI", "NYM");
        repair_previous_at_bat(&mut log, 9, &state);

        assert_eq!(log.get(0).unwrap().second_base, Some(PlayerId(20)));
        assert_eq!(log.get(1).unwrap().second_base, Some(PlayerId(20)));
        // The post-substitution row keeps the incoming runner.
        assert_eq!(log.get(2).unwrap().second_base, Some(PlayerId(21)));
    }
}
