//! Decision-point snapshots and the per-game row log.

use once_cell::sync::Lazy;

use super::field::{Base, FieldPosition, Half};
use super::player::PlayerId;

/// Fixed output schema, in column order.
pub static COLUMNS: Lazy<Vec<String>> = Lazy::new(|| {
    let mut columns: Vec<String> = [
        "Event_Type",
        "Is_Decision",
        "Inning",
        "Half",
        "At_Bat",
        "Score_Deficit",
        "Outs",
        "Third_Base",
        "Second_Base",
        "First_Base",
        "Home_Pitcher",
        "Away_Pitcher",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    for slot in 1..=9 {
        columns.push(format!("Home_Lineup_{slot}"));
        columns.push(format!("Away_Lineup_{slot}"));
    }
    for pos in FieldPosition::ALL {
        columns.push(format!("Home_{}", pos.code()));
        columns.push(format!("Away_{}", pos.code()));
    }
    columns
});

/// One emitted snapshot of the pre-event game state.
///
/// Rows are immutable once written, with one sanctioned exception: the
/// reconciliation step may rewrite base and at-bat-scoped columns of rows
/// belonging to the most recently closed at-bat.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionRow {
    pub event_type: String,
    pub is_decision: bool,
    pub inning: u32,
    pub half: Half,
    pub at_bat: u32,
    /// Home score minus away score at snapshot time.
    pub score_deficit: i32,
    pub outs: u8,
    pub third_base: Option<PlayerId>,
    pub second_base: Option<PlayerId>,
    pub first_base: Option<PlayerId>,
    pub home_pitcher: Option<PlayerId>,
    pub away_pitcher: Option<PlayerId>,
    pub home_lineup: [Option<PlayerId>; 9],
    pub away_lineup: [Option<PlayerId>; 9],
    /// Indexed by `FieldPosition::index()`.
    pub home_positions: [Option<PlayerId>; 9],
    pub away_positions: [Option<PlayerId>; 9],
}

fn cell(id: Option<PlayerId>) -> String {
    id.map(|p| p.to_string()).unwrap_or_default()
}

impl DecisionRow {
    pub fn base(&self, base: Base) -> Option<PlayerId> {
        match base {
            Base::First => self.first_base,
            Base::Second => self.second_base,
            Base::Third => self.third_base,
        }
    }

    pub fn set_base(&mut self, base: Base, occupant: Option<PlayerId>) {
        match base {
            Base::First => self.first_base = occupant,
            Base::Second => self.second_base = occupant,
            Base::Third => self.third_base = occupant,
        }
    }

    /// Serialize in schema order for CSV output and column diffing.
    pub fn to_record(&self) -> Vec<String> {
        let mut record = vec![
            self.event_type.clone(),
            if self.is_decision { "True" } else { "False" }.to_string(),
            self.inning.to_string(),
            self.half.label().to_string(),
            self.at_bat.to_string(),
            self.score_deficit.to_string(),
            self.outs.to_string(),
            cell(self.third_base),
            cell(self.second_base),
            cell(self.first_base),
            cell(self.home_pitcher),
            cell(self.away_pitcher),
        ];
        for slot in 0..9 {
            record.push(cell(self.home_lineup[slot]));
            record.push(cell(self.away_lineup[slot]));
        }
        for pos in FieldPosition::ALL {
            record.push(cell(self.home_positions[pos.index()]));
            record.push(cell(self.away_positions[pos.index()]));
        }
        record
    }

    /// The player id held by the schema column at `index`, or `None` when
    /// that column does not carry a player id.
    pub fn player_id_at(&self, index: usize) -> Option<Option<PlayerId>> {
        match index {
            7 => Some(self.third_base),
            8 => Some(self.second_base),
            9 => Some(self.first_base),
            10 => Some(self.home_pitcher),
            11 => Some(self.away_pitcher),
            12..=29 => {
                let slot = (index - 12) / 2;
                if (index - 12) % 2 == 0 {
                    Some(self.home_lineup[slot])
                } else {
                    Some(self.away_lineup[slot])
                }
            }
            30..=47 => {
                let slot = (index - 30) / 2;
                if (index - 30) % 2 == 0 {
                    Some(self.home_positions[slot])
                } else {
                    Some(self.away_positions[slot])
                }
            }
            _ => None,
        }
    }

    /// Indexes of columns whose serialized values differ, event type
    /// excluded (column 0).
    pub fn changed_columns(&self, other: &DecisionRow) -> Vec<usize> {
        let a = self.to_record();
        let b = other.to_record();
        a.iter()
            .zip(b.iter())
            .enumerate()
            .skip(1)
            .filter(|(_, (x, y))| x != y)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Ordered, indexed row log for one game.
///
/// Append-only except for the reconciliation repair pass, which mutates
/// rows of the just-closed at-bat in place.
#[derive(Debug, Clone, Default)]
pub struct DecisionLog {
    rows: Vec<DecisionRow>,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: DecisionRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DecisionRow> {
        self.rows.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DecisionRow> {
        self.rows.get_mut(index)
    }

    pub fn rows(&self) -> &[DecisionRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [DecisionRow] {
        &mut self.rows
    }

    /// Row indexes belonging to the given at-bat, in emission order.
    pub fn indexes_for_at_bat(&self, at_bat: u32) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.at_bat == at_bat)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_row() -> DecisionRow {
        DecisionRow {
            event_type: "Single".to_string(),
            is_decision: false,
            inning: 1,
            half: Half::Top,
            at_bat: 1,
            score_deficit: 0,
            outs: 0,
            third_base: None,
            second_base: None,
            first_base: None,
            home_pitcher: None,
            away_pitcher: None,
            home_lineup: [None; 9],
            away_lineup: [None; 9],
            home_positions: [None; 9],
            away_positions: [None; 9],
        }
    }

    #[test]
    fn test_schema_has_48_columns() {
        assert_eq!(COLUMNS.len(), 48);
        assert_eq!(COLUMNS[0], "Event_Type");
        assert_eq!(COLUMNS[7], "Third_Base");
        assert_eq!(COLUMNS[12], "Home_Lineup_1");
        assert_eq!(COLUMNS[13], "Away_Lineup_1");
        assert_eq!(COLUMNS[30], "Home_DH");
        assert_eq!(COLUMNS[47], "Away_RF");
        assert_eq!(empty_row().to_record().len(), COLUMNS.len());
    }

    #[test]
    fn test_player_column_lookup_matches_record_order() {
        let mut row = empty_row();
        row.first_base = Some(PlayerId(42));
        row.away_lineup[3] = Some(PlayerId(7));
        row.home_positions[0] = Some(PlayerId(9)); // DH

        let record = row.to_record();
        assert_eq!(record[9], "42");
        assert_eq!(row.player_id_at(9), Some(Some(PlayerId(42))));

        let away_slot_4 = 12 + 3 * 2 + 1;
        assert_eq!(record[away_slot_4], "7");
        assert_eq!(row.player_id_at(away_slot_4), Some(Some(PlayerId(7))));

        assert_eq!(record[30], "9");
        assert_eq!(row.player_id_at(30), Some(Some(PlayerId(9))));
        assert_eq!(row.player_id_at(0), None);
    }

    #[test]
    fn test_changed_columns_skips_event_type() {
        let a = empty_row();
        let mut b = empty_row();
        b.event_type = "Double".to_string();
        b.first_base = Some(PlayerId(1));
        b.outs = 1;

        assert_eq!(a.changed_columns(&b), vec![6, 9]);
    }
}
