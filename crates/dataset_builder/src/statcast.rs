//! Loading of the reduced Statcast feed into per-game ground-truth tables.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use bb_core::{BaseOccupancy, GroundTruth, Half, PlayerId};

/// One pitch-level record. The feed repeats at-bat state per pitch; only
/// the first pitch of an at-bat describes its starting bases.
#[derive(Debug, Deserialize)]
struct StatcastRow {
    game_pk: String,
    inning: f64,
    inning_topbot: Half,
    at_bat_number: f64,
    pitch_number: f64,
    #[serde(default)]
    on_1b: Option<f64>,
    #[serde(default)]
    on_2b: Option<f64>,
    #[serde(default)]
    on_3b: Option<f64>,
}

fn occupant(raw: Option<f64>) -> Option<PlayerId> {
    raw.map(|id| PlayerId(id as i64))
}

/// Read the reduced Statcast CSV and build one `GroundTruth` per game,
/// keeping the first pitch of every at-bat.
pub fn load_ground_truth(path: &Path) -> Result<HashMap<String, GroundTruth>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open statcast feed {}", path.display()))?;

    let mut per_game: HashMap<String, Vec<StatcastRow>> = HashMap::new();
    for record in reader.deserialize() {
        let row: StatcastRow = record.context("malformed statcast row")?;
        per_game.entry(row.game_pk.clone()).or_default().push(row);
    }

    let mut tables = HashMap::new();
    for (game_pk, mut rows) in per_game {
        rows.sort_by(|a, b| {
            (a.inning, a.at_bat_number, a.pitch_number)
                .partial_cmp(&(b.inning, b.at_bat_number, b.pitch_number))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut truth = GroundTruth::new();
        for row in rows {
            truth.insert_first(
                row.inning as u32,
                row.inning_topbot,
                row.at_bat_number as u32,
                BaseOccupancy {
                    on_first: occupant(row.on_1b),
                    on_second: occupant(row.on_2b),
                    on_third: occupant(row.on_3b),
                },
            );
        }
        log::debug!("loaded {} ground-truth at-bats for game {game_pk}", truth.len());
        tables.insert(game_pk, truth);
    }
    Ok(tables)
}
