//! Batch driver plumbing: load scraped games, replay them through the
//! reconstruction engine, and write one decision CSV per game.

pub mod statcast;

use std::fs;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use bb_core::{
    DecisionLog, GameData, GameProcessor, GameState, GroundTruth, RosterSnapshot, COLUMNS,
};

/// Load one scraped game file (`game_<pk>.json`).
pub fn load_game(path: &Path) -> Result<GameData> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let game: GameData = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(game)
}

/// Replay every event of one game and return its decision log.
pub fn process_game(game: &GameData, truth: &GroundTruth) -> Result<DecisionLog> {
    let roster = game.merged_player_map();
    let snapshot = RosterSnapshot {
        home_lineup: GameData::lineup_slots(&game.home_lineup),
        away_lineup: GameData::lineup_slots(&game.away_lineup),
        home_pitcher: GameData::starting_pitcher(&game.home_bullpen),
        away_pitcher: GameData::starting_pitcher(&game.away_bullpen),
        home_positions: GameData::position_assignment(&game.home_position_map),
        away_positions: GameData::position_assignment(&game.away_position_map),
    };
    let state = GameState::from_roster(&game.home_abbr, &game.away_abbr, &snapshot);
    let mut processor = GameProcessor::new(state, &roster, truth);

    for inning in &game.game_summary {
        let (half, number) = inning.parse_label()?;
        for event in &inning.events {
            processor.process_event(event, number, half);
        }
    }
    Ok(processor.into_log())
}

/// Write a decision log with the fixed column schema.
pub fn write_decisions(log: &DecisionLog, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer.write_record(COLUMNS.iter())?;
    for row in log.rows() {
        writer.write_record(row.to_record())?;
    }
    writer.flush()?;
    Ok(())
}

/// Outcome of a batch run; failures are per-game and never abort the rest.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub processed: usize,
    pub failures: Vec<(String, String)>,
}

/// List `game_*.json` files under the scraped-games directory.
pub fn list_game_files(games_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(games_dir)
        .with_context(|| format!("failed to list {}", games_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("game_") && name.ends_with(".json"))
        })
        .collect();
    paths.sort();
    Ok(paths)
}

fn game_pk_of(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.trim_start_matches("game_").to_string())
        .unwrap_or_default()
}

/// Process a set of games in parallel, one worker per game. Each game owns
/// its own state and log, so no synchronization is needed; a panic or
/// error in one game is recorded and the batch continues.
pub fn run_batch(
    game_paths: &[PathBuf],
    truth_tables: &std::collections::HashMap<String, GroundTruth>,
    out_dir: &Path,
) -> Result<BatchSummary> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let results: Vec<std::result::Result<String, (String, String)>> = game_paths
        .par_iter()
        .map(|path| {
            let game_pk = game_pk_of(path);
            let outcome = catch_unwind(AssertUnwindSafe(|| -> Result<()> {
                let game = load_game(path)?;
                let truth = truth_tables.get(&game.game_pk).cloned().unwrap_or_else(|| {
                    log::warn!("no ground truth for game {}; replaying unsynchronized", game.game_pk);
                    GroundTruth::new()
                });
                let log = process_game(&game, &truth)?;
                let out_path = out_dir.join(format!("game_{}_decisions.csv", game.game_pk));
                write_decisions(&log, &out_path)?;
                log::info!("game {}: wrote {} rows", game.game_pk, log.len());
                Ok(())
            }));
            match outcome {
                Ok(Ok(())) => Ok(game_pk),
                Ok(Err(error)) => Err((game_pk, format!("{error:#}"))),
                Err(_) => Err((game_pk, "panicked during replay".to_string())),
            }
        })
        .collect();

    let mut summary = BatchSummary::default();
    for result in results {
        match result {
            Ok(_) => summary.processed += 1,
            Err(failure) => summary.failures.push(failure),
        }
    }

    if !summary.failures.is_empty() {
        let error_log = out_dir.join("game_processing_errors.log");
        let body: String = summary
            .failures
            .iter()
            .map(|(game_pk, error)| format!("game {game_pk}: {error}\n\n"))
            .collect();
        fs::write(&error_log, body)
            .with_context(|| format!("failed to write {}", error_log.display()))?;
    }
    Ok(summary)
}
