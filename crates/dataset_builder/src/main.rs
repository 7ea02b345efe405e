//! Dataset Builder CLI
//!
//! Scraped game JSON + reduced Statcast CSV -> one decision-point CSV per
//! game. Games are independent and run one rayon worker each.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use dataset_builder::{list_game_files, run_batch, statcast};

#[derive(Parser)]
#[command(name = "dataset_builder")]
#[command(about = "Build decision-point datasets from scraped game logs", long_about = None)]
struct Cli {
    /// Directory of scraped game_<pk>.json files
    #[arg(long, default_value = "scraped_games")]
    games_dir: PathBuf,

    /// Reduced Statcast CSV with per-at-bat base occupancy
    #[arg(long, default_value = "helper_files/statcast_reduced2023.csv")]
    statcast: PathBuf,

    /// Output directory for decision CSVs
    #[arg(long, default_value = "games")]
    out_dir: PathBuf,

    /// Process only this game id
    #[arg(long)]
    game_pk: Option<String>,

    /// Stop after this many games
    #[arg(long)]
    limit: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut game_paths = list_game_files(&cli.games_dir)?;
    if let Some(game_pk) = &cli.game_pk {
        let wanted = format!("game_{game_pk}.json");
        game_paths.retain(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name == wanted)
        });
    }
    if let Some(limit) = cli.limit {
        game_paths.truncate(limit);
    }
    if game_paths.is_empty() {
        anyhow::bail!("no game files found under {}", cli.games_dir.display());
    }

    let truth_tables = statcast::load_ground_truth(&cli.statcast)
        .context("failed to load ground-truth feed")?;

    log::info!(
        "processing {} games ({} ground-truth tables)",
        game_paths.len(),
        truth_tables.len()
    );
    let summary = run_batch(&game_paths, &truth_tables, &cli.out_dir)?;

    log::info!(
        "done: {} games written, {} failed",
        summary.processed,
        summary.failures.len()
    );
    for (game_pk, error) in &summary.failures {
        log::warn!("game {game_pk} failed: {error}");
    }
    Ok(())
}
