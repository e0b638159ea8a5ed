//! Command implementations for the scrimkit binary.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use scrimkit_core::analytics::{Analytics, AnalyticsConfig, config as analytics_config};
use scrimkit_core::combat_log::EventKind;
use scrimkit_core::error::Anomaly;
use scrimkit_core::parser::{LogParser, ParseOutcome};
use scrimkit_core::storage::{EventStore, SqliteEventStore};
use scrimkit_types::formatting::{format_duration, format_percent, format_rate};
use scrimkit_types::{DuelWinrate, XFactorBreakdown};

/// Parse exports in parallel; each file is independent, so failures are
/// per-file and the rest still report.
pub fn parse(files: &[PathBuf], save: Option<PathBuf>, scrim_id: Option<i64>) -> Result<(), String> {
    if files.is_empty() {
        return Err("no input files given".to_string());
    }
    if save.is_some() && (scrim_id.is_none() || files.len() != 1) {
        return Err("--save needs --scrim-id and exactly one input file".to_string());
    }

    let outcomes: Vec<(PathBuf, Result<ParseOutcome, String>)> = files
        .par_iter()
        .map(|path| {
            let outcome = LogParser::parse_file(path).map_err(|e| e.to_string());
            (path.clone(), outcome)
        })
        .collect();

    let mut failed = false;
    for (path, outcome) in &outcomes {
        match outcome {
            Ok(outcome) => print_summary(path, outcome),
            Err(err) => {
                failed = true;
                eprintln!("{}: {err}", path.display());
            }
        }
    }

    if let (Some(db), Some(id)) = (save, scrim_id)
        && let Some((_, Ok(outcome))) = outcomes.first()
    {
        let mut store = open_store(Some(db))?;
        store.save(id, &outcome.workbook).map_err(|e| e.to_string())?;
        info!(scrim_id = id, "workbook saved");
        println!("saved scrim {id}");
    }

    if failed {
        return Err("one or more files failed to parse".to_string());
    }
    Ok(())
}

fn print_summary(path: &Path, outcome: &ParseOutcome) {
    println!(
        "{}: {} records, {} record errors, {} skipped lines",
        path.display(),
        outcome.workbook.len(),
        outcome.errors.len(),
        outcome.skipped_lines
    );
    for kind in EventKind::ALL {
        let count = outcome.workbook.kind_len(kind);
        if count > 0 {
            println!("  {kind}: {count}");
        }
    }
    for error in outcome.errors.iter().take(5) {
        println!("  error: {error}");
    }
    if outcome.errors.len() > 5 {
        println!("  ... and {} more errors", outcome.errors.len() - 5);
    }
}

#[derive(Serialize)]
struct PlayerReport {
    player: String,
    avg_ult_charge_time_secs: f64,
    avg_time_to_use_ult_secs: f64,
    final_blows_per_ultimate: f64,
    fight_count: usize,
    x_factor: XFactorBreakdown,
    duels: Vec<DuelWinrate>,
    anomalies: Vec<Anomaly>,
}

pub fn stats(
    file: &Path,
    player: &str,
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), String> {
    let config = match config_path {
        Some(path) => analytics_config::load_file(path).map_err(|e| e.to_string())?,
        None => AnalyticsConfig::default(),
    };
    let outcome = LogParser::parse_file(file).map_err(|e| e.to_string())?;
    if !outcome.errors.is_empty() {
        info!(errors = outcome.errors.len(), "parsed with record errors");
    }

    let analytics = Analytics::with_config(&outcome.workbook, config);
    let report = PlayerReport {
        player: player.to_string(),
        avg_ult_charge_time_secs: analytics.average_ult_charge_time(player),
        avg_time_to_use_ult_secs: analytics.average_time_to_use_ult(player),
        final_blows_per_ultimate: analytics.final_blows_per_ultimate(player),
        fight_count: analytics.fights(player).len(),
        x_factor: analytics.x_factor(player),
        duels: analytics.duel_winrates(player),
        anomalies: analytics.ultimate_anomalies(player),
    };

    if json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    println!("{player}");
    println!(
        "  avg ultimate charge time   {}",
        format_duration(report.avg_ult_charge_time_secs)
    );
    println!(
        "  avg time to use ultimate   {}",
        format_duration(report.avg_time_to_use_ult_secs)
    );
    println!(
        "  final blows per ultimate   {}",
        format_rate(report.final_blows_per_ultimate)
    );
    println!("  fights                     {}", report.fight_count);
    println!(
        "  x-factor ({})          {}",
        report.x_factor.role,
        format_rate(report.x_factor.score)
    );
    if !report.duels.is_empty() {
        println!("  duels:");
        for duel in &report.duels {
            println!(
                "    vs {} ({}): {}-{}  {}",
                duel.enemy_name,
                duel.enemy_hero,
                duel.kills,
                duel.deaths,
                format_percent(duel.winrate_pct)
            );
        }
    }
    for anomaly in &report.anomalies {
        println!("  anomaly: {anomaly}");
    }
    Ok(())
}

pub fn delete(scrim_id: i64, db: Option<PathBuf>) -> Result<(), String> {
    let mut store = open_store(db)?;
    store.delete(scrim_id).map_err(|e| e.to_string())?;
    println!("deleted scrim {scrim_id}");
    Ok(())
}

pub fn list(db: Option<PathBuf>) -> Result<(), String> {
    let store = open_store(db)?;
    let ids = store.scrim_ids().map_err(|e| e.to_string())?;
    if ids.is_empty() {
        println!("no stored scrims");
    }
    for id in ids {
        println!("{id}");
    }
    Ok(())
}

fn open_store(db: Option<PathBuf>) -> Result<SqliteEventStore, String> {
    let path = match db {
        Some(path) => path,
        None => default_db_path().ok_or("no data directory available; pass --db")?,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    SqliteEventStore::open(&path).map_err(|e| e.to_string())
}

fn default_db_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("scrimkit").join("scrims.db"))
}
