use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use scoutrank::enrich::{find_best_players, max_pages_from_env};
use scoutrank::export::XlsxSink;
use scoutrank::matcher::Pacer;
use scoutrank::persist::ScoutDb;
use scoutrank::score::right_back_criteria;
use scoutrank::scouting_fetch::HttpPerformanceSource;
use scoutrank::sources::ResultSink;
use scoutrank::state::{Criteria, EnrichedPlayer, PlayerFilters};
use scoutrank::valuation_fetch::HttpValuationSource;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let criteria = load_criteria()?;
    let filters = PlayerFilters::from_env();
    let top_k = std::env::var("TOP_K")
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(3)
        .clamp(1, 20);

    let Some(mut valuation) = HttpValuationSource::from_env() else {
        anyhow::bail!("VALUATION_API_URL is not set");
    };
    let Some(mut performance) = HttpPerformanceSource::from_env() else {
        anyhow::bail!("SCOUT_API_URL is not set");
    };
    let mut pacer = Pacer::from_env();

    let best = find_best_players(
        &mut valuation,
        &mut performance,
        &filters,
        &criteria,
        top_k,
        max_pages_from_env(),
        &mut pacer,
    );

    if best.is_empty() {
        log::warn!("no players with scouting reports matched the filters");
        return Ok(());
    }
    if best.iter().all(|p| p.score == Some(0.0)) {
        log::warn!("every score is zero; check the criteria weights");
    }

    print_table(&best);

    let label = "Best Players by Criteria";
    for mut sink in build_sinks() {
        // Display/export is fire-and-forget; the ranking above stands either way.
        if let Err(err) = sink.emit(&best, label) {
            log::warn!("result sink failed: {err:#}");
        }
    }

    Ok(())
}

fn load_criteria() -> Result<Criteria> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CRITERIA_FILE").ok())
        .map(PathBuf::from);
    let Some(path) = path else {
        log::info!("no criteria file given, using the reference right-back criteria");
        return Ok(right_back_criteria());
    };
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("read criteria file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse criteria file {}", path.display()))
}

fn build_sinks() -> Vec<Box<dyn ResultSink>> {
    let mut sinks: Vec<Box<dyn ResultSink>> = Vec::new();

    let db_path = std::env::var("SCOUT_DB")
        .ok()
        .map(PathBuf::from)
        .or_else(ScoutDb::default_path);
    if let Some(path) = db_path {
        match ScoutDb::open(&path) {
            Ok(db) => sinks.push(Box::new(db)),
            Err(err) => log::warn!("rankings db unavailable: {err:#}"),
        }
    }
    if let Some(xlsx) = XlsxSink::from_env() {
        sinks.push(Box::new(xlsx));
    }
    sinks
}

fn print_table(players: &[EnrichedPlayer]) {
    println!(
        "{:<5} {:<26} {:<18} {:<22} {:>4} {:>10} {:>7}",
        "Tier", "Player", "Position", "Club", "Age", "Value (m)", "Score"
    );
    for player in players {
        println!(
            "{:<5} {:<26} {:<18} {:<22} {:>4} {:>10.1} {:>7.1}",
            player.tier.map(|t| t.label()).unwrap_or("-"),
            player.record.name,
            player.record.position,
            player.record.club,
            player.record.age,
            player.record.market_value,
            player.score.unwrap_or(0.0),
        );
    }
}
