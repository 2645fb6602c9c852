use std::fs;
use std::path::PathBuf;

use scoutrank::rank::rank;
use scoutrank::score::right_back_criteria;
use scoutrank::state::{Criteria, EnrichedPlayer};

// Ranks a previously captured enrichment snapshot without touching the
// network. Handy for tuning criteria weights against a fixed player set.
fn main() -> anyhow::Result<()> {
    let snapshot = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/players_snapshot.json"));
    let criteria: Criteria = match std::env::args().nth(2) {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => right_back_criteria(),
    };
    let top_k = std::env::var("TOP_K")
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(3)
        .clamp(1, 20);

    let raw = fs::read_to_string(&snapshot)?;
    let players: Vec<EnrichedPlayer> = serde_json::from_str(&raw)?;

    let best = rank(players, &criteria, top_k);
    for player in &best {
        println!(
            "{:<5} {:<26} {:>10.1} {:>7.1}",
            player.tier.map(|t| t.label()).unwrap_or("-"),
            player.record.name,
            player.record.market_value,
            player.score.unwrap_or(0.0),
        );
    }

    Ok(())
}
