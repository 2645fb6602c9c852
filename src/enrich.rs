use std::collections::HashSet;

use crate::matcher::{Pacer, match_profile, normalize_name};
use crate::rank::rank;
use crate::sources::{PerformanceSource, ValuationSource};
use crate::state::{Criteria, EnrichedPlayer, PlayerFilters, PlayerRecord};

/// Pagination cap for the valuation listing, from `MAX_PAGES` (default 5).
pub fn max_pages_from_env() -> u32 {
    std::env::var("MAX_PAGES")
        .ok()
        .and_then(|val| val.parse::<u32>().ok())
        .unwrap_or(5)
        .clamp(1, 50)
}

/// Drain the valuation listing into a deduplicated, filtered set of records.
///
/// Stops at the source's end-of-pages or the page cap, whichever comes
/// first. A failed page is logged and skipped; later pages are still tried.
/// Duplicates (same normalized name) are skipped individually — one repeated
/// row must not end pagination early.
pub fn collect_players(
    source: &mut dyn ValuationSource,
    filters: &PlayerFilters,
    max_pages: u32,
) -> Vec<PlayerRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<PlayerRecord> = Vec::new();

    for page in 1..=max_pages {
        let rows = match source.fetch_page(page, filters) {
            Ok(Some(rows)) => rows,
            Ok(None) => break,
            Err(err) => {
                log::warn!("valuation page {page} failed: {err:#}");
                continue;
            }
        };
        for record in rows {
            if !filters.accepts(&record) {
                continue;
            }
            if !seen.insert(normalize_name(&record.name)) {
                log::debug!("duplicate listing row skipped: {}", record.name);
                continue;
            }
            out.push(record);
        }
    }

    log::info!("collected {} players from valuation listing", out.len());
    out
}

/// Join each record with its scouting profile, strictly one player at a
/// time. The pacer blocks before each player's lookups so the performance
/// source never sees more than one match request per interval. Every miss
/// (no search hits, no report, fetch error) skips that player only.
pub fn enrich_players(
    players: Vec<PlayerRecord>,
    performance: &mut dyn PerformanceSource,
    pacer: &mut Pacer,
) -> Vec<EnrichedPlayer> {
    let mut out: Vec<EnrichedPlayer> = Vec::new();

    for record in players {
        pacer.pause();

        let hits = match performance.search(&record.name) {
            Ok(hits) => hits,
            Err(err) => {
                log::warn!("search failed for {}: {err:#}", record.name);
                continue;
            }
        };
        let Some(hit) = match_profile(&record.name, &hits) else {
            log::debug!("no profile match for {}", record.name);
            continue;
        };
        let profile = match performance.fetch_profile(&hit.profile_id) {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                log::debug!("no scouting report for {}", record.name);
                continue;
            }
            Err(err) => {
                log::warn!("profile fetch failed for {}: {err:#}", record.name);
                continue;
            }
        };
        out.push(EnrichedPlayer::new(record, profile));
    }

    log::info!("enriched {} players with scouting reports", out.len());
    out
}

/// Full pipeline: listing -> identity match + enrich -> stratified top-k.
pub fn find_best_players(
    valuation: &mut dyn ValuationSource,
    performance: &mut dyn PerformanceSource,
    filters: &PlayerFilters,
    criteria: &Criteria,
    top_k: usize,
    max_pages: u32,
    pacer: &mut Pacer,
) -> Vec<EnrichedPlayer> {
    let records = collect_players(valuation, filters, max_pages);
    let enriched = enrich_players(records, performance, pacer);
    rank(enriched, criteria, top_k)
}
