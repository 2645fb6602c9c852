use anyhow::Result;

use crate::state::{EnrichedPlayer, PlayerFilters, PlayerRecord, ScoutingProfile, SearchHit};

/// Paginated market-valuation listing (source A).
///
/// `Ok(None)` signals the end of pagination. An `Err` is a fetch failure for
/// that page only; the pipeline logs it and moves on. Filters are advisory —
/// the source may return unfiltered rows and the pipeline re-checks them.
pub trait ValuationSource {
    fn fetch_page(
        &mut self,
        page: u32,
        filters: &PlayerFilters,
    ) -> Result<Option<Vec<PlayerRecord>>>;
}

/// Performance-percentile lookup (source B).
pub trait PerformanceSource {
    /// Candidate profiles for a player name, in the backend's order.
    fn search(&mut self, name: &str) -> Result<Vec<SearchHit>>;

    /// `Ok(None)` when the profile exists but carries no scouting report,
    /// or the id is unknown. Both exclude the player without failing the run.
    fn fetch_profile(&mut self, profile_id: &str) -> Result<Option<ScoutingProfile>>;
}

/// Output sink for a computed ranking. Fire-and-forget: a sink failure never
/// invalidates the ranking that was already computed.
pub trait ResultSink {
    fn emit(&mut self, players: &[EnrichedPlayer], label: &str) -> Result<()>;
}
