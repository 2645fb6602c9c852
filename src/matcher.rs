use std::thread;
use std::time::{Duration, Instant};

use crate::state::SearchHit;

/// Canonical form used as an identity key across both sources:
/// lowercase, interior whitespace collapsed.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Resolve a valuation-side name against performance-source search hits.
///
/// Exact normalized equality wins; failing that, the first hit in source
/// order is taken (no fuzzy scoring, the search backend's ordering is
/// authoritative). `None` only when there are no candidates at all, which
/// downstream treats as "skip this player", not as an error.
pub fn match_profile<'a>(name: &str, candidates: &'a [SearchHit]) -> Option<&'a SearchHit> {
    let wanted = normalize_name(name);
    candidates
        .iter()
        .find(|hit| normalize_name(&hit.display_name) == wanted)
        .or_else(|| candidates.first())
}

/// Blocking pacer for the performance source's fair-use interval.
///
/// The first call returns immediately; each later call sleeps until at least
/// the configured interval has passed since the previous one. Deliberately a
/// plain sleep: the enrichment loop is serial and an interrupted run simply
/// leaves the remaining players unenriched.
#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Interval from `MATCH_PAUSE_SECS`, default 2s, clamped to 1..=5.
    pub fn from_env() -> Self {
        let secs = std::env::var("MATCH_PAUSE_SECS")
            .ok()
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(2)
            .clamp(1, 5);
        Self::new(Duration::from_secs(secs))
    }

    pub fn pause(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}
