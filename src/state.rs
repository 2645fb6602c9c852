use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Snapshot of one player as listed by the valuation source.
/// Never mutated after construction; enrichment wraps it instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub position: String,
    pub club: String,
    pub nationality: String,
    pub age: u32,
    /// Market value in millions, already normalized from the source's
    /// currency text ("€45.5m" -> 45.5).
    pub market_value: f64,
}

/// Per-player scouting report: metric title -> raw percentile text.
/// Values are kept as source text ("87%", "—"); normalization happens at
/// scoring time so a missing and an unparseable metric behave the same.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoutingProfile {
    pub metrics: HashMap<String, String>,
}

impl ScoutingProfile {
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueTier {
    High,
    Mid,
    Low,
}

impl ValueTier {
    pub const ALL: [ValueTier; 3] = [ValueTier::High, ValueTier::Mid, ValueTier::Low];

    pub fn label(self) -> &'static str {
        match self {
            ValueTier::High => "High",
            ValueTier::Mid => "Mid",
            ValueTier::Low => "Low",
        }
    }
}

/// Valuation listing row joined with its scouting report.
/// `tier` is set by stratification, `score` by the criteria scorer; both stay
/// `None` until the respective stage has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPlayer {
    #[serde(flatten)]
    pub record: PlayerRecord,
    #[serde(default)]
    pub profile: ScoutingProfile,
    #[serde(default)]
    pub tier: Option<ValueTier>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl EnrichedPlayer {
    pub fn new(record: PlayerRecord, profile: ScoutingProfile) -> Self {
        Self {
            record,
            profile,
            tier: None,
            score: None,
        }
    }
}

/// Weighted scoring criteria: metric title -> non-negative weight.
pub type Criteria = HashMap<String, f64>;

/// Listing filters. The valuation source treats these as advisory, so the
/// pipeline applies them again before accepting a row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerFilters {
    pub max_age: Option<u32>,
    /// Accepted positions; empty means any.
    #[serde(default)]
    pub positions: Vec<String>,
}

impl PlayerFilters {
    pub fn accepts(&self, record: &PlayerRecord) -> bool {
        if let Some(max_age) = self.max_age {
            if record.age > max_age {
                return false;
            }
        }
        if !self.positions.is_empty()
            && !self
                .positions
                .iter()
                .any(|p| p.eq_ignore_ascii_case(&record.position))
        {
            return false;
        }
        true
    }

    pub fn from_env() -> Self {
        let max_age = std::env::var("MAX_AGE")
            .ok()
            .and_then(|val| val.parse::<u32>().ok());
        let positions = std::env::var("POSITIONS")
            .map(|val| {
                val.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self { max_age, positions }
    }
}

/// One search result from the performance source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub display_name: String,
    pub profile_id: String,
}
