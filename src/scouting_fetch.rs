use anyhow::{Context, Result};
use serde::Deserialize;

use crate::net::{fetch_json_cached, http_client};
use crate::sources::PerformanceSource;
use crate::state::{ScoutingProfile, SearchHit};

/// Performance-percentile lookup over a JSON endpoint configured via
/// `SCOUT_API_URL`. Exposes a name search plus per-profile scouting reports.
pub struct HttpPerformanceSource {
    base_url: String,
}

impl HttpPerformanceSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Option<Self> {
        let url = std::env::var("SCOUT_API_URL").ok()?;
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        Some(Self::new(url.trim_end_matches('/')))
    }
}

impl PerformanceSource for HttpPerformanceSource {
    fn search(&mut self, name: &str) -> Result<Vec<SearchHit>> {
        let client = http_client()?;
        let url = format!("{}/search?name={}", self.base_url, name.replace(' ', "+"));
        let body = fetch_json_cached(client, &url).context("search request failed")?;
        parse_search_results_json(&body)
    }

    fn fetch_profile(&mut self, profile_id: &str) -> Result<Option<ScoutingProfile>> {
        let client = http_client()?;
        let url = format!("{}/players/{profile_id}/scouting", self.base_url);
        let body = fetch_json_cached(client, &url).context("profile request failed")?;
        let profile = parse_scouting_profile_json(&body)?;
        if profile.is_empty() {
            return Ok(None);
        }
        Ok(Some(profile))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    name: Option<String>,
    id: Option<String>,
}

pub fn parse_search_results_json(raw: &str) -> Result<Vec<SearchHit>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }

    let resp: SearchResponse = serde_json::from_str(trimmed).context("invalid search json")?;
    let hits = resp
        .results
        .into_iter()
        .filter_map(|r| {
            let display_name = r.name?.trim().to_string();
            let profile_id = r.id?.trim().to_string();
            if display_name.is_empty() || profile_id.is_empty() {
                return None;
            }
            Some(SearchHit {
                display_name,
                profile_id,
            })
        })
        .collect();
    Ok(hits)
}

#[derive(Debug, Deserialize)]
struct ScoutingResponse {
    #[serde(default)]
    metrics: Vec<ScoutingMetric>,
}

#[derive(Debug, Deserialize)]
struct ScoutingMetric {
    title: Option<String>,
    percentile: Option<String>,
}

/// Parse a scouting report. Percentile cells stay textual here; the scorer
/// normalizes them so blank cells never masquerade as zero.
pub fn parse_scouting_profile_json(raw: &str) -> Result<ScoutingProfile> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(ScoutingProfile::default());
    }

    let resp: ScoutingResponse =
        serde_json::from_str(trimmed).context("invalid scouting report json")?;
    let mut profile = ScoutingProfile::default();
    for metric in resp.metrics {
        let Some(title) = metric.title else { continue };
        let title = title.trim().to_string();
        if title.is_empty() {
            continue;
        }
        profile
            .metrics
            .insert(title, metric.percentile.unwrap_or_default());
    }
    Ok(profile)
}
