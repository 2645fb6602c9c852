use anyhow::{Context, Result};
use serde::Deserialize;

use crate::metric::normalize_metric;
use crate::net::{fetch_json_cached, http_client};
use crate::sources::ValuationSource;
use crate::state::{PlayerFilters, PlayerRecord};

/// Valuation listing over a JSON endpoint configured via `VALUATION_API_URL`.
/// The concrete site behind the endpoint is deliberately replaceable.
pub struct HttpValuationSource {
    base_url: String,
}

impl HttpValuationSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Option<Self> {
        let url = std::env::var("VALUATION_API_URL").ok()?;
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        Some(Self::new(url.trim_end_matches('/')))
    }
}

impl ValuationSource for HttpValuationSource {
    fn fetch_page(
        &mut self,
        page: u32,
        filters: &PlayerFilters,
    ) -> Result<Option<Vec<PlayerRecord>>> {
        let client = http_client()?;

        // Filter params are advisory hints to the backend; the pipeline
        // re-applies the filters to whatever comes back.
        let mut url = format!("{}?page={page}", self.base_url);
        if let Some(max_age) = filters.max_age {
            url.push_str(&format!("&maxAge={max_age}"));
        }
        if !filters.positions.is_empty() {
            url.push_str(&format!("&positions={}", filters.positions.join(",").replace(' ', "+")));
        }

        let body = fetch_json_cached(client, &url).context("valuation request failed")?;
        let rows = parse_valuation_page_json(&body)?;
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows))
    }
}

#[derive(Debug, Deserialize)]
struct ValuationPage {
    #[serde(default)]
    players: Vec<ValuationRow>,
}

#[derive(Debug, Deserialize)]
struct ValuationRow {
    name: Option<String>,
    position: Option<String>,
    club: Option<String>,
    nationality: Option<String>,
    age: Option<u32>,
    #[serde(rename = "marketValue")]
    market_value: Option<String>,
}

/// Parse one listing page. Rows are extracted by named field and validated
/// before a `PlayerRecord` is built; a malformed row is dropped with a
/// warning instead of failing the page.
pub fn parse_valuation_page_json(raw: &str) -> Result<Vec<PlayerRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }

    let page: ValuationPage =
        serde_json::from_str(trimmed).context("invalid valuation listing json")?;

    let mut out = Vec::with_capacity(page.players.len());
    for row in page.players {
        match build_record(row) {
            Some(record) => out.push(record),
            None => log::warn!("malformed valuation row dropped"),
        }
    }
    Ok(out)
}

fn build_record(row: ValuationRow) -> Option<PlayerRecord> {
    let name = row.name?.trim().to_string();
    if name.is_empty() {
        return None;
    }
    let age = row.age?;
    let market_value = normalize_metric(row.market_value.as_deref()?)?;

    Some(PlayerRecord {
        name,
        position: row.position.unwrap_or_default(),
        club: row.club.unwrap_or_default(),
        nationality: row.nationality.unwrap_or_default(),
        age,
        market_value,
    })
}
