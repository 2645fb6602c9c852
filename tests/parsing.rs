use std::fs;
use std::path::PathBuf;

use scoutrank::scouting_fetch::{parse_scouting_profile_json, parse_search_results_json};
use scoutrank::valuation_fetch::parse_valuation_page_json;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_valuation_page_fixture() {
    let raw = read_fixture("valuation_page.json");
    let rows = parse_valuation_page_json(&raw).expect("fixture should parse");

    // Two malformed rows (no name, unparseable value) are dropped.
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].name, "Kylian Mbappé");
    assert_eq!(rows[0].market_value, 180.0);
    assert_eq!(rows[0].age, 26);
    assert_eq!(rows[2].position, "Right-Back");
    assert_eq!(rows[2].market_value, 80.0);
}

#[test]
fn valuation_null_is_empty() {
    assert!(parse_valuation_page_json("null").expect("null should parse").is_empty());
    assert!(parse_valuation_page_json("  ").expect("blank should parse").is_empty());
    assert!(parse_valuation_page_json("{}").expect("empty object should parse").is_empty());
}

#[test]
fn parses_search_results_fixture() {
    let raw = read_fixture("search_results.json");
    let hits = parse_search_results_json(&raw).expect("fixture should parse");

    // The id-less hit is dropped.
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].display_name, "Jude Victor Bellingham");
    assert_eq!(hits[0].profile_id, "a1b2c3");
    assert_eq!(hits[1].profile_id, "d4e5f6");
}

#[test]
fn search_null_is_empty() {
    assert!(parse_search_results_json("null").expect("null should parse").is_empty());
}

#[test]
fn parses_scouting_profile_fixture() {
    let raw = read_fixture("scouting_profile.json");
    let profile = parse_scouting_profile_json(&raw).expect("fixture should parse");

    // The title-less metric is dropped; the "—" percentile is kept as text
    // so the scorer can decide what non-numeric means.
    assert_eq!(profile.metrics.len(), 4);
    assert_eq!(profile.metrics.get("Tackles").map(String::as_str), Some("87%"));
    assert_eq!(
        profile.metrics.get("Aerial Duels Won").map(String::as_str),
        Some("—")
    );
}

#[test]
fn profile_null_is_empty() {
    let profile = parse_scouting_profile_json("null").expect("null should parse");
    assert!(profile.is_empty());
}
