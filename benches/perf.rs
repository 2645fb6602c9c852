use std::collections::HashMap;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use scoutrank::rank::rank;
use scoutrank::scouting_fetch::parse_scouting_profile_json;
use scoutrank::state::{Criteria, EnrichedPlayer, PlayerRecord, ScoutingProfile};
use scoutrank::valuation_fetch::parse_valuation_page_json;

fn sample_players(n: u32) -> Vec<EnrichedPlayer> {
    (0..n)
        .map(|i| {
            let metrics: HashMap<String, String> = [
                ("Tackles", (i * 7) % 101),
                ("Interceptions", (i * 13) % 101),
                ("Blocks", (i * 29) % 101),
                ("Progressive Passes", (i * 31) % 101),
                ("Pressures", (i * 37) % 101),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), format!("{v}%")))
            .collect();

            EnrichedPlayer::new(
                PlayerRecord {
                    name: format!("Player {i:03}"),
                    position: "Right-Back".to_string(),
                    club: "Bench FC".to_string(),
                    nationality: "Testland".to_string(),
                    age: 18 + (i % 15),
                    market_value: ((i * 17) % 200) as f64,
                },
                ScoutingProfile { metrics },
            )
        })
        .collect()
}

fn bench_valuation_parse(c: &mut Criterion) {
    c.bench_function("valuation_page_parse", |b| {
        b.iter(|| {
            let rows = parse_valuation_page_json(black_box(VALUATION_JSON)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_profile_parse(c: &mut Criterion) {
    c.bench_function("scouting_profile_parse", |b| {
        b.iter(|| {
            let profile = parse_scouting_profile_json(black_box(PROFILE_JSON)).unwrap();
            black_box(profile.metrics.len());
        })
    });
}

fn bench_rank_compute(c: &mut Criterion) {
    let players = sample_players(90);
    let criteria: Criteria = [
        ("Tackles", 3.0),
        ("Interceptions", 3.0),
        ("Blocks", 2.0),
        ("Progressive Passes", 2.0),
        ("Pressures", 2.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    c.bench_function("rank_compute", |b| {
        b.iter(|| {
            let best = rank(black_box(players.clone()), black_box(&criteria), 3);
            black_box(best.len());
        })
    });
}

criterion_group!(perf, bench_valuation_parse, bench_profile_parse, bench_rank_compute);
criterion_main!(perf);

static VALUATION_JSON: &str = include_str!("../tests/fixtures/valuation_page.json");
static PROFILE_JSON: &str = include_str!("../tests/fixtures/scouting_profile.json");
