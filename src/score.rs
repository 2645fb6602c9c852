use crate::metric::normalize_metric;
use crate::state::{Criteria, ScoutingProfile};

/// Weighted composite score over the declared criteria.
///
/// The denominator is the sum of all declared weights, fixed up front, so a
/// player missing a metric (or carrying an unparseable cell) loses that
/// term's contribution without shrinking the denominator. Incomplete data is
/// diluted, not rewarded. A zero total weight yields 0 for every player
/// rather than an error; a uniformly-zero ranking is the caller's cue to
/// check the criteria.
pub fn score_player(profile: &ScoutingProfile, criteria: &Criteria) -> f64 {
    let total_weight: f64 = criteria.values().sum();
    if total_weight <= 0.0 {
        return 0.0;
    }

    let mut weighted_sum = 0.0;
    for (metric, weight) in criteria {
        let Some(raw) = profile.metrics.get(metric) else {
            continue;
        };
        let Some(value) = normalize_metric(raw) else {
            continue;
        };
        weighted_sum += value * weight;
    }
    weighted_sum / total_weight
}

/// Reference criteria for a right-back, used when the caller supplies none.
pub fn right_back_criteria() -> Criteria {
    Criteria::from([
        ("Tackles".to_string(), 3.0),
        ("Interceptions".to_string(), 3.0),
        ("Dribbles Completed".to_string(), 2.0),
        ("Progressive Passes".to_string(), 2.0),
        ("Aerial Duels Won".to_string(), 1.0),
        ("Pass Completion %".to_string(), 1.0),
        ("Progressive Carries".to_string(), 2.0),
        ("Blocks".to_string(), 2.0),
        ("Shot-Creating Actions".to_string(), 2.0),
        ("Touches in Attacking Third".to_string(), 1.0),
        ("Pressures".to_string(), 2.0),
    ])
}
