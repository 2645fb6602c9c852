use std::cmp::Ordering;

use crate::score::score_player;
use crate::state::{Criteria, EnrichedPlayer};
use crate::stratify::stratify;

/// Score every player and keep the best `top_k` of each value tier.
///
/// Tiers are processed High, Mid, Low and the result concatenates their
/// selections in that order, so the output holds at most `3 * top_k` players.
/// Within a tier the sort on score is stable: score-equal players keep their
/// stratified order, which together with the stratifier's deterministic
/// tie-break makes a rerun over the same input byte-identical.
pub fn rank(
    players: Vec<EnrichedPlayer>,
    criteria: &Criteria,
    top_k: usize,
) -> Vec<EnrichedPlayer> {
    let mut out = Vec::new();
    for (tier, mut members) in stratify(players) {
        for player in &mut members {
            player.score = Some(score_player(&player.profile, criteria));
        }
        members.sort_by(|a, b| {
            b.score
                .unwrap_or(0.0)
                .partial_cmp(&a.score.unwrap_or(0.0))
                .unwrap_or(Ordering::Equal)
        });
        members.truncate(top_k);
        log::debug!("{} tier: kept {} players", tier.label(), members.len());
        out.extend(members);
    }
    out
}
