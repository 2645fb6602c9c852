use std::cmp::Ordering;

use crate::state::{EnrichedPlayer, ValueTier};

/// Partition players into contiguous value tiers.
///
/// Sorted descending by market value; value-equal players order by name so a
/// rerun over the same data always produces the same tiers regardless of
/// upstream fetch order. Tier sizes follow the thirds arithmetic exactly:
/// High and Mid each take ⌊N/3⌋, Low absorbs the remainder, so small
/// populations can leave the upper tiers empty.
pub fn stratify(mut players: Vec<EnrichedPlayer>) -> Vec<(ValueTier, Vec<EnrichedPlayer>)> {
    players.sort_by(|a, b| {
        b.record
            .market_value
            .partial_cmp(&a.record.market_value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.record.name.cmp(&b.record.name))
    });

    let third = players.len() / 3;
    let mut high = players;
    let mut mid = high.split_off(third);
    let low = mid.split_off(third);

    let mut tiers = vec![
        (ValueTier::High, high),
        (ValueTier::Mid, mid),
        (ValueTier::Low, low),
    ];
    for (tier, members) in &mut tiers {
        for player in members.iter_mut() {
            player.tier = Some(*tier);
        }
    }
    tiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PlayerRecord, ScoutingProfile};

    fn player(name: &str, value: f64) -> EnrichedPlayer {
        EnrichedPlayer::new(
            PlayerRecord {
                name: name.to_string(),
                position: "Centre-Forward".to_string(),
                club: "Test FC".to_string(),
                nationality: "Testland".to_string(),
                age: 24,
                market_value: value,
            },
            ScoutingProfile::default(),
        )
    }

    #[test]
    fn tier_sizes_follow_thirds_arithmetic() {
        for n in 0..=10usize {
            let players: Vec<_> = (0..n).map(|i| player(&format!("P{i}"), i as f64)).collect();
            let tiers = stratify(players);
            let third = n / 3;
            assert_eq!(tiers[0].1.len(), third, "high size for n={n}");
            assert_eq!(tiers[1].1.len(), third, "mid size for n={n}");
            assert_eq!(tiers[2].1.len(), n - 2 * third, "low size for n={n}");
        }
    }

    #[test]
    fn single_player_lands_in_low() {
        let tiers = stratify(vec![player("Solo", 50.0)]);
        assert!(tiers[0].1.is_empty());
        assert!(tiers[1].1.is_empty());
        assert_eq!(tiers[2].1.len(), 1);
        assert_eq!(tiers[2].1[0].tier, Some(ValueTier::Low));
    }

    #[test]
    fn value_ties_order_by_name() {
        let tiers = stratify(vec![
            player("Zed", 10.0),
            player("Abe", 10.0),
            player("Mia", 10.0),
        ]);
        let names: Vec<_> = tiers
            .iter()
            .flat_map(|(_, m)| m.iter().map(|p| p.record.name.clone()))
            .collect();
        assert_eq!(names, ["Abe", "Mia", "Zed"]);
    }
}
