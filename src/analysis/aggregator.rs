use std::collections::HashMap;
use tracing::warn;

use crate::api::models::{ChampionEntry, MatchSummary};

/// Running sums for one champion across the matches the searched player
/// played it in.
#[derive(Debug, Clone, Default)]
pub struct ChampionAggregate {
    pub matches: usize,
    pub kills: f64,
    pub deaths: f64,
    pub assists: f64,
    pub kda_ratio: f64,
    pub damage: f64,
    pub damage_pct: f64,
    pub gold: f64,
    pub gold_pct: f64,
    pub cs: f64,
    pub cs_per_minute: f64,
}

/// Per-champion arithmetic means, rounded for output: one decimal place
/// everywhere except the KDA ratio (two).
#[derive(Debug, Clone, PartialEq)]
pub struct ChampionAverages {
    pub champion: String,
    pub matches: usize,
    pub kills: f64,
    pub deaths: f64,
    pub assists: f64,
    pub kda_ratio: f64,
    pub damage: f64,
    pub damage_pct: f64,
    pub gold: f64,
    pub gold_pct: f64,
    pub cs: f64,
    pub cs_per_minute: f64,
}

/// Accumulates the searched player's per-match stats by champion.
///
/// Aggregation is best-effort over noisy backend data: a match that cannot
/// be resolved (no searched player, no matching entry, unparsable KDA) is
/// skipped with a warning and never aborts the run.
pub struct ChampionStatsAggregator {
    // First-encounter order; drives output row order
    order: Vec<String>,
    totals: HashMap<String, ChampionAggregate>,
}

impl ChampionStatsAggregator {
    pub fn new() -> Self {
        ChampionStatsAggregator {
            order: Vec::new(),
            totals: HashMap::new(),
        }
    }

    /// Folds one match into the per-champion totals. Returns false when the
    /// match was skipped.
    pub fn record_match(&mut self, match_id: &str, summary: &MatchSummary) -> bool {
        let Some(player) = searched_entry(summary) else {
            warn!(match_id, "no resolvable searched-player entry, skipping match");
            return false;
        };

        let Some((kills, deaths, assists)) = parse_kda(&player.kda) else {
            warn!(match_id, kda = %player.kda, "unparsable KDA, skipping match");
            return false;
        };

        let champion = champion_display_name(player);
        if champion.is_empty() {
            warn!(match_id, "entry has no champion name or image, skipping match");
            return false;
        }

        let (total_damage, total_gold) = team_totals(summary);
        let kda_ratio = (kills + assists) as f64 / deaths.max(1) as f64;
        let damage_pct = 100.0 * player.damage as f64 / total_damage as f64;
        let gold_pct = 100.0 * player.gold as f64 / total_gold as f64;
        let cs_min = cs_per_minute(player.cs, summary.match_info.duration_seconds);

        if !self.totals.contains_key(&champion) {
            self.order.push(champion.clone());
        }
        let agg = self.totals.entry(champion).or_default();
        agg.matches += 1;
        agg.kills += kills as f64;
        agg.deaths += deaths as f64;
        agg.assists += assists as f64;
        agg.kda_ratio += kda_ratio;
        agg.damage += player.damage as f64;
        agg.damage_pct += damage_pct;
        agg.gold += player.gold as f64;
        agg.gold_pct += gold_pct;
        agg.cs += player.cs as f64;
        agg.cs_per_minute += cs_min;

        true
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Means of every accumulated quantity, one row per champion in
    /// first-encounter order.
    pub fn averages(&self) -> Vec<ChampionAverages> {
        self.order
            .iter()
            .filter_map(|name| {
                let agg = self.totals.get(name)?;
                let n = agg.matches as f64;
                Some(ChampionAverages {
                    champion: name.clone(),
                    matches: agg.matches,
                    kills: round1(agg.kills / n),
                    deaths: round1(agg.deaths / n),
                    assists: round1(agg.assists / n),
                    kda_ratio: round2(agg.kda_ratio / n),
                    damage: round1(agg.damage / n),
                    damage_pct: round1(agg.damage_pct / n),
                    gold: round1(agg.gold / n),
                    gold_pct: round1(agg.gold_pct / n),
                    cs: round1(agg.cs / n),
                    cs_per_minute: round1(agg.cs_per_minute / n),
                })
            })
            .collect()
    }
}

impl Default for ChampionStatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn normalize_pseudo(pseudo: &str) -> String {
    pseudo.trim().to_lowercase()
}

/// Finds the searched player's entry in either team by normalized pseudo.
/// Exact match only, no fuzzy fallback.
pub fn searched_entry(summary: &MatchSummary) -> Option<&ChampionEntry> {
    let searched = summary.searched_player.as_ref()?;
    let wanted = normalize_pseudo(&searched.pseudo);
    if wanted.is_empty() {
        return None;
    }
    summary
        .combined_entries()
        .find(|entry| normalize_pseudo(&entry.pseudo) == wanted)
}

/// Damage and gold totals over both teams, floored at 1 so shares never
/// divide by zero.
pub fn team_totals(summary: &MatchSummary) -> (u64, u64) {
    let mut damage: u64 = 0;
    let mut gold: u64 = 0;
    for entry in summary.combined_entries() {
        damage += entry.damage;
        gold += entry.gold;
    }
    (damage.max(1), gold.max(1))
}

/// Parses a "K/D/A" string into its three components. Anything other than
/// exactly three slash-separated non-negative integers is rejected.
pub fn parse_kda(kda: &str) -> Option<(u32, u32, u32)> {
    let mut parts = kda.split('/');
    let kills = parts.next()?.trim().parse().ok()?;
    let deaths = parts.next()?.trim().parse().ok()?;
    let assists = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((kills, deaths, assists))
}

/// Champion display name, falling back to the portrait filename stem for
/// older summaries that only carry the image URL.
pub fn champion_display_name(entry: &ChampionEntry) -> String {
    let name = entry.champion_name.trim();
    if !name.is_empty() {
        return name.to_string();
    }
    let stem = entry.image.rsplit('/').next().unwrap_or("");
    stem.strip_suffix(".png").unwrap_or(stem).to_string()
}

pub fn cs_per_minute(cs: u32, duration_seconds: u32) -> f64 {
    if cs == 0 || duration_seconds == 0 {
        0.0
    } else {
        cs as f64 * 60.0 / duration_seconds as f64
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{MatchInfo, Position, SearchedPlayer, Side, Team};

    fn entry(pseudo: &str, champion: &str, kda: &str, damage: u64, gold: u64, cs: u32) -> ChampionEntry {
        ChampionEntry {
            pseudo: pseudo.to_string(),
            champion_name: champion.to_string(),
            image: format!("https://cdn.example/img/champion/{}.png", champion),
            kda: kda.to_string(),
            damage,
            gold,
            cs,
            level: 18,
            position: Position::Middle,
        }
    }

    fn summary(searched: Option<&str>, duration: u32, players: Vec<ChampionEntry>, enemies: Vec<ChampionEntry>) -> MatchSummary {
        MatchSummary {
            match_info: MatchInfo {
                date: "2025-03-01".to_string(),
                duration_seconds: duration,
                winning_side: Side::Blue,
            },
            player_team: Team {
                side: Side::Blue,
                bans: vec![],
                champions: players,
            },
            enemy_team: Team {
                side: Side::Red,
                bans: vec![],
                champions: enemies,
            },
            searched_player: searched.map(|p| SearchedPlayer {
                pseudo: p.to_string(),
            }),
        }
    }

    #[test]
    fn single_match_averages_equal_match_values() {
        let mut aggregator = ChampionStatsAggregator::new();
        let s = summary(
            Some("Faker#KR1"),
            1800,
            vec![entry("Faker#KR1", "Ahri", "10/2/5", 25000, 12000, 240)],
            vec![entry("Enemy#EU1", "Zed", "2/10/1", 75000, 38000, 180)],
        );
        assert!(aggregator.record_match("m1", &s));

        let rows = aggregator.averages();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.champion, "Ahri");
        assert_eq!(row.matches, 1);
        assert_eq!(row.kills, 10.0);
        assert_eq!(row.deaths, 2.0);
        assert_eq!(row.assists, 5.0);
        assert_eq!(row.kda_ratio, 7.5);
        assert_eq!(row.damage, 25000.0);
        assert_eq!(row.damage_pct, 25.0);
        assert_eq!(row.gold, 12000.0);
        assert_eq!(row.gold_pct, 24.0);
        assert_eq!(row.cs, 240.0);
        assert_eq!(row.cs_per_minute, 8.0);
    }

    #[test]
    fn identical_matches_average_to_the_same_values() {
        let mut aggregator = ChampionStatsAggregator::new();
        for i in 0..4 {
            let s = summary(
                Some("Faker#KR1"),
                1800,
                vec![entry("Faker#KR1", "Ahri", "10/2/5", 25000, 12000, 240)],
                vec![entry("Enemy#EU1", "Zed", "2/10/1", 75000, 38000, 180)],
            );
            assert!(aggregator.record_match(&format!("m{i}"), &s));
        }

        let rows = aggregator.averages();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.matches, 4);
        assert_eq!(row.kills, 10.0);
        assert_eq!(row.kda_ratio, 7.5);
        assert_eq!(row.damage_pct, 25.0);
        assert_eq!(row.cs_per_minute, 8.0);
    }

    #[test]
    fn zero_deaths_floor_at_one_for_ratio() {
        let mut aggregator = ChampionStatsAggregator::new();
        let s = summary(
            Some("Faker#KR1"),
            1800,
            vec![entry("Faker#KR1", "Ahri", "10/0/5", 1000, 1000, 100)],
            vec![],
        );
        aggregator.record_match("m1", &s);
        assert_eq!(aggregator.averages()[0].kda_ratio, 15.0);
    }

    #[test]
    fn shares_over_combined_list_sum_to_hundred() {
        let s = summary(
            None,
            1800,
            vec![
                entry("A#1", "Ahri", "1/1/1", 11111, 9001, 100),
                entry("B#1", "Zed", "1/1/1", 23456, 12345, 100),
            ],
            vec![
                entry("C#1", "Lux", "1/1/1", 31415, 8000, 100),
                entry("D#1", "Jinx", "1/1/1", 27182, 14000, 100),
            ],
        );
        let (total_damage, total_gold) = team_totals(&s);
        let damage_sum: f64 = s
            .combined_entries()
            .map(|e| 100.0 * e.damage as f64 / total_damage as f64)
            .sum();
        let gold_sum: f64 = s
            .combined_entries()
            .map(|e| 100.0 * e.gold as f64 / total_gold as f64)
            .sum();
        assert!((damage_sum - 100.0).abs() < 1e-9);
        assert!((gold_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn missing_searched_player_skips_without_aborting() {
        let mut aggregator = ChampionStatsAggregator::new();
        let m1 = summary(
            Some("Faker#KR1"),
            1800,
            vec![entry("Faker#KR1", "Ahri", "3/1/7", 1000, 1000, 100)],
            vec![],
        );
        let m2 = summary(
            None,
            1800,
            vec![entry("Faker#KR1", "Zed", "9/9/9", 1000, 1000, 100)],
            vec![],
        );
        let m3 = summary(
            Some("Faker#KR1"),
            1800,
            vec![entry("Faker#KR1", "Lux", "4/2/6", 1000, 1000, 100)],
            vec![],
        );

        assert!(aggregator.record_match("m1", &m1));
        assert!(!aggregator.record_match("m2", &m2));
        assert!(aggregator.record_match("m3", &m3));

        let champions: Vec<String> = aggregator
            .averages()
            .iter()
            .map(|r| r.champion.clone())
            .collect();
        assert_eq!(champions, vec!["Ahri", "Lux"]);
    }

    #[test]
    fn pseudo_match_is_trimmed_and_case_insensitive_only() {
        let mut aggregator = ChampionStatsAggregator::new();
        let s = summary(
            Some("  faker#kr1 "),
            1800,
            vec![entry("Faker#KR1", "Ahri", "1/1/1", 1000, 1000, 100)],
            vec![],
        );
        assert!(aggregator.record_match("m1", &s));

        // No fuzzy fallback: a near-miss pseudo is a skip
        let mut aggregator = ChampionStatsAggregator::new();
        let s = summary(
            Some("Faker#KR2"),
            1800,
            vec![entry("Faker#KR1", "Ahri", "1/1/1", 1000, 1000, 100)],
            vec![],
        );
        assert!(!aggregator.record_match("m1", &s));
    }

    #[test]
    fn malformed_kda_skips_the_match() {
        for bad in ["", "10/2", "10/2/5/3", "a/b/c", "10-2-5"] {
            let mut aggregator = ChampionStatsAggregator::new();
            let s = summary(
                Some("Faker#KR1"),
                1800,
                vec![entry("Faker#KR1", "Ahri", bad, 1000, 1000, 100)],
                vec![],
            );
            assert!(!aggregator.record_match("m1", &s), "kda {:?}", bad);
            assert!(aggregator.is_empty());
        }
    }

    #[test]
    fn champion_name_falls_back_to_image_stem() {
        let mut e = entry("Faker#KR1", "", "1/1/1", 0, 0, 0);
        e.image = "https://cdn.example/img/champion/MissFortune.png".to_string();
        assert_eq!(champion_display_name(&e), "MissFortune");

        e.image = "Ahri.png".to_string();
        assert_eq!(champion_display_name(&e), "Ahri");

        e.image = String::new();
        assert_eq!(champion_display_name(&e), "");
    }

    #[test]
    fn cs_per_minute_requires_both_fields() {
        assert_eq!(cs_per_minute(0, 1800), 0.0);
        assert_eq!(cs_per_minute(240, 0), 0.0);
        assert_eq!(cs_per_minute(240, 1800), 8.0);
    }

    #[test]
    fn output_rows_follow_first_encounter_order() {
        let mut aggregator = ChampionStatsAggregator::new();
        for (id, champion) in [("m1", "Zed"), ("m2", "Ahri"), ("m3", "Zed"), ("m4", "Lux")] {
            let s = summary(
                Some("Faker#KR1"),
                1800,
                vec![entry("Faker#KR1", champion, "1/1/1", 1000, 1000, 100)],
                vec![],
            );
            aggregator.record_match(id, &s);
        }

        let order: Vec<String> = aggregator.averages().iter().map(|r| r.champion.clone()).collect();
        assert_eq!(order, vec!["Zed", "Ahri", "Lux"]);
        assert_eq!(aggregator.averages()[0].matches, 2);
    }

    #[test]
    fn empty_aggregator_produces_no_rows() {
        let aggregator = ChampionStatsAggregator::new();
        assert!(aggregator.is_empty());
        assert!(aggregator.averages().is_empty());
    }

    #[test]
    fn ratio_mean_rounds_to_two_decimals() {
        let mut aggregator = ChampionStatsAggregator::new();
        let m1 = summary(
            Some("Faker#KR1"),
            1800,
            vec![entry("Faker#KR1", "Ahri", "1/3/0", 1000, 1000, 100)],
            vec![],
        );
        let m2 = summary(
            Some("Faker#KR1"),
            1800,
            vec![entry("Faker#KR1", "Ahri", "2/3/0", 1000, 1000, 100)],
            vec![],
        );
        aggregator.record_match("m1", &m1);
        aggregator.record_match("m2", &m2);

        // (1/3 + 2/3) / 2 = 0.5
        assert_eq!(aggregator.averages()[0].kda_ratio, 0.5);
        // kills mean 1.5 keeps one decimal
        assert_eq!(aggregator.averages()[0].kills, 1.5);
    }
}
