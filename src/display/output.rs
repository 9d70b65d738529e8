use crate::analysis::aggregator::{
    champion_display_name, cs_per_minute, normalize_pseudo, searched_entry, team_totals,
    ChampionAverages,
};
use crate::api::models::{MatchSummary, Side, Team};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "#")]
    number: String,
    date: String,
    result: String,
    champion: String,
    #[tabled(rename = "KDA")]
    kda: String,
    #[tabled(rename = "CS/min")]
    cs_per_min: String,
    #[tabled(rename = "DMG %")]
    damage_share: String,
    #[tabled(rename = "Gold %")]
    gold_share: String,
}

#[derive(Tabled)]
struct ChampionRow {
    position: String,
    player: String,
    champion: String,
    #[tabled(rename = "KDA")]
    kda: String,
    damage: String,
    gold: String,
    #[tabled(rename = "CS")]
    cs: String,
    #[tabled(rename = "Lvl")]
    level: String,
}

#[derive(Tabled)]
struct StatsRow {
    champion: String,
    games: String,
    #[tabled(rename = "Avg K")]
    kills: String,
    #[tabled(rename = "Avg D")]
    deaths: String,
    #[tabled(rename = "Avg A")]
    assists: String,
    #[tabled(rename = "KDA Ratio")]
    kda_ratio: String,
    #[tabled(rename = "Avg DMG")]
    damage: String,
    #[tabled(rename = "DMG %")]
    damage_pct: String,
    #[tabled(rename = "Avg Gold")]
    gold: String,
    #[tabled(rename = "Gold %")]
    gold_pct: String,
    #[tabled(rename = "Avg CS")]
    cs: String,
    #[tabled(rename = "CS/min")]
    cs_per_min: String,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

fn side_color(side: Side, text: &str) -> ColoredString {
    match side {
        Side::Blue => text.blue(),
        Side::Red => text.red(),
        Side::Unknown => text.normal(),
    }
}

/// Overview table of the visible matches, one row per match from the
/// searched player's point of view. Percentages are rounded here, never in
/// the aggregator. A match with no cached summary renders a placeholder row.
pub fn display_match_history(player: &str, matches: &[(String, Option<&MatchSummary>)]) {
    let resolved: Vec<&MatchSummary> = matches.iter().filter_map(|(_, s)| *s).collect();
    let wins = resolved.iter().filter(|s| s.searched_player_won()).count();
    let losses = resolved.len().saturating_sub(wins);

    println!(
        "\n{}",
        format!("📊 MATCH HISTORY for {} ({} matches)", player, matches.len())
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(80).cyan());
    if !resolved.is_empty() {
        let win_rate = (wins as f64 / resolved.len() as f64) * 100.0;
        println!(
            "{} {} W / {} L ({:.1}% WR)\n",
            "📈 Overall:".bold(),
            wins.to_string().green(),
            losses.to_string().red(),
            win_rate
        );
    }

    let mut rows = vec![];
    for (idx, (match_id, summary)) in matches.iter().enumerate() {
        let number = format!("{}", idx + 1);
        let row = match summary {
            Some(summary) => {
                let result = if summary.searched_player_won() {
                    "WIN".green().to_string()
                } else {
                    "LOSS".red().to_string()
                };
                match searched_entry(summary) {
                    Some(entry) => {
                        let (total_damage, total_gold) = team_totals(summary);
                        let cs_min =
                            cs_per_minute(entry.cs, summary.match_info.duration_seconds);
                        MatchRow {
                            number,
                            date: summary.match_info.date.clone(),
                            result,
                            champion: champion_display_name(entry),
                            kda: entry.kda.clone(),
                            cs_per_min: format!("{:.1}", cs_min),
                            damage_share: format!(
                                "{:.0}%",
                                100.0 * entry.damage as f64 / total_damage as f64
                            ),
                            gold_share: format!(
                                "{:.0}%",
                                100.0 * entry.gold as f64 / total_gold as f64
                            ),
                        }
                    }
                    None => MatchRow {
                        number,
                        date: summary.match_info.date.clone(),
                        result,
                        champion: "?".to_string(),
                        kda: "-".to_string(),
                        cs_per_min: "-".to_string(),
                        damage_share: "-".to_string(),
                        gold_share: "-".to_string(),
                    },
                }
            }
            None => MatchRow {
                number,
                date: "-".to_string(),
                result: format!("{} (no data)", match_id).yellow().to_string(),
                champion: "-".to_string(),
                kda: "-".to_string(),
                cs_per_min: "-".to_string(),
                damage_share: "-".to_string(),
                gold_share: "-".to_string(),
            },
        };
        rows.push(row);
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

/// Full card for one match: both teams with bans and per-champion lines,
/// the CLI version of the "show more" expansion.
pub fn display_match_card(number: usize, match_id: &str, summary: &MatchSummary) {
    let result = if summary.searched_player_won() {
        "WIN".green().bold()
    } else {
        "LOSS".red().bold()
    };
    println!(
        "\n{} {} — {} — {}",
        format!("Match #{}", number).bold().cyan(),
        match_id,
        summary.match_info.date,
        result
    );

    display_team("Player Team", &summary.player_team, summary);
    display_team("Enemy Team", &summary.enemy_team, summary);
}

fn display_team(heading: &str, team: &Team, summary: &MatchSummary) {
    let title = format!("{} ({} side)", heading, team.side.label());
    println!("{}", side_color(team.side, &title).bold());

    if !team.bans.is_empty() {
        let bans: Vec<&str> = team.bans.iter().map(|b| b.name.as_str()).collect();
        println!("  Bans: {}", bans.join(", "));
    }

    let searched = summary
        .searched_player
        .as_ref()
        .map(|p| normalize_pseudo(&p.pseudo))
        .unwrap_or_default();

    let (total_damage, total_gold) = team_totals(summary);
    let mut champions: Vec<_> = team.champions.iter().collect();
    champions.sort_by_key(|entry| entry.position.sort_key());

    let mut rows = vec![];
    for entry in champions {
        let is_searched = !searched.is_empty() && normalize_pseudo(&entry.pseudo) == searched;
        let player = if is_searched {
            format!("▶ {}", entry.pseudo).bold().to_string()
        } else {
            entry.pseudo.clone()
        };
        rows.push(ChampionRow {
            position: entry.position.label().to_string(),
            player,
            champion: champion_display_name(entry),
            kda: entry.kda.clone(),
            damage: format!(
                "{} ({:.0}%)",
                entry.damage,
                100.0 * entry.damage as f64 / total_damage as f64
            ),
            gold: format!(
                "{} ({:.0}%)",
                entry.gold,
                100.0 * entry.gold as f64 / total_gold as f64
            ),
            cs: format!("{}", entry.cs),
            level: format!("{}", entry.level),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

/// Averaged per-champion stats, shown alongside the clipboard export.
pub fn display_champion_stats(averages: &[ChampionAverages]) {
    println!("\n{}", "🏆 PER-CHAMPION AVERAGES".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    let mut rows = vec![];
    for avg in averages {
        rows.push(StatsRow {
            champion: avg.champion.clone(),
            games: format!("{}", avg.matches),
            kills: format!("{:.1}", avg.kills),
            deaths: format!("{:.1}", avg.deaths),
            assists: format!("{:.1}", avg.assists),
            kda_ratio: format!("{:.2}", avg.kda_ratio),
            damage: format!("{:.1}", avg.damage),
            damage_pct: format!("{:.1}%", avg.damage_pct),
            gold: format!("{:.1}", avg.gold),
            gold_pct: format!("{:.1}%", avg.gold_pct),
            cs: format!("{:.1}", avg.cs),
            cs_per_min: format!("{:.1}", avg.cs_per_minute),
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}
