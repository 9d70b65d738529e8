//! Tab-separated export of the averaged champion stats.

use super::aggregator::ChampionAverages;

const HEADER: [&str; 11] = [
    "Champion",
    "Avg K",
    "Avg D",
    "Avg A",
    "Avg KDA Ratio",
    "Avg Dégâts",
    "Avg % Dégâts",
    "Avg Golds",
    "Avg % Golds",
    "Avg CS",
    "Avg CS/min",
];

/// Renders the averages as a tab-separated, newline-delimited table ready
/// to paste into a spreadsheet.
pub fn stats_table(rows: &[ChampionAverages]) -> String {
    let mut out = HEADER.join("\t");
    for row in rows {
        out.push('\n');
        out.push_str(&format!(
            "{}\t{:.1}\t{:.1}\t{:.1}\t{:.2}\t{:.1}\t{:.1}\t{:.1}\t{:.1}\t{:.1}\t{:.1}",
            row.champion,
            row.kills,
            row.deaths,
            row.assists,
            row.kda_ratio,
            row.damage,
            row.damage_pct,
            row.gold,
            row.gold_pct,
            row.cs,
            row.cs_per_minute,
        ));
    }
    out
}
