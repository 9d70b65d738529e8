mod analysis;
mod api;
mod clipboard;
mod config;
mod display;
mod error;
mod session;

use analysis::aggregator::ChampionStatsAggregator;
use analysis::export;
use anyhow::Context;
use api::client::ScoutApiClient;
use clap::Parser;
use config::Config;
use display::output::{
    display_champion_stats, display_error, display_info, display_match_card,
    display_match_history, display_success, display_warning,
};
use error::AppError;
use indicatif::ProgressBar;
use session::SearchSession;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Summoner Scout")]
#[command(about = "Browse match history and export per-champion averages", long_about = None)]
struct Args {
    /// Riot Game Name
    game_name: String,

    /// Riot Tag (tag line)
    tag_line: String,

    /// Number of matches to fetch (max: 100)
    #[arg(short, long, default_value = "20")]
    matches: usize,

    /// Show the full team breakdown for every match
    #[arg(short, long)]
    detailed: bool,

    /// Hide matches from display and export (1-based positions, comma-separated)
    #[arg(long, value_delimiter = ',')]
    hide: Vec<usize>,

    /// Aggregate per-champion averages over the visible matches and copy
    /// them to the clipboard as a tab-separated table
    #[arg(long)]
    copy_stats: bool,

    /// Ignore cached match summaries and refetch everything
    #[arg(long)]
    refresh: bool,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("summoner_scout=warn")),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(args) {
        display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let player_key = format!("{}#{}", args.game_name, args.tag_line);

    display_info(&format!(
        "Fetching data for {} from {}",
        player_key, config.api_base_url
    ));

    let client = ScoutApiClient::new(config);

    // Step 1: Resolve the player's PUUID
    display_info("Step 1: Resolving PUUID...");
    let puuid = client.get_puuid(&args.game_name, &args.tag_line)?;
    display_success(&format!("Found PUUID: {}", &puuid[0..puuid.len().min(8)]));

    // Step 2: Fetch the match id list
    display_info("Step 2: Fetching match list...");
    let match_count = args.matches.min(100);
    let match_ids = client.get_matches(&args.game_name, &args.tag_line, match_count)?;
    if match_ids.is_empty() {
        return Err(AppError::NoMatchesFound.into());
    }
    display_success(&format!("Found {} matches", match_ids.len()));

    // Step 3: Fetch summaries, reusing the per-player cache
    let mut session = if args.refresh {
        SearchSession::new(&player_key)
    } else {
        SearchSession::load(&player_key)
    };
    session.set_display_order(&match_ids);

    let cached_before = match_ids.iter().filter(|id| session.contains(id)).count();
    if cached_before > 0 {
        display_success(&format!("⚡ {} summaries already cached", cached_before));
    }

    let pb = ProgressBar::new(match_ids.len() as u64);
    pb.set_message("Fetching match summaries");
    for match_id in &match_ids {
        if !session.contains(match_id) {
            match client.get_match_summary(match_id, &puuid) {
                Ok(summary) => session.insert(match_id, summary),
                // A missing summary is a per-match problem, keep going
                Err(e) => warn!(%match_id, error = %e, "failed to fetch match summary"),
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("✓ Match summaries fetched");

    if let Err(e) = session.save() {
        warn!(error = %e, "could not persist the session cache");
    }

    // Step 4: Apply --hide before rendering or exporting
    for position in &args.hide {
        match position.checked_sub(1).and_then(|i| match_ids.get(i)) {
            Some(match_id) => session.hide(match_id),
            None => display_warning(&format!(
                "--hide {}: no such match (1..{})",
                position,
                match_ids.len()
            )),
        }
    }

    let visible = session.visible_ids();
    if visible.is_empty() {
        display_warning("No visible matches to display.");
        return Ok(());
    }

    // Step 5: Render
    let rows: Vec<(String, Option<&api::models::MatchSummary>)> = visible
        .iter()
        .map(|id| (id.clone(), session.summary(id)))
        .collect();
    display_match_history(&player_key, &rows);

    if args.detailed {
        for (idx, (match_id, summary)) in rows.iter().enumerate() {
            if let Some(summary) = summary {
                display_match_card(idx + 1, match_id, summary);
            }
        }
    }

    // Step 6: Optional clipboard export
    if args.copy_stats {
        export_stats(&session).context("stats export failed")?;
    }

    Ok(())
}

/// Aggregates the visible matches and copies the averaged stats to the
/// clipboard. Clipboard failure is reported but does not fail the run.
fn export_stats(session: &SearchSession) -> anyhow::Result<()> {
    let visible = session.visible_ids();
    if visible.is_empty() {
        display_warning("Nothing to export: no visible matches.");
        return Ok(());
    }

    let mut aggregator = ChampionStatsAggregator::new();
    for match_id in &visible {
        match session.summary(match_id) {
            Some(summary) => {
                aggregator.record_match(match_id, summary);
            }
            None => warn!(%match_id, "no cached summary for visible match, skipping"),
        }
    }

    if aggregator.is_empty() {
        display_warning("No champion stats could be aggregated from the visible matches.");
        return Ok(());
    }

    let averages = aggregator.averages();
    display_champion_stats(&averages);

    let table = export::stats_table(&averages);
    match clipboard::copy_text(&table) {
        Ok(()) => display_success(&format!(
            "Copied averaged stats for {} champions to the clipboard",
            averages.len()
        )),
        Err(e) => display_error(&format!("Could not copy stats to the clipboard: {}", e)),
    }

    Ok(())
}
