use crate::api::models::MatchSummary;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Cached state for one searched player.
///
/// Summaries are fetched once per match id and kept for the whole viewing
/// session; the on-disk copy lets a re-run for the same player skip fetches
/// for matches it already knows. Display order and the hidden set are
/// per-run state and are not persisted.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchSession {
    pub player: String,
    pub last_updated: DateTime<Utc>,
    summaries: HashMap<String, MatchSummary>,
    #[serde(skip)]
    display_order: Vec<String>,
    #[serde(skip)]
    hidden: HashSet<String>,
}

impl SearchSession {
    pub fn new(player: &str) -> Self {
        SearchSession {
            player: player.to_string(),
            last_updated: Utc::now(),
            summaries: HashMap::new(),
            display_order: Vec::new(),
            hidden: HashSet::new(),
        }
    }

    pub fn cache_path(player: &str) -> PathBuf {
        let cache_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".summoner_scout");

        let _ = fs::create_dir_all(&cache_dir);

        cache_dir.join(format!("{}.json", player.replace("#", "_")))
    }

    /// Loads the cached session for `player`, falling back to a fresh one
    /// when no cache exists or the file cannot be parsed.
    pub fn load(player: &str) -> Self {
        let path = Self::cache_path(player);

        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(session) => session,
                Err(e) => {
                    warn!(player, error = %e, "discarding unreadable session cache");
                    SearchSession::new(player)
                }
            },
            Err(_) => SearchSession::new(player),
        }
    }

    pub fn save(&self) -> Result<(), AppError> {
        let path = Self::cache_path(&self.player);
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            AppError::CacheError(format!("Failed to serialize session: {}", e))
        })?;

        fs::write(&path, json).map_err(|e| {
            AppError::CacheError(format!("Failed to write session: {}", e))
        })?;

        Ok(())
    }

    /// Sets the ids to display, in order. Ids fetched this run that are not
    /// listed here stay cached but invisible.
    pub fn set_display_order(&mut self, match_ids: &[String]) {
        self.display_order = match_ids.to_vec();
    }

    pub fn insert(&mut self, match_id: &str, summary: MatchSummary) {
        self.summaries.insert(match_id.to_string(), summary);
        self.last_updated = Utc::now();
    }

    pub fn contains(&self, match_id: &str) -> bool {
        self.summaries.contains_key(match_id)
    }

    pub fn summary(&self, match_id: &str) -> Option<&MatchSummary> {
        self.summaries.get(match_id)
    }

    pub fn hide(&mut self, match_id: &str) {
        self.hidden.insert(match_id.to_string());
    }

    /// Displayed ids minus hidden ones, in display order. A visible id may
    /// have no cached summary (a fetch failed); callers handle that case.
    pub fn visible_ids(&self) -> Vec<String> {
        self.display_order
            .iter()
            .filter(|id| !self.hidden.contains(*id))
            .cloned()
            .collect()
    }

    pub fn cached_count(&self) -> usize {
        self.summaries.len()
    }
}
