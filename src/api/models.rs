use serde::{Deserialize, Serialize};

// /get-puuid response
#[derive(Debug, Deserialize)]
pub struct PuuidResponse {
    pub puuid: String,
}

// /get-matches response
#[derive(Debug, Deserialize)]
pub struct MatchListResponse {
    pub matches: Vec<String>,
}

// /get-match-summary response
//
// Summaries are cached on disk per player, so they serialize too.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub match_info: MatchInfo,
    pub player_team: Team,
    pub enemy_team: Team,
    #[serde(default)]
    pub searched_player: Option<SearchedPlayer>,
}

impl MatchSummary {
    /// Both teams' entries in listing order, player team first.
    pub fn combined_entries(&self) -> impl Iterator<Item = &ChampionEntry> {
        self.player_team
            .champions
            .iter()
            .chain(self.enemy_team.champions.iter())
    }

    /// Whether the searched player's team took the win.
    pub fn searched_player_won(&self) -> bool {
        self.player_team.side == self.match_info.winning_side
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub duration_seconds: u32,
    pub winning_side: Side,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchedPlayer {
    #[serde(default)]
    pub pseudo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub side: Side,
    #[serde(default)]
    pub bans: Vec<Ban>,
    #[serde(default)]
    pub champions: Vec<ChampionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ban {
    pub name: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionEntry {
    /// Player identifier, format `name#tag`
    pub pseudo: String,
    #[serde(default)]
    pub champion_name: String,
    #[serde(default)]
    pub image: String,
    /// Raw "K/D/A" string as served by the backend
    #[serde(default)]
    pub kda: String,
    #[serde(default)]
    pub damage: u64,
    #[serde(default)]
    pub gold: u64,
    #[serde(default)]
    pub cs: u32,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub position: Position,
}

fn default_level() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Blue,
    Red,
    #[serde(other)]
    Unknown,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Blue => "Blue",
            Side::Red => "Red",
            Side::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    Jungle,
    Middle,
    Bottom,
    Utility,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Position {
    /// Lane order used when listing a team, unknown roles last.
    pub fn sort_key(&self) -> usize {
        match self {
            Position::Top => 0,
            Position::Jungle => 1,
            Position::Middle => 2,
            Position::Bottom => 3,
            Position::Utility => 4,
            Position::Unknown => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Position::Top => "Top",
            Position::Jungle => "Jungle",
            Position::Middle => "Middle",
            Position::Bottom => "Bottom",
            Position::Utility => "Utility",
            Position::Unknown => "?",
        }
    }
}
