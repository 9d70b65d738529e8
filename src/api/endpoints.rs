// Route builders for the summoner-scout backend API.

pub fn puuid(base: &str, game_name: &str, tag_line: &str) -> String {
    format!("{base}/get-puuid?game_name={game_name}&tag_line={tag_line}")
}

pub fn matches(base: &str, game_name: &str, tag_line: &str, count: usize) -> String {
    format!("{base}/get-matches?game_name={game_name}&tag_line={tag_line}&match_count={count}")
}

pub fn match_summary(base: &str, match_id: &str, puuid: &str) -> String {
    format!("{base}/get-match-summary?match_id={match_id}&puuid={puuid}")
}
