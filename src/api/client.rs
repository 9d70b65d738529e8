use crate::config::Config;
use crate::error::AppError;
use governor::{Quota, RateLimiter, state::{InMemoryState, NotKeyed}, clock::DefaultClock};
use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;
use tracing::warn;

use super::endpoints;
use super::models::*;

pub struct ScoutApiClient {
    config: Config,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl ScoutApiClient {
    pub fn new(config: Config) -> Self {
        // The backend proxies a rate-limited upstream API, stay under its budget
        let rate_limiter = RateLimiter::direct(Quota::per_second(NonZeroU32::new(10).unwrap()));
        ScoutApiClient {
            config,
            rate_limiter,
        }
    }

    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        while self.rate_limiter.check().is_err() {
            thread::sleep(Duration::from_millis(50));
        }

        let mut retry_count = 0;
        const MAX_RETRIES: u32 = 3;

        loop {
            let response = ureq::get(url)
                .set("User-Agent", "summoner_scout/0.1.0")
                .call();

            match response {
                Ok(resp) => {
                    return resp.into_string().map_err(|e| {
                        AppError::HttpError(e.to_string())
                    });
                }
                Err(ureq::Error::Status(429, _)) => {
                    // Rate limited - wait and retry
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    warn!(wait_ms, "rate limited by backend, retrying");
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(ureq::Error::Status(code, resp)) => {
                    let detail = resp.into_string().unwrap_or_default();
                    return Err(AppError::ApiError(format!("status {code}: {detail}")));
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }

    pub fn get_puuid(&self, game_name: &str, tag_line: &str) -> Result<String, AppError> {
        let url = endpoints::puuid(&self.config.api_base_url, game_name, tag_line);

        let body = self.execute_request(&url)?;
        let parsed: PuuidResponse = serde_json::from_str(&body).map_err(|_| {
            AppError::PlayerNotFound(format!("{}#{}", game_name, tag_line))
        })?;
        Ok(parsed.puuid)
    }

    pub fn get_matches(
        &self,
        game_name: &str,
        tag_line: &str,
        count: usize,
    ) -> Result<Vec<String>, AppError> {
        let url = endpoints::matches(&self.config.api_base_url, game_name, tag_line, count);

        let body = self.execute_request(&url)?;
        let parsed: MatchListResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::JsonError(e.to_string())
        })?;
        Ok(parsed.matches)
    }

    pub fn get_match_summary(&self, match_id: &str, puuid: &str) -> Result<MatchSummary, AppError> {
        let url = endpoints::match_summary(&self.config.api_base_url, match_id, puuid);

        let body = self.execute_request(&url)?;
        serde_json::from_str(&body).map_err(|e| {
            AppError::JsonError(e.to_string())
        })
    }
}
