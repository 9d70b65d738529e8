use crate::error::AppError;
use std::env;

const DEFAULT_API_BASE_URL: &str = "https://summoner-scout.onrender.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_base_url =
            env::var("SCOUT_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        if api_base_url.trim().is_empty() {
            return Err(AppError::ConfigError(
                "SCOUT_API_URL must not be empty".to_string(),
            ));
        }

        // Trailing slashes would double up in the route builders
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        Ok(Config { api_base_url })
    }
}
