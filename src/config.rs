use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TICK_HZ: u64 = 30;
const DEFAULT_PLAYER_LIMIT: usize = 20;
const DEFAULT_SAMPLE_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub http_timeout_secs: u64,
    pub tick_hz: u64,
    pub player_limit: usize,
    pub sample_dir: PathBuf,
}

impl AppConfig {
    /// Loads `.env.local` then `.env` (neither overrides the real environment)
    /// and reads settings from the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let opt = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = opt("API_FOOTBALL_KEY");
        let base_url = opt("API_FOOTBALL_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let http_timeout_secs = opt("HTTP_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, 120);
        let tick_hz = opt("SORT_TICK_HZ")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TICK_HZ)
            .clamp(1, 240);
        let player_limit = opt("PLAYER_LIMIT")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_PLAYER_LIMIT)
            .clamp(1, 200);
        let sample_dir = opt("SAMPLE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAMPLE_DIR));

        Self {
            api_key,
            base_url,
            http_timeout_secs,
            tick_hz,
            player_limit,
            sample_dir,
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(1000 / self.tick_hz)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
