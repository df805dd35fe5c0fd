// region:    --- Imports
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};
// endregion: --- Imports

pub const DEFAULT_API_BASE: &str = "https://v2.api.noroff.dev";
pub const DEFAULT_SESSION_FILE: &str = ".auction-session.json";
pub const DEFAULT_FEED_PAGE_SIZE: u32 = 12;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

// region:    --- Config
/// 클라이언트 설정 (환경 변수 기반)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub api_key: Option<String>,
    pub session_file: PathBuf,
    pub feed_page_size: u32,
    pub search_debounce: Duration,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            feed_page_size: DEFAULT_FEED_PAGE_SIZE,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            http_timeout: Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS),
        }
    }
}

impl Config {
    /// 환경 변수에서 설정 로드 (.env 는 main 에서 먼저 읽음)
    pub fn load() -> Self {
        let api_base = env::var("AUCTION_API_BASE")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        let api_key = env::var("AUCTION_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let session_file = env::var("AUCTION_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_file());

        let feed_page_size = try_load("AUCTION_FEED_PAGE_SIZE", DEFAULT_FEED_PAGE_SIZE);
        let debounce_ms = try_load("AUCTION_SEARCH_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE_MS);
        let timeout_ms = try_load("AUCTION_HTTP_TIMEOUT_MS", DEFAULT_HTTP_TIMEOUT_MS);

        info!(
            "{:<12} --> 설정 로드 완료: api_base={}, api_key={}",
            "Config",
            api_base,
            api_key.is_some()
        );

        Self {
            api_base,
            api_key,
            session_file,
            feed_page_size: feed_page_size.max(1),
            search_debounce: Duration::from_millis(debounce_ms),
            http_timeout: Duration::from_millis(timeout_ms),
        }
    }
}

fn default_session_file() -> PathBuf {
    match env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(DEFAULT_SESSION_FILE),
        Err(_) => PathBuf::from(DEFAULT_SESSION_FILE),
    }
}

/// 값이 없거나 잘못된 경우 기본값 사용
fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!(
                "{:<12} --> 잘못된 {} 값 ({}), 기본값 사용: {}",
                "Config", key, e, default
            );
            default
        }),
        Err(_) => default,
    }
}
// endregion: --- Config
