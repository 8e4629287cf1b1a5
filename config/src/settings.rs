//! Typed recommender settings read from the (already loaded) environment.

use std::time::Duration;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";

/// Everything the binary needs to build pipelines and the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecommenderEnv {
    /// `MISTRAL_API_KEY`; blank counts as unset.
    pub api_key: Option<String>,
    /// `RECOMMENDER_DEBUG == "1"`: attach raw provider responses to empty-response errors.
    pub debug_raw: bool,
    /// `MISTRAL_BASE_URL`; `None` keeps the transport's default endpoint.
    pub base_url: Option<String>,
    /// `MISTRAL_TIMEOUT_SECS` (positive integer); `None` keeps the transport default.
    pub request_timeout: Option<Duration>,
    /// `RIGSMITH_ADDR`, else `0.0.0.0:$PORT`, else [`DEFAULT_LISTEN_ADDR`].
    pub listen_addr: String,
}

impl RecommenderEnv {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup. Invalid optional values fall back to defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let listen_addr = non_blank("RIGSMITH_ADDR")
            .or_else(|| {
                non_blank("PORT")
                    .and_then(|p| p.parse::<u16>().ok())
                    .map(|port| format!("0.0.0.0:{}", port))
            })
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

        Self {
            api_key: non_blank("MISTRAL_API_KEY"),
            debug_raw: get("RECOMMENDER_DEBUG").as_deref() == Some("1"),
            base_url: non_blank("MISTRAL_BASE_URL"),
            request_timeout: non_blank("MISTRAL_TIMEOUT_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            listen_addr,
        }
    }
}
