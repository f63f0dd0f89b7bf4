use std::env;

/// Application-level constants
pub const APP_NAME: &str = "clinsight";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
/// How many characters of a malformed completion are echoed in diagnostics.
pub const DEFAULT_RAW_SNIPPET_LIMIT: usize = 500;
pub const DEFAULT_PORT: u16 = 5001;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Completion service credential. `None` means the service cannot be
    /// initialized and startup fails with `ServiceUnavailable`.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub raw_snippet_limit: usize,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// `GOOGLE_API_KEY` carries the credential; everything else is optional
    /// with `CLINSIGHT_`-prefixed overrides.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("GOOGLE_API_KEY").ok().filter(|key| !key.is_empty()),
            model: env_or("CLINSIGHT_MODEL", DEFAULT_MODEL),
            base_url: env::var("CLINSIGHT_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout_secs: env_parse("CLINSIGHT_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            raw_snippet_limit: env_parse("CLINSIGHT_RAW_SNIPPET_LIMIT", DEFAULT_RAW_SNIPPET_LIMIT),
            port: env_parse("CLINSIGHT_PORT", DEFAULT_PORT),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            raw_snippet_limit: DEFAULT_RAW_SNIPPET_LIMIT,
            port: DEFAULT_PORT,
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
