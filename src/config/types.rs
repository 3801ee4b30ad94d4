use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Direct API key. Takes precedence over `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is not set.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Bare model ID (e.g. "gemini-2.5-flash").
    #[serde(default = "default_model")]
    pub model: String,
    /// Scheme + host of the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in seconds (default: 60).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Connection timeout in seconds (default: 10).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Optional cap on generated tokens.
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
}

/// Settings for image acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Ask for consent before opening the file picker (default: true).
    #[serde(default = "default_require_consent")]
    pub require_consent: bool,
    /// Directory the file picker opens in.
    #[serde(default)]
    pub start_dir: Option<PathBuf>,
    /// Longest edge of the uploaded image in pixels (default: 2048).
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event loop tick in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// How many ticks a notice stays on screen (default: 8).
    #[serde(default = "default_notice_ticks")]
    pub notice_ticks: u16,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log file path. Defaults to the platform data directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_require_consent() -> bool {
    true
}

fn default_max_dimension() -> u32 {
    2048
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_notice_ticks() -> u16 {
    8
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            max_output_tokens: None,
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            require_consent: default_require_consent(),
            start_dir: None,
            max_dimension: default_max_dimension(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            notice_ticks: default_notice_ticks(),
        }
    }
}

impl GeminiConfig {
    /// Resolve the API key: the inline value first, then the environment.
    ///
    /// Blank values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Same as [`resolve_api_key`](Self::resolve_api_key) with an injectable
    /// environment lookup.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let inline = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);
        inline.or_else(|| {
            lookup(&self.api_key_env)
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty())
        })
    }
}
