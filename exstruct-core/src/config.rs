//! Environment-sourced extractor configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// Default OpenAI API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model for structured extraction.
pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";

/// Output format for log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per record.
    Json,
    /// Human-readable console output.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(ExtractError::configuration(format!(
                "invalid LOG_FORMAT `{other}`, expected `json` or `pretty`"
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Configuration for the extractor and its collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// API key for authentication.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Model used for extraction calls.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Total provider attempts per extraction.
    pub max_retries: u32,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Calls admitted per rate-limit interval.
    pub rate_limit_calls: u32,
    /// Rate-limit interval in seconds.
    pub rate_limit_interval_seconds: u64,
    /// Wait for admission instead of failing immediately.
    pub rate_limit_wait: bool,
    /// Upper bound on admission waiting, in seconds.
    pub rate_limit_max_wait_seconds: u64,
    /// Response cache capacity; 0 disables caching.
    pub cache_capacity: usize,
    /// Log filter directive (e.g. `info`, `debug`).
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl ExtractorConfig {
    /// Create a config with the given API key and defaults for everything else.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: 3,
            timeout_seconds: 30,
            rate_limit_calls: 60,
            rate_limit_interval_seconds: 60,
            rate_limit_wait: true,
            rate_limit_max_wait_seconds: 30,
            cache_capacity: 128,
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
        }
    }

    /// Load configuration from the environment.
    ///
    /// Reads a `.env` file if one is present. `OPENAI_API_KEY` is required;
    /// every other variable falls back to its default.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ExtractError::configuration("OPENAI_API_KEY environment variable not set")
        })?;

        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.model = model;
        }
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        config.max_retries = env_parse("MAX_RETRIES", config.max_retries)?;
        config.timeout_seconds = env_parse("TIMEOUT_SECONDS", config.timeout_seconds)?;
        config.rate_limit_calls = env_parse("RATE_LIMIT_CALLS", config.rate_limit_calls)?;
        config.rate_limit_interval_seconds = env_parse(
            "RATE_LIMIT_INTERVAL_SECONDS",
            config.rate_limit_interval_seconds,
        )?;
        config.rate_limit_wait = env_bool("RATE_LIMIT_WAIT", config.rate_limit_wait)?;
        config.rate_limit_max_wait_seconds = env_parse(
            "RATE_LIMIT_MAX_WAIT_SECONDS",
            config.rate_limit_max_wait_seconds,
        )?;
        config.cache_capacity = env_parse("CACHE_CAPACITY", config.cache_capacity)?;
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.log_level = level.to_ascii_lowercase();
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            config.log_format = format.parse()?;
        }

        Ok(config)
    }

    /// Set the model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base URL.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the provider attempt budget.
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Set the rate-limit window (calls per interval).
    #[must_use]
    pub fn rate_limit(mut self, calls: u32, interval_seconds: u64) -> Self {
        self.rate_limit_calls = calls;
        self.rate_limit_interval_seconds = interval_seconds;
        self
    }

    /// Fail immediately on rate-limit rejection instead of waiting.
    #[must_use]
    pub fn fail_fast(mut self) -> Self {
        self.rate_limit_wait = false;
        self
    }

    /// Set the response cache capacity (0 disables caching).
    #[must_use]
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Admission wait bound as a [`Duration`].
    #[must_use]
    pub fn rate_limit_max_wait(&self) -> Duration {
        Duration::from_secs(self.rate_limit_max_wait_seconds)
    }

    /// Validate settings that have to hold before any call is made.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ExtractError::configuration("API key must not be empty"));
        }
        if self.max_retries == 0 {
            return Err(ExtractError::configuration(
                "MAX_RETRIES must be at least 1",
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(ExtractError::configuration(
                "TIMEOUT_SECONDS must be at least 1",
            ));
        }
        if self.rate_limit_calls == 0 || self.rate_limit_interval_seconds == 0 {
            return Err(ExtractError::configuration(
                "rate limit window must admit at least one call",
            ));
        }
        Ok(())
    }
}

fn env_parse<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw.parse().map_err(|err| {
            ExtractError::configuration(format!("invalid {name} `{raw}`: {err}"))
        }),
        Err(_) => Ok(default),
    }
}

fn env_bool(name: &str, default: bool) -> Result<bool> {
    match std::env::var(name) {
        Ok(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            other => Err(ExtractError::configuration(format!(
                "invalid {name} `{other}`, expected a boolean"
            ))),
        },
        Err(_) => Ok(default),
    }
}
