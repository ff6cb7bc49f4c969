use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::router::Method;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub firebase_api_key: String,
    /// Unset means documents live in process memory.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub gemini_base_url: String,
    pub identity_base_url: String,
    pub get_timeout_ms: u64,
    pub post_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            firebase_api_key: require_env("FIREBASE_API_KEY")?,
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| crate::llm_client::DEFAULT_BASE_URL.to_string()),
            identity_base_url: std::env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| crate::identity::firebase::DEFAULT_BASE_URL.to_string()),
            get_timeout_ms: parse_env("GET_TIMEOUT_MS", 15_000)
                .context("GET_TIMEOUT_MS must be a number of milliseconds")?,
            post_timeout_ms: parse_env("POST_TIMEOUT_MS", 60_000)
                .context("POST_TIMEOUT_MS must be a number of milliseconds")?,
        })
    }

    /// How long the HTTP surface waits on the router before giving up.
    pub fn timeout_for(&self, method: Method) -> Duration {
        match method {
            Method::Get => Duration::from_millis(self.get_timeout_ms),
            Method::Post => Duration::from_millis(self.post_timeout_ms),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => Ok(raw.trim().parse::<T>()?),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        gemini_api_key: "test-gemini-key".to_string(),
        firebase_api_key: "test-firebase-key".to_string(),
        database_url: None,
        port: 0,
        rust_log: "debug".to_string(),
        gemini_base_url: "http://127.0.0.1:9".to_string(),
        identity_base_url: "http://127.0.0.1:9".to_string(),
        get_timeout_ms: 15_000,
        post_timeout_ms: 60_000,
    }
}
