//! Backend configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! The base URL is resolved once at startup. A missing or blank value is a
//! hard error so the shell never issues requests against an empty base.
//! Parsing goes through a lookup closure so tests can supply values without
//! touching the process environment.

use std::time::Duration;

use reqwest::Url;

use crate::error::ErrorCode;

pub const API_URL_ENV: &str = "STUDYMATE_API_URL";
pub const API_TIMEOUT_ENV: &str = "STUDYMATE_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing backend URL: set {var} to the StudyMate API base URL")]
    MissingApiUrl { var: &'static str },

    #[error("invalid backend URL '{value}': {reason}")]
    InvalidApiUrl { value: String, reason: String },

    #[error("invalid {var} '{value}': expected a positive whole number of seconds")]
    InvalidTimeout { var: &'static str, value: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingApiUrl { .. } => "E_CONFIG_MISSING_API_URL",
            Self::InvalidApiUrl { .. } => "E_CONFIG_INVALID_API_URL",
            Self::InvalidTimeout { .. } => "E_CONFIG_INVALID_TIMEOUT",
        }
    }
}

/// Typed settings for the backend HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL, normalized to end with `/` so relative endpoints join under it.
    pub base_url: Url,
    /// Whole-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    /// Build config from an explicit base URL with no timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is blank, unparsable, or not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { base_url: parse_base_url(base_url)?, timeout: None })
    }

    /// Build config from environment variables.
    ///
    /// Required:
    /// - `STUDYMATE_API_URL`
    ///
    /// Optional:
    /// - `STUDYMATE_API_TIMEOUT_SECS`: no timeout when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is missing or invalid, or the timeout is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ApiConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup(API_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingApiUrl { var: API_URL_ENV })?;
        let base_url = parse_base_url(&raw_url)?;
        let timeout = match lookup(API_TIMEOUT_ENV) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };
        Ok(Self { base_url, timeout })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingApiUrl { var: API_URL_ENV });
    }
    let mut url = Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidApiUrl { value: trimmed.to_owned(), reason: e.to_string() })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidApiUrl {
            value: trimmed.to_owned(),
            reason: format!("unsupported scheme '{}' (expected http or https)", url.scheme()),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout { var: API_TIMEOUT_ENV, value: raw.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
