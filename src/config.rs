//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://postumbonal-monatomic-cecelia.ngrok-free.dev";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SESSION_DIR: &str = ".borla";
pub const DEFAULT_SESSION_FILE: &str = "session.json";

/// Errors produced while building a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The base URL does not start with `http://` or `https://`.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A numeric setting could not be parsed.
    #[error("invalid value for {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// No session file was given and no home directory is known.
    #[error("cannot locate session file: set BORLA_SESSION_FILE or HOME")]
    NoSessionPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

impl Timeouts {
    /// # Errors
    ///
    /// Returns an error if a timeout variable is set but not a number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            request_secs: env_parse_u64("BORLA_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_u64("BORLA_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin every relative path is joined onto, without a trailing slash.
    pub base_url: String,
    pub session_file: PathBuf,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Build a config for `base_url` with default timeouts and session path.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an http(s) URL or no session
    /// path can be derived.
    pub fn new(base_url: &str, session_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(base_url)?;
        let session_file = match session_file {
            Some(path) => path,
            None => default_session_file(std::env::var_os("HOME").map(PathBuf::from))?,
        };
        Ok(Self { base_url, session_file, timeouts: Timeouts::default() })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `BORLA_BASE_URL`: backend origin (default: the hosted backend)
    /// - `BORLA_SESSION_FILE`: session store path (default `$HOME/.borla/session.json`)
    /// - `BORLA_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BORLA_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a value is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(None, None)
    }

    /// Build config from explicit values, reading the environment only for
    /// the values not given. A malformed `BORLA_BASE_URL` or a missing `HOME`
    /// does not matter when the corresponding value is passed in.
    ///
    /// # Errors
    ///
    /// Returns an error if a value that is actually used is malformed.
    pub fn resolve(base_url: Option<&str>, session_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let base_url = match base_url {
            Some(url) => url.to_owned(),
            None => std::env::var("BORLA_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        };
        let session_file = session_file.or_else(|| {
            std::env::var_os("BORLA_SESSION_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        });
        Ok(Self::new(&base_url, session_file)?.with_timeouts(Timeouts::from_env()?))
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_owned())
    } else {
        Err(ConfigError::InvalidBaseUrl(raw.to_owned()))
    }
}

fn default_session_file(home: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    home.map(|home| home.join(DEFAULT_SESSION_DIR).join(DEFAULT_SESSION_FILE))
        .ok_or(ConfigError::NoSessionPath)
}

fn env_parse_u64(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        _ => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
