//! Configuration
//!
//! Loaded from `$CONFIG_DIR/formsync/config.json` (or an explicit path),
//! then overridden by `FORMSYNC_*` environment variables.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Default redirect limit (matches common browser limits)
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// What to do with a form method that is neither GET nor POST
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownMethodPolicy {
    /// Report an unsupported-method failure without sending anything
    #[default]
    Reject,
    /// Submit the fields as a POST body
    Post,
}

impl FromStr for UnknownMethodPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "post" => Ok(Self::Post),
            other => Err(Error::Config(format!(
                "unknown method policy '{other}' (expected reject or post)"
            ))),
        }
    }
}

/// How response JSON maps onto the `{ data, navigate }` envelope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadShape {
    /// Envelope when the keys are only `data`/`navigate`, flat otherwise
    #[default]
    Auto,
    /// Always an envelope
    Envelope,
    /// Always flat data, never a directive
    Flat,
}

impl FromStr for PayloadShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "envelope" => Ok(Self::Envelope),
            "flat" => Ok(Self::Flat),
            other => Err(Error::Config(format!(
                "unknown payload shape '{other}' (expected auto, envelope or flat)"
            ))),
        }
    }
}

/// Mediator and transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whole-request timeout in seconds; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
    /// Redirects followed before giving up; 0 disables following
    pub max_redirects: usize,
    /// Policy for methods other than GET/POST
    pub unknown_method: UnknownMethodPolicy,
    /// Response payload interpretation
    pub payload_shape: PayloadShape,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            unknown_method: UnknownMethodPolicy::default(),
            payload_shape: PayloadShape::default(),
        }
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("formsync").join("config.json"))
    }

    /// Load config.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used if present. Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.is_file() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };

        config.apply_env()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Apply `FORMSYNC_*` environment overrides
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(raw) = env::var("FORMSYNC_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| Error::Config(format!("FORMSYNC_TIMEOUT_SECS: {e}")))?;
            self.timeout_secs = if secs == 0 { None } else { Some(secs) };
        }

        if let Ok(raw) = env::var("FORMSYNC_MAX_REDIRECTS") {
            self.max_redirects = raw
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("FORMSYNC_MAX_REDIRECTS: {e}")))?;
        }

        if let Ok(raw) = env::var("FORMSYNC_UNKNOWN_METHOD") {
            self.unknown_method = raw.parse()?;
        }

        if let Ok(raw) = env::var("FORMSYNC_PAYLOAD_SHAPE") {
            self.payload_shape = raw.parse()?;
        }

        Ok(())
    }

    /// Request timeout, if any; zero seconds means no timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.timeout(), None);
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.unknown_method, UnknownMethodPolicy::Reject);
        assert_eq!(config.payload_shape, PayloadShape::Auto);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"timeout_secs": 5, "unknown_method": "post"}"#).unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.unknown_method, UnknownMethodPolicy::Post);
        assert_eq!(config.max_redirects, DEFAULT_MAX_REDIRECTS);
    }

    #[test]
    fn test_zero_timeout_from_file_means_none() {
        let config: Config = serde_json::from_str(r#"{"timeout_secs": 0}"#).unwrap();
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_parse_policies() {
        assert_eq!("POST".parse::<UnknownMethodPolicy>().unwrap(), UnknownMethodPolicy::Post);
        assert_eq!("flat".parse::<PayloadShape>().unwrap(), PayloadShape::Flat);
        assert!("sideways".parse::<PayloadShape>().is_err());
    }
}
