//! Environment-driven configuration.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `SHADOW_SYSTEM_HOME` | data directory | `~/.shadow-system` |
//! | `API_KEY` / `GEMINI_API_KEY` | generative model key | none |
//! | `SHADOW_SYSTEM_MODEL` | model name | `gemini-2.5-flash` |
//! | `SHADOW_SYSTEM_API_BASE_URL` | REST endpoint root | Google v1beta |
//! | `SHADOW_SYSTEM_AI_TIMEOUT_SECS` | HTTP timeout | 60 |

use crate::core::constants::{DEFAULT_AI_TIMEOUT_SECONDS, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use std::env;
use std::path::PathBuf;
use tracing::warn;

pub const HOME_ENV: &str = "SHADOW_SYSTEM_HOME";
pub const API_KEY_ENV: &str = "API_KEY";
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "SHADOW_SYSTEM_MODEL";
pub const BASE_URL_ENV: &str = "SHADOW_SYSTEM_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "SHADOW_SYSTEM_AI_TIMEOUT_SECS";

/// Settings for the generative model client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachConfig {
    /// Missing keys are allowed; requests then fail with a key error.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_AI_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// `None` selects the default data directory.
    pub data_dir: Option<PathBuf>,
    pub coach: CoachConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Blank values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = CoachConfig::default();
        let timeout_secs = match get(TIMEOUT_ENV) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "ignoring invalid {}", TIMEOUT_ENV);
                defaults.timeout_secs
            }),
            None => defaults.timeout_secs,
        };

        Self {
            data_dir: get(HOME_ENV).map(PathBuf::from),
            coach: CoachConfig {
                api_key: get(API_KEY_ENV).or_else(|| get(GEMINI_API_KEY_ENV)),
                model: get(MODEL_ENV).unwrap_or(defaults.model),
                base_url: get(BASE_URL_ENV).unwrap_or(defaults.base_url),
                timeout_secs,
            },
        }
    }
}
