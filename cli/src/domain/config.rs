//! Domain types and validators for deployment tuning settings.
//!
//! Pure functions only. No I/O, no async, no environment access.

use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Prefix of every tuning environment variable.
pub const SETTINGS_ENV_PREFIX: &str = "EB_DEPLOY_";

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;
pub const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 50;

// ── Poll policy ──────────────────────────────────────────────────────────────

/// Fixed-interval retry budget for waiting on platform state transitions.
///
/// The default (15 s × 50) gives each transition roughly 12.5 minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_attempts: DEFAULT_POLL_MAX_ATTEMPTS,
        }
    }
}

// ── Settings schema ──────────────────────────────────────────────────────────

/// Tuning settings read from `EB_DEPLOY_*` environment variables.
///
/// None of these are required; the deployment inputs themselves come from
/// the command line.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// `EB_DEPLOY_POLL_INTERVAL_SECS`
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// `EB_DEPLOY_POLL_MAX_ATTEMPTS`
    #[serde(default = "default_poll_max_attempts")]
    pub poll_max_attempts: u32,

    /// `EB_DEPLOY_REGION`: overrides the region from the AWS provider chain.
    #[serde(default)]
    pub region: Option<String>,

    /// `EB_DEPLOY_ENDPOINT_URL`: custom endpoint, e.g. LocalStack.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            poll_max_attempts: default_poll_max_attempts(),
            region: None,
            endpoint_url: None,
        }
    }
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_poll_max_attempts() -> u32 {
    DEFAULT_POLL_MAX_ATTEMPTS
}

impl Settings {
    /// Validated poll policy.
    ///
    /// # Errors
    ///
    /// Returns an error if `poll_max_attempts` is zero.
    pub fn poll_policy(&self) -> Result<PollPolicy> {
        if self.poll_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                key: format!("{SETTINGS_ENV_PREFIX}POLL_MAX_ATTEMPTS"),
                value: self.poll_max_attempts.to_string(),
                hint: "At least one attempt is required.".to_string(),
            }
            .into());
        }
        Ok(PollPolicy {
            interval: Duration::from_secs(self.poll_interval_secs),
            max_attempts: self.poll_max_attempts,
        })
    }
}
