//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Deployment errors ─────────────────────────────────────────────────────────

/// Errors raised by the deployment sequence itself.
///
/// Transport failures from the platform or the artifact store are not listed
/// here; they travel as `anyhow::Error` with context naming the failed step.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("no environment with prefix '{prefix}' has status 'Ready'")]
    NoReadyEnvironment { prefix: String },

    #[error(
        "more than one environment with prefix '{prefix}' has status 'Ready': {}",
        .names.join(", ")
    )]
    AmbiguousReadyEnvironment { prefix: String, names: Vec<String> },

    #[error("expected exactly one environment named '{name}', platform returned {count}")]
    UnexpectedEnvironmentCount { name: String, count: usize },

    #[error("gave up waiting for {what} after {attempts} attempts")]
    PollExhausted { what: String, attempts: u32 },

    #[error("random source unavailable: {0}")]
    RandomSourceUnavailable(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to tuning settings loaded from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}\n\n{hint}")]
    InvalidValue {
        key: String,
        value: String,
        hint: String,
    },
}
