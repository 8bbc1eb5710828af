//! Environment domain types and the active-environment selection rule.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! Environments are never constructed from local state in production code;
//! they always come back from a fresh platform describe call.

use std::fmt;

use crate::domain::error::DeployError;

/// Lifecycle status reported by the platform for an environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentStatus {
    Launching,
    Updating,
    Ready,
    Terminating,
    Terminated,
    Aborting,
    LinkingFrom,
    LinkingTo,
    /// A status string this build does not know about.
    Unknown(String),
}

impl EnvironmentStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Launching => "Launching",
            Self::Updating => "Updating",
            Self::Ready => "Ready",
            Self::Terminating => "Terminating",
            Self::Terminated => "Terminated",
            Self::Aborting => "Aborting",
            Self::LinkingFrom => "LinkingFrom",
            Self::LinkingTo => "LinkingTo",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for EnvironmentStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "Launching" => Self::Launching,
            "Updating" => Self::Updating,
            "Ready" => Self::Ready,
            "Terminating" => Self::Terminating,
            "Terminated" => Self::Terminated,
            "Aborting" => Self::Aborting,
            "LinkingFrom" => Self::LinkingFrom,
            "LinkingTo" => Self::LinkingTo,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl fmt::Display for EnvironmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A running application environment as described by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Environment name, e.g. `"api-aa11bb22"`.
    pub name: String,
    /// Opaque platform identifier, e.g. `"e-abcdef1234"`.
    pub id: String,
    pub status: EnvironmentStatus,
}

impl Environment {
    /// Whether this environment is `Ready` and its name starts with `prefix`.
    #[must_use]
    pub fn is_active_for(&self, prefix: &str) -> bool {
        self.status == EnvironmentStatus::Ready && self.name.starts_with(prefix)
    }
}

/// Pick the single environment that currently serves `prefix`.
///
/// # Errors
///
/// Returns [`DeployError::NoReadyEnvironment`] when nothing matches and
/// [`DeployError::AmbiguousReadyEnvironment`] when more than one environment
/// matches. Multiple matches usually mean an earlier deployment left its old
/// environment running.
pub fn select_active(
    environments: Vec<Environment>,
    prefix: &str,
) -> Result<Environment, DeployError> {
    let mut found: Vec<Environment> = environments
        .into_iter()
        .filter(|env| env.is_active_for(prefix))
        .collect();

    match found.len() {
        0 => Err(DeployError::NoReadyEnvironment {
            prefix: prefix.to_owned(),
        }),
        1 => Ok(found.remove(0)),
        _ => Err(DeployError::AmbiguousReadyEnvironment {
            prefix: prefix.to_owned(),
            names: found.into_iter().map(|env| env.name).collect(),
        }),
    }
}
