//! Loads tuning [`Settings`] from `EB_DEPLOY_*` environment variables.

use anyhow::{Context, Result};

use crate::domain::Settings;
use crate::domain::config::SETTINGS_ENV_PREFIX;

/// Read settings from the process environment.
///
/// # Errors
///
/// Returns an error if a variable is present but cannot be parsed, e.g.
/// `EB_DEPLOY_POLL_MAX_ATTEMPTS=many`.
pub fn load() -> Result<Settings> {
    from_vars(std::env::vars())
}

/// Read settings from an explicit variable list (full names, prefix included).
///
/// # Errors
///
/// Returns an error if a variable is present but cannot be parsed.
pub fn from_vars<I>(vars: I) -> Result<Settings>
where
    I: IntoIterator<Item = (String, String)>,
{
    let settings: Settings = envy::prefixed(SETTINGS_ENV_PREFIX)
        .from_iter(vars)
        .with_context(|| format!("failed to load settings from {SETTINGS_ENV_PREFIX}* env vars"))?;
    tracing::debug!(?settings, "settings loaded");
    Ok(settings)
}
