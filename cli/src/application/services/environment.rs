//! Environment lookups and status waits.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};

use crate::application::ports::EnvironmentInspector;
use crate::application::services::poll::poll_until;
use crate::domain::{DeployError, Environment, EnvironmentStatus, PollPolicy, select_active};

/// Find the single `Ready` environment of `application` whose name starts
/// with `prefix`.
///
/// # Errors
///
/// Returns an error if the describe call fails, or a [`DeployError`] when
/// zero or more than one environment matches.
pub async fn locate_active(
    platform: &impl EnvironmentInspector,
    application: &str,
    prefix: &str,
) -> Result<Environment> {
    tracing::info!(prefix, "find environment by prefix");
    let environments = platform
        .describe_environments(application, &[])
        .await
        .with_context(|| format!("describing environments of application '{application}'"))?;

    for env in environments.iter().filter(|env| env.is_active_for(prefix)) {
        tracing::info!(environment = %env.name, "found");
    }

    let active = select_active(environments, prefix)?;
    tracing::info!(environment = %active.name, id = %active.id, "environment found");
    Ok(active)
}

/// Whether the environment called `name` currently has `expected` status.
///
/// # Errors
///
/// Returns an error if the describe call fails or does not return exactly one
/// environment.
pub async fn has_status(
    platform: &impl EnvironmentInspector,
    application: &str,
    name: &str,
    expected: &EnvironmentStatus,
) -> Result<bool> {
    tracing::debug!(environment = name, %expected, "check environment status");
    let environments = platform
        .describe_environments(application, &[name])
        .await
        .with_context(|| format!("describing environment '{name}'"))?;

    let [env] = environments.as_slice() else {
        return Err(DeployError::UnexpectedEnvironmentCount {
            name: name.to_owned(),
            count: environments.len(),
        }
        .into());
    };
    tracing::debug!(environment = name, status = %env.status, "environment status");
    Ok(env.status == *expected)
}

/// Block until the environment called `name` reports `expected` status.
///
/// # Errors
///
/// Returns an error if a status check fails or the poll budget is exhausted.
pub async fn wait_for_status(
    platform: &impl EnvironmentInspector,
    application: &str,
    name: &str,
    expected: EnvironmentStatus,
    policy: PollPolicy,
) -> Result<()> {
    let what = format!("environment '{name}' to become {expected}");
    poll_until(&what, policy, || {
        has_status(platform, application, name, &expected)
    })
    .await?;
    tracing::info!(environment = name, status = %expected, "environment reached status");
    Ok(())
}
