//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;

use anyhow::Result;

use crate::domain::{ApplicationVersion, ArtifactLocation, Environment};

// ── Value Types ───────────────────────────────────────────────────────────────

/// Parameters for creating a new environment.
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentSpec<'a> {
    pub application: &'a str,
    /// New environment name, e.g. `"api-3f9c01ab"`.
    pub name: &'a str,
    /// CNAME prefix for the new environment's own endpoint.
    pub cname_prefix: &'a str,
    pub version_label: &'a str,
    /// Configuration template the environment is provisioned from.
    pub template_name: &'a str,
}

// ── Artifact Store Port ───────────────────────────────────────────────────────

/// Uploads deployment artifacts to the content store.
#[allow(async_fn_in_trait)]
pub trait ArtifactStore {
    /// Upload the file at `local` to `location`.
    async fn store(&self, local: &Path, location: &ArtifactLocation) -> Result<()>;
}

// ── Platform Port Traits ──────────────────────────────────────────────────────

/// Application version registration.
#[allow(async_fn_in_trait)]
pub trait ApplicationVersions {
    /// Register `version` under `application`, pointing at its stored artifact.
    async fn create_application_version(
        &self,
        application: &str,
        version: &ApplicationVersion,
    ) -> Result<()>;
}

/// Environment state inspection.
#[allow(async_fn_in_trait)]
pub trait EnvironmentInspector {
    /// Describe the environments of `application`.
    ///
    /// An empty `names` slice returns every environment; otherwise only the
    /// named ones. Recently terminated environments may be included.
    async fn describe_environments(
        &self,
        application: &str,
        names: &[&str],
    ) -> Result<Vec<Environment>>;
}

/// Environment lifecycle requests. All of these complete asynchronously on
/// the platform; callers observe completion by polling the inspector.
#[allow(async_fn_in_trait)]
pub trait EnvironmentLifecycle {
    /// Request creation of a new environment.
    async fn create_environment(&self, spec: &EnvironmentSpec<'_>) -> Result<()>;
    /// Request termination of an environment.
    async fn terminate_environment(&self, name: &str) -> Result<()>;
    /// Request an atomic CNAME swap between two environments.
    async fn swap_cnames(&self, source: &str, destination: &str) -> Result<()>;
}

/// Configuration template management.
#[allow(async_fn_in_trait)]
pub trait ConfigurationTemplates {
    /// Delete a configuration template.
    async fn delete_template(&self, application: &str, template: &str) -> Result<()>;
    /// Create a configuration template from a running environment's settings.
    async fn create_template_from_environment(
        &self,
        application: &str,
        template: &str,
        environment_id: &str,
    ) -> Result<()>;
}

/// Composite trait: any type implementing all four role traits is a `Platform`.
pub trait Platform:
    ApplicationVersions + EnvironmentInspector + EnvironmentLifecycle + ConfigurationTemplates
{
}

/// Blanket implementation: any type implementing all four role traits is a `Platform`.
impl<T> Platform for T where
    T: ApplicationVersions + EnvironmentInspector + EnvironmentLifecycle + ConfigurationTemplates
{
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
