//! Application service: blue/green deployment use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! Step order:
//!
//! 1. register the new application version (upload + register)
//! 2. locate the active ("blue") environment
//! 3. refresh the configuration template from blue
//! 4. provision the replacement ("green") environment and wait for `Ready`
//! 5. swap CNAMEs and wait for both sides to be `Ready` again
//! 6. terminate blue and wait for `Terminated`
//!
//! Any failure stops the sequence where it is. Nothing is rolled back.

use anyhow::{Context, Result};

use crate::application::ports::{ArtifactStore, EnvironmentSpec, Platform, ProgressReporter};
use crate::application::services::environment::{locate_active, wait_for_status};
use crate::domain::{
    ApplicationVersion, ArtifactLocation, DeployOutcome, DeployTarget, DeploymentRequest,
    Environment, EnvironmentStatus, PollPolicy, replacement_name,
};

/// One blue/green deployment run against a single application.
///
/// Holds borrowed collaborators only; construct one per run.
pub struct BlueGreenDeployment<'a, P, S, R> {
    platform: &'a P,
    store: &'a S,
    reporter: &'a R,
    target: &'a DeployTarget,
    policy: PollPolicy,
}

impl<'a, P, S, R> BlueGreenDeployment<'a, P, S, R>
where
    P: Platform,
    S: ArtifactStore,
    R: ProgressReporter,
{
    pub fn new(
        platform: &'a P,
        store: &'a S,
        reporter: &'a R,
        target: &'a DeployTarget,
        policy: PollPolicy,
    ) -> Self {
        Self {
            platform,
            store,
            reporter,
            target,
            policy,
        }
    }

    /// Run the full deployment sequence.
    ///
    /// Before anything is uploaded the active environment is looked up once
    /// as a read-only precondition check, so a prefix with zero or several
    /// `Ready` environments fails without side effects. The lookup is
    /// repeated at step 2 so the rest of the run works from fresh state.
    ///
    /// # Errors
    ///
    /// Returns the first error from any step. The platform is left in
    /// whatever state the last successful step produced.
    pub async fn run(&self, request: &DeploymentRequest) -> Result<DeployOutcome> {
        let prefix = request.environment_prefix.as_str();
        tracing::info!(
            application = %self.target.application,
            prefix,
            version = %request.version_label,
            artifact = %request.artifact_path.display(),
            "update environment"
        );

        locate_active(self.platform, &self.target.application, prefix)
            .await
            .context("checking deployment preconditions")?;

        self.register_version(request).await?;

        self.reporter
            .step(&format!("locating active environment '{prefix}*'..."));
        let blue = locate_active(self.platform, &self.target.application, prefix).await?;
        self.reporter
            .success(&format!("active environment is '{}'", blue.name));

        self.refresh_template(&blue, prefix).await?;

        let green = replacement_name(prefix)?;
        self.provision(&green, prefix, &request.version_label).await?;

        self.swap(&blue.name, &green).await?;
        self.decommission(&blue.name).await?;

        tracing::info!(version = %request.version_label, prefix, "environment updated");
        Ok(DeployOutcome {
            version: request.version_label.clone(),
            retired: blue.name,
            promoted: green,
        })
    }

    /// Step 1: upload the artifact and register it as an application version.
    async fn register_version(&self, request: &DeploymentRequest) -> Result<()> {
        let label = request.version_label.as_str();
        let location = ArtifactLocation {
            bucket: self.target.bucket.clone(),
            key: request.artifact_key(),
        };

        self.reporter.step(&format!(
            "uploading {} to s3://{}/{}...",
            request.artifact_path.display(),
            location.bucket,
            location.key
        ));
        self.store
            .store(&request.artifact_path, &location)
            .await
            .with_context(|| {
                format!(
                    "uploading {} to s3://{}/{}",
                    request.artifact_path.display(),
                    location.bucket,
                    location.key
                )
            })?;

        self.reporter
            .step(&format!("registering application version '{label}'..."));
        let version = ApplicationVersion {
            label: label.to_owned(),
            source: location,
        };
        self.platform
            .create_application_version(&self.target.application, &version)
            .await
            .with_context(|| format!("registering application version '{label}'"))?;

        tracing::info!(version = label, key = %version.source.key, "version created");
        self.reporter
            .success(&format!("application version '{label}' registered"));
        Ok(())
    }

    /// Step 3: recreate the prefix template from blue's live settings.
    async fn refresh_template(&self, blue: &Environment, template: &str) -> Result<()> {
        let application = self.target.application.as_str();
        self.reporter.step(&format!(
            "refreshing configuration template '{template}' from '{}'...",
            blue.name
        ));

        tracing::info!(template, "delete configuration");
        self.platform
            .delete_template(application, template)
            .await
            .with_context(|| format!("deleting configuration template '{template}'"))?;

        tracing::info!(template, source = %blue.name, "create configuration");
        self.platform
            .create_template_from_environment(application, template, &blue.id)
            .await
            .with_context(|| {
                format!(
                    "creating configuration template '{template}' from environment '{}'",
                    blue.name
                )
            })?;

        self.reporter
            .success(&format!("configuration template '{template}' updated"));
        Ok(())
    }

    /// Step 4: create green from the refreshed template and wait for `Ready`.
    async fn provision(&self, green: &str, template: &str, version_label: &str) -> Result<()> {
        let application = self.target.application.as_str();
        self.reporter
            .step(&format!("creating environment '{green}'..."));

        let spec = EnvironmentSpec {
            application,
            name: green,
            cname_prefix: green,
            version_label,
            template_name: template,
        };
        self.platform
            .create_environment(&spec)
            .await
            .with_context(|| format!("creating environment '{green}'"))?;

        if let Err(e) = self.wait_for(green, EnvironmentStatus::Ready).await {
            self.reporter.warn(&format!(
                "environment '{green}' was left in place; remove it manually if unwanted"
            ));
            return Err(e);
        }
        self.reporter
            .success(&format!("environment '{green}' is ready"));
        Ok(())
    }

    /// Step 5: swap CNAMEs, then wait for blue and green (in that order).
    async fn swap(&self, blue: &str, green: &str) -> Result<()> {
        self.reporter
            .step(&format!("swapping CNAMEs of '{blue}' and '{green}'..."));
        self.platform
            .swap_cnames(blue, green)
            .await
            .with_context(|| format!("swapping CNAMEs of '{blue}' and '{green}'"))?;

        self.wait_for(blue, EnvironmentStatus::Ready).await?;
        self.wait_for(green, EnvironmentStatus::Ready).await?;
        self.reporter.success("traffic switched");
        Ok(())
    }

    /// Step 6: terminate blue and wait for `Terminated`.
    async fn decommission(&self, blue: &str) -> Result<()> {
        self.reporter
            .step(&format!("terminating environment '{blue}'..."));
        self.platform
            .terminate_environment(blue)
            .await
            .with_context(|| format!("terminating environment '{blue}'"))?;

        self.wait_for(blue, EnvironmentStatus::Terminated).await?;
        self.reporter
            .success(&format!("environment '{blue}' terminated"));
        Ok(())
    }

    async fn wait_for(&self, name: &str, status: EnvironmentStatus) -> Result<()> {
        wait_for_status(
            self.platform,
            &self.target.application,
            name,
            status,
            self.policy,
        )
        .await
    }
}
