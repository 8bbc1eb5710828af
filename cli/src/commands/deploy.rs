//! `eb-deploy`: replace an environment with a freshly built copy.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::application::services::deploy::BlueGreenDeployment;
use crate::domain::{DeployOutcome, DeployTarget, DeploymentRequest};
use crate::infra::{aws, beanstalk::BeanstalkPlatform, s3::S3ArtifactStore, settings};
use crate::output::{OutputContext, TerminalReporter};

/// Arguments describing one deployment.
#[derive(Args, Debug, Clone)]
pub struct DeployArgs {
    /// Elastic Beanstalk application name
    #[arg(long = "app", env = "EB_DEPLOY_APP", value_name = "NAME")]
    pub application: String,

    /// S3 bucket that receives the artifact
    #[arg(long, env = "EB_DEPLOY_BUCKET", value_name = "BUCKET")]
    pub bucket: String,

    /// Environment name prefix; also the configuration template name
    #[arg(long = "env", env = "EB_DEPLOY_ENV", value_name = "PREFIX")]
    pub environment_prefix: String,

    /// Version label for the new application version
    #[arg(long = "version", env = "EB_DEPLOY_VERSION", value_name = "LABEL")]
    pub version_label: String,

    /// Local path of the deployment artifact
    #[arg(long = "file", env = "EB_DEPLOY_FILE", value_name = "PATH")]
    pub artifact: PathBuf,
}

impl DeployArgs {
    #[must_use]
    pub fn target(&self) -> DeployTarget {
        DeployTarget {
            application: self.application.clone(),
            bucket: self.bucket.clone(),
        }
    }

    #[must_use]
    pub fn request(&self) -> DeploymentRequest {
        DeploymentRequest {
            environment_prefix: self.environment_prefix.clone(),
            version_label: self.version_label.clone(),
            artifact_path: self.artifact.clone(),
        }
    }
}

/// Run a deployment.
///
/// # Errors
///
/// Returns an error if settings are invalid or any deployment step fails.
pub async fn run(args: &DeployArgs, ctx: &OutputContext) -> Result<()> {
    let settings = settings::load()?;
    let policy = settings.poll_policy().context("invalid polling settings")?;

    let sdk_config = aws::load_sdk_config(&settings).await;
    let platform = BeanstalkPlatform::new(&sdk_config);
    let store = S3ArtifactStore::new(&sdk_config, settings.endpoint_url.is_some());
    let reporter = TerminalReporter::new(ctx);

    let target = args.target();
    let outcome = BlueGreenDeployment::new(&platform, &store, &reporter, &target, policy)
        .run(&args.request())
        .await?;

    print_summary(&outcome, ctx);
    Ok(())
}

fn print_summary(outcome: &DeployOutcome, ctx: &OutputContext) {
    ctx.success("Deployment complete.");
    ctx.kv("Version", &outcome.version);
    ctx.kv("Live", &outcome.promoted);
    ctx.kv("Retired", &outcome.retired);
}
