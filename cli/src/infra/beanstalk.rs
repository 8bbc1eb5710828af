//! Infrastructure implementation of the platform port traits over the
//! Elastic Beanstalk management API.
//!
//! Every call here is a plain request/response. Completion of the
//! asynchronous environment operations is observed by the application layer
//! through `describe_environments`.

use anyhow::{Result, anyhow};
use aws_config::SdkConfig;
use aws_sdk_elasticbeanstalk::Client;
use aws_sdk_elasticbeanstalk::error::DisplayErrorContext;
use aws_sdk_elasticbeanstalk::types::{EnvironmentDescription, S3Location};

use crate::application::ports::{
    ApplicationVersions, ConfigurationTemplates, EnvironmentInspector, EnvironmentLifecycle,
    EnvironmentSpec,
};
use crate::domain::{ApplicationVersion, Environment, EnvironmentStatus};

/// Elastic Beanstalk adapter implementing all platform role traits.
pub struct BeanstalkPlatform {
    client: Client,
}

impl BeanstalkPlatform {
    /// Build a client from the shared SDK configuration.
    #[must_use]
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

/// Map an SDK environment description onto the domain model.
///
/// Missing fields become empty strings; a missing status becomes
/// `Unknown("")`, which never matches any awaited status.
#[must_use]
pub fn environment_from_description(description: &EnvironmentDescription) -> Environment {
    Environment {
        name: description.environment_name().unwrap_or_default().to_owned(),
        id: description.environment_id().unwrap_or_default().to_owned(),
        status: description.status().map_or_else(
            || EnvironmentStatus::Unknown(String::new()),
            |status| EnvironmentStatus::from(status.as_str()),
        ),
    }
}

impl ApplicationVersions for BeanstalkPlatform {
    async fn create_application_version(
        &self,
        application: &str,
        version: &ApplicationVersion,
    ) -> Result<()> {
        let bundle = S3Location::builder()
            .s3_bucket(&version.source.bucket)
            .s3_key(&version.source.key)
            .build();
        self.client
            .create_application_version()
            .application_name(application)
            .version_label(&version.label)
            .source_bundle(bundle)
            .send()
            .await
            .map_err(|e| anyhow!("CreateApplicationVersion failed: {}", DisplayErrorContext(&e)))?;
        Ok(())
    }
}

impl EnvironmentInspector for BeanstalkPlatform {
    async fn describe_environments(
        &self,
        application: &str,
        names: &[&str],
    ) -> Result<Vec<Environment>> {
        let mut request = self
            .client
            .describe_environments()
            .application_name(application);
        for name in names {
            request = request.environment_names(*name);
        }
        let output = request
            .send()
            .await
            .map_err(|e| anyhow!("DescribeEnvironments failed: {}", DisplayErrorContext(&e)))?;
        Ok(output
            .environments()
            .iter()
            .map(environment_from_description)
            .collect())
    }
}

impl EnvironmentLifecycle for BeanstalkPlatform {
    async fn create_environment(&self, spec: &EnvironmentSpec<'_>) -> Result<()> {
        tracing::info!(
            environment = spec.name,
            version = spec.version_label,
            template = spec.template_name,
            "create new environment"
        );
        self.client
            .create_environment()
            .application_name(spec.application)
            .environment_name(spec.name)
            .cname_prefix(spec.cname_prefix)
            .version_label(spec.version_label)
            .template_name(spec.template_name)
            .send()
            .await
            .map_err(|e| anyhow!("CreateEnvironment failed: {}", DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn terminate_environment(&self, name: &str) -> Result<()> {
        tracing::info!(environment = name, "delete environment");
        self.client
            .terminate_environment()
            .environment_name(name)
            .send()
            .await
            .map_err(|e| anyhow!("TerminateEnvironment failed: {}", DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn swap_cnames(&self, source: &str, destination: &str) -> Result<()> {
        tracing::info!(source, destination, "switch urls");
        self.client
            .swap_environment_cnames()
            .source_environment_name(source)
            .destination_environment_name(destination)
            .send()
            .await
            .map_err(|e| anyhow!("SwapEnvironmentCNAMEs failed: {}", DisplayErrorContext(&e)))?;
        Ok(())
    }
}

impl ConfigurationTemplates for BeanstalkPlatform {
    async fn delete_template(&self, application: &str, template: &str) -> Result<()> {
        self.client
            .delete_configuration_template()
            .application_name(application)
            .template_name(template)
            .send()
            .await
            .map_err(|e| {
                anyhow!("DeleteConfigurationTemplate failed: {}", DisplayErrorContext(&e))
            })?;
        Ok(())
    }

    async fn create_template_from_environment(
        &self,
        application: &str,
        template: &str,
        environment_id: &str,
    ) -> Result<()> {
        self.client
            .create_configuration_template()
            .application_name(application)
            .template_name(template)
            .environment_id(environment_id)
            .send()
            .await
            .map_err(|e| {
                anyhow!("CreateConfigurationTemplate failed: {}", DisplayErrorContext(&e))
            })?;
        Ok(())
    }
}
