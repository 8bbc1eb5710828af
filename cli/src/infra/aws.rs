//! Shared AWS SDK configuration.
//!
//! Credentials and region come from the default provider chain (environment,
//! shared config files, instance role). `Settings` can pin the region or
//! point every client at a custom endpoint.

use aws_config::{BehaviorVersion, Region, SdkConfig};

use crate::domain::Settings;

/// Load the process-wide SDK configuration once at startup.
pub async fn load_sdk_config(settings: &Settings) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &settings.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint_url) = &settings.endpoint_url {
        tracing::info!(%endpoint_url, "using custom AWS endpoint");
        loader = loader.endpoint_url(endpoint_url);
    }
    let config = loader.load().await;
    tracing::debug!(region = ?config.region(), "AWS configuration loaded");
    config
}
