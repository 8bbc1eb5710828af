//! Infrastructure implementation of the `ArtifactStore` port over Amazon S3.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use aws_config::SdkConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use crate::application::ports::ArtifactStore;
use crate::domain::ArtifactLocation;

/// Uploads artifacts with a single `PutObject` call.
pub struct S3ArtifactStore {
    client: Client,
}

impl S3ArtifactStore {
    /// Build a store from the shared SDK configuration.
    ///
    /// `path_style` forces path-style bucket addressing, which custom
    /// endpoints such as LocalStack require.
    #[must_use]
    pub fn new(config: &SdkConfig, path_style: bool) -> Self {
        let s3_config = aws_sdk_s3::config::Builder::from(config)
            .force_path_style(path_style)
            .build();
        Self {
            client: Client::from_conf(s3_config),
        }
    }
}

impl ArtifactStore for S3ArtifactStore {
    async fn store(&self, local: &Path, location: &ArtifactLocation) -> Result<()> {
        tracing::info!(
            path = %local.display(),
            bucket = %location.bucket,
            key = %location.key,
            "upload artifact"
        );

        let body = ByteStream::from_path(local)
            .await
            .with_context(|| format!("cannot read {}", local.display()))?;

        self.client
            .put_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .body(body)
            .send()
            .await
            .map_err(|e| anyhow!("S3 PutObject failed: {}", DisplayErrorContext(&e)))?;

        tracing::info!("upload succeeded");
        Ok(())
    }
}
