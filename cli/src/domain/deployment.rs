//! Deployment request and artifact domain types.
//!
//! This module is intentionally free of I/O, async, and external layer imports.

use std::path::{Path, PathBuf};

/// Extension used for the stored artifact when the local file has none.
pub const DEFAULT_ARTIFACT_EXTENSION: &str = "zip";

/// Where a deployment goes: the platform application and the bucket that
/// holds its artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployTarget {
    pub application: String,
    pub bucket: String,
}

/// One operator-requested deployment. Built once from CLI input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    /// Environment name prefix, also used as the configuration template name.
    pub environment_prefix: String,
    pub version_label: String,
    /// Local path of the artifact to upload.
    pub artifact_path: PathBuf,
}

impl DeploymentRequest {
    /// Content-store key for this request's artifact: `prefix/version.extension`.
    #[must_use]
    pub fn artifact_key(&self) -> String {
        artifact_key(&self.environment_prefix, &self.version_label, &self.artifact_path)
    }
}

/// Address of an uploaded artifact in the content store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    pub bucket: String,
    pub key: String,
}

/// An application version registered with the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationVersion {
    pub label: String,
    pub source: ArtifactLocation,
}

/// Result of a completed deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    pub version: String,
    /// Environment that served traffic before and has now been terminated.
    pub retired: String,
    /// Environment that now serves traffic.
    pub promoted: String,
}

/// Build the content-store key for an artifact.
///
/// The extension comes from the local file, falling back to
/// [`DEFAULT_ARTIFACT_EXTENSION`].
#[must_use]
pub fn artifact_key(prefix: &str, version: &str, artifact: &Path) -> String {
    let extension = artifact
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .unwrap_or(DEFAULT_ARTIFACT_EXTENSION);
    format!("{prefix}/{version}.{extension}")
}
