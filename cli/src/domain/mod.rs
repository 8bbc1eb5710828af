//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod deployment;
pub mod environment;
pub mod error;
pub mod naming;

pub use config::{PollPolicy, Settings};
pub use deployment::{
    ApplicationVersion, ArtifactLocation, DeployOutcome, DeployTarget, DeploymentRequest,
};
pub use environment::{Environment, EnvironmentStatus, select_active};
pub use error::{ConfigError, DeployError};
pub use naming::replacement_name;
