//! Infrastructure layer: concrete implementations of application port traits.
//!
//! Everything that talks to AWS or reads the process environment lives here.
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod aws;
pub mod beanstalk;
pub mod s3;
pub mod settings;
