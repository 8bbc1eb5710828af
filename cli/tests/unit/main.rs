//! Unit tests for eb-deploy
//!
//! These tests drive the application services against in-memory fakes and
//! run without any AWS access.

mod deploy_service;
