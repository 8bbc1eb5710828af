//! Tests for the blue/green deployment service.
//!
//! Every test runs on a paused tokio clock so the poll sleeps complete
//! instantly and elapsed virtual time can be asserted.

#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::time::Duration;

use eb_deploy::application::services::deploy::BlueGreenDeployment;
use eb_deploy::domain::{
    DeployError, DeployOutcome, DeployTarget, DeploymentRequest, EnvironmentStatus, PollPolicy,
};
use tokio::time::Instant;

use crate::fakes::{Call, FakePlatform, RecordingReporter};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn target() -> DeployTarget {
    DeployTarget {
        application: "shop".to_owned(),
        bucket: "artifacts".to_owned(),
    }
}

fn request() -> DeploymentRequest {
    DeploymentRequest {
        environment_prefix: "api".to_owned(),
        version_label: "v42".to_owned(),
        artifact_path: PathBuf::from("/tmp/app.zip"),
    }
}

fn policy(max_attempts: u32) -> PollPolicy {
    PollPolicy {
        interval: Duration::from_secs(15),
        max_attempts,
    }
}

async fn deploy(
    platform: &FakePlatform,
    reporter: &RecordingReporter,
    policy: PollPolicy,
) -> anyhow::Result<DeployOutcome> {
    let target = target();
    BlueGreenDeployment::new(platform, platform, reporter, &target, policy)
        .run(&request())
        .await
}

fn describes_after(calls: &[Call], marker: &Call) -> Vec<Vec<String>> {
    let start = calls
        .iter()
        .position(|call| call == marker)
        .expect("marker call recorded");
    calls[start + 1..]
        .iter()
        .take_while(|call| !call.is_mutating())
        .filter_map(|call| match call {
            Call::Describe { names } => Some(names.clone()),
            _ => None,
        })
        .collect()
}

// ── Happy path ────────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn deploy_replaces_live_environment() {
    let platform = FakePlatform::with_live_environment().launch_polls(2);
    let reporter = RecordingReporter::default();

    let outcome = deploy(&platform, &reporter, policy(50))
        .await
        .expect("deployment succeeds");

    let green = platform.created_environment().expect("green created");
    assert!(green.starts_with("api-"), "unexpected name {green}");
    assert_eq!(green.len(), "api-".len() + 8);
    assert!(green["api-".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(
        outcome,
        DeployOutcome {
            version: "v42".to_owned(),
            retired: "api-aa11bb22".to_owned(),
            promoted: green.clone(),
        }
    );

    assert_eq!(
        platform.mutating_calls(),
        vec![
            Call::Store {
                bucket: "artifacts".to_owned(),
                key: "api/v42.zip".to_owned(),
            },
            Call::CreateVersion {
                application: "shop".to_owned(),
                label: "v42".to_owned(),
                key: "api/v42.zip".to_owned(),
            },
            Call::DeleteTemplate {
                template: "api".to_owned(),
            },
            Call::CreateTemplate {
                template: "api".to_owned(),
                environment_id: "e-aa11bb22".to_owned(),
            },
            Call::CreateEnvironment {
                name: green.clone(),
                cname_prefix: green.clone(),
                version_label: "v42".to_owned(),
                template_name: "api".to_owned(),
            },
            Call::Swap {
                source: "api-aa11bb22".to_owned(),
                destination: green.clone(),
            },
            Call::Terminate {
                name: "api-aa11bb22".to_owned(),
            },
        ]
    );

    assert_eq!(platform.status_of("api-aa11bb22"), Some(EnvironmentStatus::Terminated));
    assert_eq!(platform.status_of(&green), Some(EnvironmentStatus::Ready));
}

#[tokio::test(start_paused = true)]
async fn swap_waits_for_old_then_new_environment() {
    let platform = FakePlatform::with_live_environment();
    let reporter = RecordingReporter::default();

    let outcome = deploy(&platform, &reporter, policy(50))
        .await
        .expect("deployment succeeds");

    let swap = Call::Swap {
        source: "api-aa11bb22".to_owned(),
        destination: outcome.promoted.clone(),
    };
    let blue = vec!["api-aa11bb22".to_owned()];
    let green = vec![outcome.promoted.clone()];
    assert_eq!(
        describes_after(&platform.calls(), &swap),
        vec![blue.clone(), blue, green.clone(), green]
    );
}

#[tokio::test(start_paused = true)]
async fn terminate_waits_until_environment_is_gone() {
    let platform = FakePlatform::with_live_environment();
    let reporter = RecordingReporter::default();

    deploy(&platform, &reporter, policy(50))
        .await
        .expect("deployment succeeds");

    let terminate = Call::Terminate {
        name: "api-aa11bb22".to_owned(),
    };
    let blue = vec!["api-aa11bb22".to_owned()];
    assert_eq!(
        describes_after(&platform.calls(), &terminate),
        vec![blue.clone(), blue]
    );
}

#[tokio::test(start_paused = true)]
async fn waits_sleep_between_attempts_only() {
    // Green: Launching, Launching, Ready (2 sleeps). Swap: blue and green
    // each Updating, Ready (1 sleep each). Terminate: Terminating,
    // Terminated (1 sleep).
    let platform = FakePlatform::with_live_environment().launch_polls(2);
    let reporter = RecordingReporter::default();
    let started = Instant::now();

    deploy(&platform, &reporter, policy(50))
        .await
        .expect("deployment succeeds");

    assert_eq!(started.elapsed(), Duration::from_secs(5 * 15));
}

#[tokio::test(start_paused = true)]
async fn progress_is_reported_for_each_step() {
    let platform = FakePlatform::with_live_environment();
    let reporter = RecordingReporter::default();

    deploy(&platform, &reporter, policy(50))
        .await
        .expect("deployment succeeds");

    let lines = reporter.lines();
    for expected in [
        "✓ application version 'v42' registered",
        "✓ active environment is 'api-aa11bb22'",
        "✓ configuration template 'api' updated",
        "✓ traffic switched",
        "✓ environment 'api-aa11bb22' terminated",
    ] {
        assert!(
            lines.iter().any(|line| line == expected),
            "missing {expected:?} in {lines:#?}"
        );
    }
    assert!(!lines.iter().any(|line| line.starts_with('!')));
}

// ── Precondition failures ─────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn two_ready_environments_fail_before_any_change() {
    let platform = FakePlatform::new(&[
        ("api-aa11bb22", "e-aa11bb22", EnvironmentStatus::Ready),
        ("api-3f9c01ab", "e-3f9c01ab", EnvironmentStatus::Ready),
    ]);
    let reporter = RecordingReporter::default();

    let err = deploy(&platform, &reporter, policy(50))
        .await
        .expect_err("ambiguous prefix");

    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::AmbiguousReadyEnvironment { prefix, names })
            if prefix == "api" && names.len() == 2
    ));
    assert!(platform.mutating_calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn no_ready_environment_fails_before_any_change() {
    let platform = FakePlatform::new(&[
        ("api-aa11bb22", "e-aa11bb22", EnvironmentStatus::Terminated),
        ("web-1", "e-9", EnvironmentStatus::Ready),
    ]);
    let reporter = RecordingReporter::default();

    let err = deploy(&platform, &reporter, policy(50))
        .await
        .expect_err("nothing live");

    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::NoReadyEnvironment { prefix }) if prefix == "api"
    ));
    assert!(platform.mutating_calls().is_empty());
}

// ── Mid-sequence failures ─────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn green_never_ready_stops_before_swap() {
    let platform = FakePlatform::with_live_environment().green_never_ready();
    let reporter = RecordingReporter::default();
    let started = Instant::now();

    let err = deploy(&platform, &reporter, policy(3))
        .await
        .expect_err("green never becomes ready");

    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::PollExhausted { attempts: 3, .. })
    ));
    assert_eq!(started.elapsed(), Duration::from_secs(2 * 15));

    let calls = platform.mutating_calls();
    assert!(matches!(calls.last(), Some(Call::CreateEnvironment { .. })));
    assert!(
        !calls
            .iter()
            .any(|call| matches!(call, Call::Swap { .. } | Call::Terminate { .. }))
    );
    assert_eq!(platform.status_of("api-aa11bb22"), Some(EnvironmentStatus::Ready));

    let green = platform.created_environment().expect("green created");
    assert!(
        reporter
            .lines()
            .iter()
            .any(|line| line.starts_with('!') && line.contains(&green))
    );
}

#[tokio::test(start_paused = true)]
async fn template_delete_failure_is_fatal() {
    let platform = FakePlatform::with_live_environment().failing_template_delete();
    let reporter = RecordingReporter::default();

    let err = deploy(&platform, &reporter, policy(50))
        .await
        .expect_err("template delete fails");

    assert!(format!("{err:#}").contains("deleting configuration template 'api'"));
    assert_eq!(
        platform.mutating_calls(),
        vec![
            Call::Store {
                bucket: "artifacts".to_owned(),
                key: "api/v42.zip".to_owned(),
            },
            Call::CreateVersion {
                application: "shop".to_owned(),
                label: "v42".to_owned(),
                key: "api/v42.zip".to_owned(),
            },
            Call::DeleteTemplate {
                template: "api".to_owned(),
            },
        ]
    );
    assert!(platform.created_environment().is_none());
}

#[tokio::test(start_paused = true)]
async fn upload_failure_stops_before_registration() {
    let platform = FakePlatform::with_live_environment().failing_store();
    let reporter = RecordingReporter::default();

    let err = deploy(&platform, &reporter, policy(50))
        .await
        .expect_err("upload fails");

    assert!(format!("{err:#}").contains("uploading /tmp/app.zip to s3://artifacts/api/v42.zip"));
    assert_eq!(
        platform.mutating_calls(),
        vec![Call::Store {
            bucket: "artifacts".to_owned(),
            key: "api/v42.zip".to_owned(),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn registration_failure_stops_before_template_refresh() {
    let platform = FakePlatform::with_live_environment().failing_version();
    let reporter = RecordingReporter::default();

    let err = deploy(&platform, &reporter, policy(50))
        .await
        .expect_err("registration fails");

    assert!(format!("{err:#}").contains("registering application version 'v42'"));
    let calls = platform.mutating_calls();
    assert_eq!(calls.len(), 2, "unexpected calls {calls:#?}");
    assert!(matches!(calls.last(), Some(Call::CreateVersion { label, .. }) if label == "v42"));
}

#[tokio::test(start_paused = true)]
async fn unsettled_swap_never_terminates_old_environment() {
    let platform = FakePlatform::with_live_environment().settle_never_ready();
    let reporter = RecordingReporter::default();

    let err = deploy(&platform, &reporter, policy(3))
        .await
        .expect_err("swap never settles");

    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::PollExhausted { what, attempts: 3 }) if what.contains("api-aa11bb22")
    ));
    let calls = platform.mutating_calls();
    assert!(matches!(calls.last(), Some(Call::Swap { .. })));
    assert!(!calls.iter().any(|call| matches!(call, Call::Terminate { .. })));
    assert_eq!(
        platform.status_of("api-aa11bb22"),
        Some(EnvironmentStatus::Updating)
    );
}

#[tokio::test(start_paused = true)]
async fn stalled_termination_reports_exhaustion() {
    let platform = FakePlatform::with_live_environment().terminate_never_completes();
    let reporter = RecordingReporter::default();

    let err = deploy(&platform, &reporter, policy(3))
        .await
        .expect_err("termination never completes");

    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::PollExhausted { what, attempts: 3 })
            if what.contains("api-aa11bb22") && what.contains("Terminated")
    ));
    assert!(matches!(
        platform.mutating_calls().last(),
        Some(Call::Terminate { name }) if name == "api-aa11bb22"
    ));
    assert_eq!(
        platform.status_of("api-aa11bb22"),
        Some(EnvironmentStatus::Terminating)
    );
}
