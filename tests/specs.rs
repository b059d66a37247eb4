//! Workspace-level specs for the script-job subsystem.
//!
//! Exercise the full register → run → observe → history flow against the
//! fake engine, covering the externally observable properties of the job
//! service, the invocation contract, and parameter introspection.

use sj_adapters::{FakeBehavior, FakeEngine, FakeLoader};
use sj_core::{FakeClock, OutputRelay, ParameterKind, ParameterValue, ScriptChannel};
use sj_engine::{AutomationScript, JobError, JobService, LoadState, ScriptJob, MAX_RESULTS};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const PING: &str = r#"
param(
    [Parameter(Mandatory)]
    [string]$Target
)
Test-Connection -TargetName $Target
"#;

fn loaded(content: &str) -> AutomationScript {
    let mut script = AutomationScript::new();
    assert!(script.load_from_string(content, &FakeClock::new()));
    script
}

/// Poll until the relay holds at least `n` messages or a deadline passes.
async fn wait_for_messages(relay: &OutputRelay, n: usize) {
    for _ in 0..400 {
        if relay.len() >= n {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("relay never reached {n} messages: {:?}", relay.messages());
}

#[tokio::test]
async fn run_streams_output_while_history_records_the_result() {
    let engine = Arc::new(FakeEngine::new(FakeBehavior::emitting(&["pong 1", "pong 2"])));
    let service = JobService::new(Arc::clone(&engine), FakeClock::new());

    let job = service
        .add_job(ScriptJob::new("Ping", loaded(PING)).with_description("Reachability probe"))
        .unwrap();
    job.script()
        .parameters_mut()
        .unwrap()
        .set_value("Target", ParameterValue::Text("web-01".into()));

    let relay = Arc::new(OutputRelay::new());
    let result = service
        .run_job(&job, Arc::clone(&relay), CancellationToken::new())
        .unwrap();
    assert_eq!(result.result_id(), 0);

    // The run was not awaited; messages arrive through the relay.
    wait_for_messages(&relay, 2).await;
    let output = relay.messages_for(ScriptChannel::Output);
    assert_eq!(output[0].text, "pong 1");
    assert_eq!(output[1].text, "pong 2");
    assert_eq!(output[1].seq, 1);

    // The bound parameter value reached the engine.
    let bound = engine.bound_parameters();
    assert_eq!(bound[0][0].value(), Some(&ParameterValue::Text("web-01".into())));

    // The same transcript is reachable through the recorded result.
    assert_eq!(service.get_job_result(0).unwrap().relay().len(), relay.len());
}

#[tokio::test]
async fn change_notifications_fire_as_messages_arrive() {
    let service = JobService::new(
        Arc::new(FakeEngine::new(FakeBehavior::emitting(&["line"]))),
        FakeClock::new(),
    );
    let job = service.add_job(ScriptJob::new("Noisy", loaded(PING))).unwrap();

    let relay = Arc::new(OutputRelay::new());
    let seen = Arc::new(counter::Counter::default());
    let sink = Arc::clone(&seen);
    relay.on_change(move |_| sink.increment());

    service
        .run_job(&job, Arc::clone(&relay), CancellationToken::new())
        .unwrap();
    wait_for_messages(&relay, 1).await;
    assert!(seen.get() >= 1);
}

/// Minimal atomic counter for observing change notifications.
mod counter {
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    pub struct Counter(AtomicUsize);

    impl Counter {
        pub fn increment(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }

        pub fn get(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }
}

#[tokio::test]
async fn ping_scenario_ids_and_fifo_eviction() {
    let service = JobService::new(Arc::new(FakeEngine::default()), FakeClock::new());
    let job = service.add_job(ScriptJob::new("Ping", loaded(PING))).unwrap();

    let first = service
        .run_job(&job, Arc::new(OutputRelay::new()), CancellationToken::new())
        .unwrap();
    assert_eq!(first.result_id(), 0);

    let second = service
        .run_job(&job, Arc::new(OutputRelay::new()), CancellationToken::new())
        .unwrap();
    assert_eq!(second.result_id(), 1);

    for _ in 2..51 {
        service
            .run_job(&job, Arc::new(OutputRelay::new()), CancellationToken::new())
            .unwrap();
    }

    // Oldest-evicted: result 0 is gone and position 0 holds its replacement.
    assert_eq!(service.result_count(), MAX_RESULTS);
    assert_eq!(service.get_job_result(0).unwrap().result_id(), 1);
    assert!(service.find_result(0).is_none());
    assert_eq!(service.find_result(1).unwrap().result_id(), 1);
}

#[tokio::test]
async fn cancelling_before_start_yields_exactly_one_warning() {
    let service = JobService::new(
        Arc::new(FakeEngine::new(FakeBehavior::emitting(&["never"]))),
        FakeClock::new(),
    );
    let job = service.add_job(ScriptJob::new("Slow", loaded(PING))).unwrap();

    let relay = Arc::new(OutputRelay::new());
    let token = CancellationToken::new();
    token.cancel();
    service.run_job(&job, Arc::clone(&relay), token).unwrap();

    wait_for_messages(&relay, 1).await;
    let messages = relay.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].channel, ScriptChannel::Warning);
    assert_eq!(messages[0].text, "Job Slow was cancelled");
    assert!(relay.messages_for(ScriptChannel::Error).is_empty());
}

#[tokio::test]
async fn cancelling_mid_run_suppresses_the_fault() {
    let service = JobService::new(
        Arc::new(FakeEngine::new(FakeBehavior::sleeping(Duration::from_secs(30)))),
        FakeClock::new(),
    );
    let job = service.add_job(ScriptJob::new("Slow", loaded(PING))).unwrap();

    let relay = Arc::new(OutputRelay::new());
    let token = CancellationToken::new();
    service
        .run_job(&job, Arc::clone(&relay), token.clone())
        .unwrap();

    tokio::time::sleep(Duration::from_millis(20)).await;
    token.cancel();
    wait_for_messages(&relay, 1).await;

    let warnings = relay.messages_for(ScriptChannel::Warning);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].text, "Job Slow was cancelled");
    assert!(relay.messages_for(ScriptChannel::Error).is_empty());
}

#[tokio::test]
async fn failing_run_keeps_the_service_alive() {
    let service = JobService::new(
        Arc::new(FakeEngine::new(FakeBehavior::failing("access denied"))),
        FakeClock::new(),
    );
    let job = service.add_job(ScriptJob::new("Flaky", loaded(PING))).unwrap();

    let relay = Arc::new(OutputRelay::new());
    let result = service
        .run_job(&job, Arc::clone(&relay), CancellationToken::new())
        .unwrap();
    wait_for_messages(&relay, 1).await;

    // The failure is visible only in the transcript.
    let errors = result.relay().messages_for(ScriptChannel::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].text, "access denied");

    // The framework is still alive for the next run.
    let next = service
        .run_job(&job, Arc::new(OutputRelay::new()), CancellationToken::new())
        .unwrap();
    assert_eq!(next.result_id(), 1);
}

#[tokio::test]
async fn unloaded_script_propagates_instead_of_recording() {
    let service = JobService::new(Arc::new(FakeEngine::default()), FakeClock::new());
    let job = service
        .add_job(ScriptJob::new("Broken", AutomationScript::new()))
        .unwrap();

    let err = service
        .run_job(&job, Arc::new(OutputRelay::new()), CancellationToken::new())
        .unwrap_err();
    assert_eq!(err, JobError::ScriptNotLoaded);
    assert_eq!(service.result_count(), 0);
}

#[test]
fn broken_header_recovers_through_refresh() {
    let loader = FakeLoader::new();
    let clock = FakeClock::new();
    loader.insert("/scripts/report.ps1", "param([string]$Name\n");

    let mut script = AutomationScript::new();
    assert!(!script.load(&loader, "/scripts/report.ps1", &clock));
    assert_eq!(script.state(), LoadState::Failed);
    assert!(script.parameters().is_none());

    loader.insert("/scripts/report.ps1", "param([string]$Name)\n");
    assert!(script.refresh(&loader, &clock));
    assert_eq!(script.state(), LoadState::Loaded);
    assert_eq!(script.parameters().unwrap().len(), 1);
}

#[test]
fn integer_array_parameter_normalizes_to_string_sequence() {
    let script = loaded("param([int[]]$Servers)\nRestart-Server $Servers\n");
    let servers = script.parameters().unwrap().get("Servers").unwrap();
    assert_eq!(servers.kind, ParameterKind::StringList);
    assert_eq!(servers.value(), Some(&ParameterValue::StringList(Vec::new())));
}

#[test]
fn date_parameter_defaults_to_the_clock_date() {
    let clock = FakeClock::new();
    let date = chrono_date(2026, 8, 25);
    clock.set_today(date);

    let mut script = AutomationScript::new();
    assert!(script.load_from_string("param([datetime]$Since)", &clock));
    assert_eq!(
        script.parameters().unwrap().get("Since").unwrap().value(),
        Some(&ParameterValue::Date(date))
    );
}

fn chrono_date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
