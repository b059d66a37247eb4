// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job registry, run orchestration, and the bounded run history.

use crate::config::ServiceConfig;
use crate::error::JobError;
use crate::job::ScriptJob;
use parking_lot::Mutex;
use sj_adapters::ScriptEngine;
use sj_core::{Clock, OutputRelay};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Default capacity of the run-result history.
pub const MAX_RESULTS: usize = 50;

/// Record of one run: its id, the job it ran, when it started, and the relay
/// holding its transcript. Never mutated after creation; destroyed only by
/// eviction from the history.
#[derive(Debug, Clone)]
pub struct RunResult {
    result_id: u64,
    job: Arc<ScriptJob>,
    started_at_ms: u64,
    relay: Arc<OutputRelay>,
}

impl RunResult {
    /// Monotonic id, assigned across all runs regardless of job identity.
    pub fn result_id(&self) -> u64 {
        self.result_id
    }

    pub fn job(&self) -> &Arc<ScriptJob> {
        &self.job
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    /// The transcript of this run, live while the run is still executing.
    pub fn relay(&self) -> &Arc<OutputRelay> {
        &self.relay
    }
}

/// Registry, history, and the id counter in one place so id assignment and
/// eviction stay atomic per run.
#[derive(Default)]
struct ServiceState {
    jobs: HashMap<String, Arc<ScriptJob>>,
    results: VecDeque<RunResult>,
    next_result_id: u64,
}

/// Registry of jobs by id plus a bounded, ordered history of run results.
///
/// Runs are fire-and-forget: `run_job` starts the invocation and returns the
/// already-recorded result immediately; callers observe ongoing progress
/// through the relay's change notifications.
pub struct JobService<E, C: Clock> {
    engine: Arc<E>,
    clock: C,
    config: ServiceConfig,
    state: Mutex<ServiceState>,
}

impl<E: ScriptEngine, C: Clock> JobService<E, C> {
    pub fn new(engine: Arc<E>, clock: C) -> Self {
        Self::with_config(engine, clock, ServiceConfig::default())
    }

    pub fn with_config(engine: Arc<E>, clock: C, config: ServiceConfig) -> Self {
        Self {
            engine,
            clock,
            config,
            state: Mutex::new(ServiceState::default()),
        }
    }

    /// Register a job under its caller-assigned id. Rejects an empty id and
    /// an id that is already registered.
    pub fn add_job(&self, job: ScriptJob) -> Result<Arc<ScriptJob>, JobError> {
        if job.id().is_empty() {
            return Err(JobError::EmptyJobId);
        }
        let mut state = self.state.lock();
        if state.jobs.contains_key(job.id()) {
            return Err(JobError::DuplicateJob(job.id().to_string()));
        }
        let job = Arc::new(job);
        state.jobs.insert(job.id().to_string(), Arc::clone(&job));
        Ok(job)
    }

    /// Start a run of `job` bound to `relay` and `token`, without awaiting
    /// completion, and record its result in the history.
    ///
    /// Invoking a script that is not loaded fails here, before anything is
    /// spawned or recorded. Everything that goes wrong later in the run is
    /// visible only in the result's transcript.
    pub fn run_job(
        &self,
        job: &Arc<ScriptJob>,
        relay: Arc<OutputRelay>,
        token: CancellationToken,
    ) -> Result<RunResult, JobError> {
        let invocation = job.script().invocation()?;

        let engine = Arc::clone(&self.engine);
        let run_relay = Arc::clone(&relay);
        let cancellation_message = self.config.render_cancellation_message(job.id());
        tokio::spawn(async move {
            invocation
                .run(engine.as_ref(), &run_relay, &cancellation_message, &token)
                .await;
        });

        let started_at_ms = self.clock.epoch_ms();
        job.mark_run(started_at_ms);

        let mut state = self.state.lock();
        let result = RunResult {
            result_id: state.next_result_id,
            job: Arc::clone(job),
            started_at_ms,
            relay,
        };
        state.next_result_id += 1;
        state.results.push_back(result.clone());
        // Oldest-first eviction keeps the newest `max_results` entries.
        if state.results.len() > self.config.max_results {
            state.results.pop_front();
        }
        tracing::info!(
            job_id = %result.job.id(),
            result_id = result.result_id,
            "run started"
        );
        Ok(result)
    }

    pub fn try_get_job(&self, id: &str) -> Option<Arc<ScriptJob>> {
        self.state.lock().jobs.get(id).cloned()
    }

    pub fn has_job(&self, id: &str) -> bool {
        self.state.lock().jobs.contains_key(id)
    }

    /// Positional lookup into the history; position 0 is the oldest retained
    /// entry, which diverges from the assigned result id once eviction has
    /// occurred.
    pub fn get_job_result(&self, index: usize) -> Result<RunResult, JobError> {
        let state = self.state.lock();
        state
            .results
            .get(index)
            .cloned()
            .ok_or(JobError::ResultOutOfBounds {
                index,
                len: state.results.len(),
            })
    }

    /// Lookup by assigned result id; unlike positions, ids stay stable
    /// across eviction.
    pub fn find_result(&self, result_id: u64) -> Option<RunResult> {
        self.state
            .lock()
            .results
            .iter()
            .find(|r| r.result_id == result_id)
            .cloned()
    }

    pub fn result_count(&self) -> usize {
        self.state.lock().results.len()
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
