// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cancellable asynchronous script invocation.
//!
//! An [`Invocation`] is a snapshot of a loaded script, taken synchronously
//! so the run itself can be spawned without borrowing the script or its job.

use sj_adapters::{EngineSession, ScriptEngine};
use sj_core::{OutputRelay, Parameter, ScriptChannel};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Everything one run needs: the script text and its bound parameter values.
#[derive(Debug, Clone)]
pub struct Invocation {
    content: String,
    parameters: Vec<Parameter>,
}

impl Invocation {
    pub(crate) fn new(content: String, parameters: Vec<Parameter>) -> Self {
        Self { content, parameters }
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Run the script to completion inside a fresh engine session.
    ///
    /// Never fails outward: cancellation surfaces as a Warning message equal
    /// to `cancellation_message` and engine faults as an Error message on
    /// the relay. The session is dropped on every exit path, which tears
    /// down the execution context and closes its channels.
    pub async fn run<E: ScriptEngine>(
        self,
        engine: &E,
        relay: &Arc<OutputRelay>,
        cancellation_message: &str,
        token: &CancellationToken,
    ) {
        // Cancelled before start: report and never open a session.
        if token.is_cancelled() {
            relay.add_output(ScriptChannel::Warning, cancellation_message);
            return;
        }

        let (mut session, channels) = match engine.open_session(&self.content, &self.parameters) {
            Ok(opened) => opened,
            Err(e) => {
                relay.add_output(ScriptChannel::Error, e.to_string());
                return;
            }
        };

        // Relay every native channel before execution begins so messages
        // arrive as they are produced.
        for (tag, stream) in channels.into_tagged() {
            relay.subscribe_stream(stream, tag);
        }

        let started = Instant::now();
        tokio::select! {
            _ = token.cancelled() => {
                relay.add_output(ScriptChannel::Warning, cancellation_message);
                tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "invocation cancelled");
            }
            result = session.invoke() => {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                match result {
                    Ok(()) => tracing::info!(elapsed_ms, "invocation completed"),
                    Err(e) => {
                        relay.add_output(ScriptChannel::Error, e.to_string());
                        tracing::error!(error = %e, elapsed_ms, "invocation faulted");
                    }
                }
            }
        }
        // `session` drops here on success, cancel, and fault alike.
    }
}

#[cfg(test)]
#[path = "invoke_tests.rs"]
mod tests;
