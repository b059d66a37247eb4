// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Automation script: content, load-state machine, and its parameter list.

use crate::error::JobError;
use crate::invoke::Invocation;
use serde::{Deserialize, Serialize};
use sj_adapters::{FileLoader, ScriptEngine};
use sj_core::{introspect, Clock, OutputRelay, ParameterList, ScriptChannel};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Load state of a script.
///
/// `Unloaded → Loaded` on a successful load, any read or parse error moves
/// to `Failed`, and a later successful refresh recovers `Failed → Loaded`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Unloaded,
    Loaded,
    Failed,
}

sj_core::simple_display! {
    LoadState {
        Unloaded => "unloaded",
        Loaded => "loaded",
        Failed => "failed",
    }
}

/// An externally authored, parameterizable script bound to an engine at
/// invocation time. The parameter list exists only while the script is in
/// the `Loaded` state.
#[derive(Debug, Clone, Default)]
pub struct AutomationScript {
    content: String,
    path: Option<PathBuf>,
    state: LoadState,
    parameters: Option<ParameterList>,
    last_error: Option<String>,
}

impl AutomationScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `path` through `loader`, remember it as the origin, and parse
    /// the parameter header. Read or parse failures downgrade the state to
    /// `Failed` instead of propagating; returns whether the script ended up
    /// loaded.
    pub fn load(
        &mut self,
        loader: &dyn FileLoader,
        path: impl Into<PathBuf>,
        clock: &impl Clock,
    ) -> bool {
        let path = path.into();
        self.path = Some(path.clone());
        match loader.read(&path) {
            Ok(content) => self.load_from_string(content, clock),
            Err(e) => {
                self.fail(e.to_string());
                false
            }
        }
    }

    /// Parse `content` directly, without touching the origin path.
    pub fn load_from_string(&mut self, content: impl Into<String>, clock: &impl Clock) -> bool {
        self.content = content.into();
        match introspect(&self.content, clock.today()) {
            Ok(parameters) => {
                self.parameters = Some(parameters);
                self.state = LoadState::Loaded;
                self.last_error = None;
                true
            }
            Err(e) => {
                self.fail(e.to_string());
                false
            }
        }
    }

    /// Reload and reparse from the stored origin path, exactly as `load`.
    /// A script that never had a file origin fails without a state change.
    pub fn refresh(&mut self, loader: &dyn FileLoader, clock: &impl Clock) -> bool {
        match self.path.clone() {
            Some(path) => self.load(loader, path, clock),
            None => false,
        }
    }

    fn fail(&mut self, reason: String) {
        self.state = LoadState::Failed;
        self.parameters = None;
        self.last_error = Some(reason);
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Why the last load or refresh failed, if it did.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn parameters(&self) -> Option<&ParameterList> {
        self.parameters.as_ref()
    }

    /// Mutable access for binding values before invocation.
    pub fn parameters_mut(&mut self) -> Option<&mut ParameterList> {
        self.parameters.as_mut()
    }

    /// Invoke the script once through `engine`, relaying output into
    /// `relay`.
    ///
    /// Cancellation already signalled at entry short-circuits to a single
    /// Warning message without starting execution. Invoking a script that is
    /// not loaded is the one fault that propagates; every run-time fault and
    /// cancellation is rendered into the relay instead.
    pub async fn invoke_async<E: ScriptEngine>(
        &self,
        engine: &E,
        relay: &Arc<OutputRelay>,
        cancellation_message: &str,
        token: &CancellationToken,
    ) -> Result<(), JobError> {
        if token.is_cancelled() {
            relay.add_output(ScriptChannel::Warning, cancellation_message);
            return Ok(());
        }
        self.invocation()?
            .run(engine, relay, cancellation_message, token)
            .await;
        Ok(())
    }

    /// Snapshot everything one invocation needs. Fails when the script is
    /// not in the `Loaded` state; this is the only fault of an invocation
    /// that propagates to the caller.
    pub fn invocation(&self) -> Result<Invocation, JobError> {
        if !self.is_loaded() {
            return Err(JobError::ScriptNotLoaded);
        }
        Ok(Invocation::new(
            self.content.clone(),
            self.parameters
                .as_ref()
                .map(|list| list.as_slice().to_vec())
                .unwrap_or_default(),
        ))
    }
}

impl fmt::Display for AutomationScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
