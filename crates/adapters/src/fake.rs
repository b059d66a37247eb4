// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake engine and loader for other crates' tests.

use crate::engine::{EngineChannels, EngineError, EngineSession, ScriptEngine};
use crate::loader::{FileLoader, LoadError};
use async_trait::async_trait;
use parking_lot::Mutex;
use sj_core::Parameter;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

/// What a [`FakeEngine`] session does when invoked.
#[derive(Debug, Clone, Default)]
pub struct FakeBehavior {
    /// Lines emitted on the output channel, in order.
    pub output: Vec<String>,
    /// Lines emitted on the progress channel, in order.
    pub progress: Vec<String>,
    /// Fault message the run fails with after emitting its lines.
    pub fail_with: Option<String>,
    /// Refuse to open a session with this message.
    pub refuse_open: Option<String>,
    /// Time the session spends "executing" before completing.
    pub delay: Option<Duration>,
}

impl FakeBehavior {
    pub fn emitting(lines: &[&str]) -> Self {
        Self {
            output: lines.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn sleeping(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }
}

/// Script engine that replays a scripted behavior instead of executing
/// anything, recording what each opened session was given.
#[derive(Default)]
pub struct FakeEngine {
    behavior: FakeBehavior,
    opened: Mutex<Vec<Vec<Parameter>>>,
}

impl FakeEngine {
    pub fn new(behavior: FakeBehavior) -> Self {
        Self {
            behavior,
            opened: Mutex::new(Vec::new()),
        }
    }

    /// Number of sessions opened so far.
    pub fn sessions_opened(&self) -> usize {
        self.opened.lock().len()
    }

    /// Parameters bound into each opened session, in open order.
    pub fn bound_parameters(&self) -> Vec<Vec<Parameter>> {
        self.opened.lock().clone()
    }
}

#[derive(Debug)]
pub struct FakeSession {
    behavior: FakeBehavior,
    output: mpsc::UnboundedSender<String>,
    progress: mpsc::UnboundedSender<String>,
}

impl ScriptEngine for FakeEngine {
    type Session = FakeSession;

    fn open_session(
        &self,
        _content: &str,
        parameters: &[Parameter],
    ) -> Result<(Self::Session, EngineChannels), EngineError> {
        if let Some(reason) = &self.behavior.refuse_open {
            return Err(EngineError::SessionOpen(reason.clone()));
        }
        self.opened.lock().push(parameters.to_vec());

        let (output_tx, output) = mpsc::unbounded_channel();
        let (information_tx, information) = mpsc::unbounded_channel();
        let (progress_tx, progress) = mpsc::unbounded_channel();
        let (warning_tx, warning) = mpsc::unbounded_channel();
        let (error_tx, error) = mpsc::unbounded_channel();
        // Unused senders drop with the session, closing their channels.
        drop((information_tx, warning_tx, error_tx));

        let session = FakeSession {
            behavior: self.behavior.clone(),
            output: output_tx,
            progress: progress_tx,
        };
        let channels = EngineChannels {
            output,
            information,
            progress,
            warning,
            error,
        };
        Ok((session, channels))
    }
}

#[async_trait]
impl EngineSession for FakeSession {
    async fn invoke(&mut self) -> Result<(), EngineError> {
        for line in &self.behavior.output {
            let _ = self.output.send(line.clone());
        }
        for line in &self.behavior.progress {
            let _ = self.progress.send(line.clone());
        }
        if let Some(delay) = self.behavior.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.behavior.fail_with {
            Some(message) => Err(EngineError::Execution(message.clone())),
            None => Ok(()),
        }
    }
}

/// In-memory loader keyed by path.
#[derive(Default)]
pub struct FakeLoader {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl FakeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.lock().insert(path.into(), content.into());
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        self.files.lock().remove(path.as_ref());
    }
}

impl FileLoader for FakeLoader {
    fn read(&self, path: &Path) -> Result<String, LoadError> {
        self.files
            .lock()
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::Read {
                path: path.display().to_string(),
                reason: "no such file".to_string(),
            })
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
