// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script-engine contract.
//!
//! A concrete engine executes opaque script text inside a fresh, locked-down,
//! single-threaded session and produces items on five native output channels.
//! Sessions are single-use: one is opened per invocation and torn down by
//! dropping it, so no state leaks between runs.

use async_trait::async_trait;
use sj_core::{Parameter, ScriptChannel};
use thiserror::Error;
use tokio::sync::mpsc;

/// Faults raised by the engine boundary. Cancellation is not an error here;
/// it is signalled through the caller's cancellation token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("failed to open session: {0}")]
    SessionOpen(String),
    #[error("{0}")]
    Execution(String),
}

/// The native output channels of one session, handed over at open time so
/// the relay sees messages as they are produced rather than after the run
/// completes.
#[derive(Debug)]
pub struct EngineChannels {
    pub output: mpsc::UnboundedReceiver<String>,
    pub information: mpsc::UnboundedReceiver<String>,
    pub progress: mpsc::UnboundedReceiver<String>,
    pub warning: mpsc::UnboundedReceiver<String>,
    pub error: mpsc::UnboundedReceiver<String>,
}

impl EngineChannels {
    /// Consume into `(tag, receiver)` pairs in canonical channel order.
    pub fn into_tagged(self) -> [(ScriptChannel, mpsc::UnboundedReceiver<String>); 5] {
        [
            (ScriptChannel::Output, self.output),
            (ScriptChannel::Information, self.information),
            (ScriptChannel::Progress, self.progress),
            (ScriptChannel::Warning, self.warning),
            (ScriptChannel::Error, self.error),
        ]
    }
}

/// Factory for isolated execution sessions.
pub trait ScriptEngine: Send + Sync + 'static {
    type Session: EngineSession + 'static;

    /// Open a fresh session holding the script text and its bound parameter
    /// values, returning the session together with its native channels.
    fn open_session(
        &self,
        content: &str,
        parameters: &[Parameter],
    ) -> Result<(Self::Session, EngineChannels), EngineError>;
}

/// One isolated execution context. Dropping the session tears it down and
/// closes its channels; no item can be delivered afterwards.
#[async_trait]
pub trait EngineSession: Send {
    /// Drive the script to completion.
    async fn invoke(&mut self) -> Result<(), EngineError>;
}
