// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors that propagate to callers of the job API.

use thiserror::Error;

/// API-misuse failures. Faults originating from a script's own execution
/// never appear here; they are rendered into the run's transcript so the
/// job framework stays alive across failing runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("job registered without an id")]
    EmptyJobId,
    #[error("job already registered: {0}")]
    DuplicateJob(String),
    #[error("attempt to invoke a script that was not loaded")]
    ScriptNotLoaded,
    #[error("result index {index} out of bounds (history length {len})")]
    ResultOutOfBounds { index: usize, len: usize },
}
