// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Script jobs: named, reusable bindings of a script plus metadata.

use crate::script::AutomationScript;
use parking_lot::{Mutex, MutexGuard};
use std::fmt;

/// A named binding of a script, independent of any one execution.
///
/// Identity is immutable after registration. The script and the
/// last-execution timestamp sit behind locks so concurrent runs can share
/// the job through an `Arc`.
pub struct ScriptJob {
    id: String,
    description: Option<String>,
    script: Mutex<AutomationScript>,
    last_run_ms: Mutex<Option<u64>>,
}

impl ScriptJob {
    pub fn new(id: impl Into<String>, script: AutomationScript) -> Self {
        Self {
            id: id.into(),
            description: None,
            script: Mutex::new(script),
            last_run_ms: Mutex::new(None),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Exclusive access to the job's script.
    pub fn script(&self) -> MutexGuard<'_, AutomationScript> {
        self.script.lock()
    }

    /// Epoch milliseconds of the most recent run start, if any.
    pub fn last_run_ms(&self) -> Option<u64> {
        *self.last_run_ms.lock()
    }

    pub(crate) fn mark_run(&self, epoch_ms: u64) {
        *self.last_run_ms.lock() = Some(epoch_ms);
    }
}

impl fmt::Debug for ScriptJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptJob")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("last_run_ms", &self.last_run_ms())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
