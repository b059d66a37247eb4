// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service configuration.

use crate::service::MAX_RESULTS;
use serde::{Deserialize, Serialize};

/// Tunables for the job service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Retained run results; the oldest entry is evicted beyond this bound.
    pub max_results: usize,
    /// Template for the Warning pushed on cancellation. `{job}` expands to
    /// the job id.
    pub cancellation_message: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULTS,
            cancellation_message: "Job {job} was cancelled".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Render the cancellation message for one job.
    pub(crate) fn render_cancellation_message(&self, job_id: &str) -> String {
        self.cancellation_message.replace("{job}", job_id)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
