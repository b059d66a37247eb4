// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output channel tags for script execution streams.

use serde::{Deserialize, Serialize};

/// One of the five independent output categories a script engine produces.
///
/// Ordering is only meaningful within a channel; the relay makes no
/// cross-channel ordering guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptChannel {
    Output,
    Information,
    Progress,
    Warning,
    Error,
}

impl ScriptChannel {
    /// All channels, in the order an engine session exposes them.
    pub const ALL: [ScriptChannel; 5] = [
        ScriptChannel::Output,
        ScriptChannel::Information,
        ScriptChannel::Progress,
        ScriptChannel::Warning,
        ScriptChannel::Error,
    ];

    /// Stable index for per-channel bookkeeping.
    pub(crate) fn index(self) -> usize {
        match self {
            ScriptChannel::Output => 0,
            ScriptChannel::Information => 1,
            ScriptChannel::Progress => 2,
            ScriptChannel::Warning => 3,
            ScriptChannel::Error => 4,
        }
    }
}

crate::simple_display! {
    ScriptChannel {
        Output => "output",
        Information => "information",
        Progress => "progress",
        Warning => "warning",
        Error => "error",
    }
}

#[cfg(test)]
#[path = "channel_tests.rs"]
mod tests;
