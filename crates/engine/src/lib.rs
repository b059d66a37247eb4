// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sj-engine: automation-script lifecycle, cancellable invocation, and the
//! job service with its bounded run history.

pub mod config;
pub mod error;
pub mod invoke;
pub mod job;
pub mod script;
pub mod service;

pub use config::ServiceConfig;
pub use error::JobError;
pub use invoke::Invocation;
pub use job::ScriptJob;
pub use script::{AutomationScript, LoadState};
pub use service::{JobService, RunResult, MAX_RESULTS};
