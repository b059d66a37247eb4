// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sj-adapters: boundaries to the script engine and the filesystem.

pub mod engine;
pub mod loader;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use engine::{EngineChannels, EngineError, EngineSession, ScriptEngine};
pub use loader::{FileLoader, FsLoader, LoadError};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeBehavior, FakeEngine, FakeLoader};
