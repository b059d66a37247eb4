// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File loading boundary: path in, full text or a failure out.

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },
}

/// Opaque source of script text. Callers treat a read failure the same as a
/// parse failure.
pub trait FileLoader: Send + Sync {
    fn read(&self, path: &Path) -> Result<String, LoadError>;
}

/// Loader over the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl FileLoader for FsLoader {
    fn read(&self, path: &Path) -> Result<String, LoadError> {
        std::fs::read_to_string(path).map_err(|e| LoadError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
