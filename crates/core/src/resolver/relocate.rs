// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Prefix-rewriting resolver

use super::{identity_path, PathResolver};
use crate::config::Relocation;
use std::path::{Path, PathBuf};

/// Moves everything under `source` to the same relative place under `destination`.
///
/// Prefix matching is component-wise, so `/a` matches `/a/x` but not `/ab/x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocatingResolver {
    source: PathBuf,
    destination: PathBuf,
}

impl RelocatingResolver {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn from_relocation(relocation: &Relocation) -> Self {
        Self::new(&relocation.source, &relocation.destination)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Rewrite a complete path, or `None` if it is outside `source`
    pub fn relocate(&self, path: &Path) -> Option<PathBuf> {
        let rest = path.strip_prefix(&self.source).ok()?;
        if rest.as_os_str().is_empty() {
            return Some(self.destination.clone());
        }
        Some(self.destination.join(rest))
    }
}

impl PathResolver for RelocatingResolver {
    fn name(&self) -> &str {
        "relocate"
    }

    fn resolve(&self, base: &Path, segments: &[&str]) -> Option<PathBuf> {
        self.relocate(&identity_path(base, segments))
    }
}

#[cfg(test)]
#[path = "relocate_tests.rs"]
mod tests;
