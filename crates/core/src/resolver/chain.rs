// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered resolver chain with an optional trailing default

use super::{identity_path, PathResolver};
use crate::id::LogicalFileId;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

#[derive(Default)]
struct Entries {
    handlers: Vec<Arc<dyn PathResolver>>,
    default: Option<Arc<dyn PathResolver>>,
}

impl Entries {
    fn ordered(&self) -> impl Iterator<Item = &Arc<dyn PathResolver>> {
        self.handlers.iter().chain(self.default.iter())
    }
}

/// Chain of path resolvers, tried in order; the first match wins.
///
/// Insertion policy: [`ResolverChain::add`] places a handler after every
/// previously added handler but before the default, so the default set with
/// [`ResolverChain::set_default`] is always tried last. Resolution never
/// fails: when nothing matches, the identity path is used.
///
/// The chain is shared between many writer sessions and mutated rarely, so
/// handlers live behind a read/write lock.
#[derive(Default)]
pub struct ResolverChain {
    entries: RwLock<Entries>,
}

impl ResolverChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// A chain holding only `default`
    pub fn with_default(default: Arc<dyn PathResolver>) -> Self {
        let chain = Self::new();
        chain.set_default(Some(default));
        chain
    }

    /// Insert a handler immediately before the default (or at the end if there is none)
    pub fn add(&self, handler: Arc<dyn PathResolver>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.handlers.push(handler);
    }

    /// Replace the trailing default handler
    pub fn set_default(&self, default: Option<Arc<dyn PathResolver>>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.default = default;
    }

    pub fn has_default(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .default
            .is_some()
    }

    /// Remove every handler, including the default
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        *entries = Entries::default();
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.handlers.len() + usize::from(entries.default.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Handler names in the order they are consulted
    pub fn names(&self) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.ordered().map(|h| h.name().to_string()).collect()
    }

    /// First handler match, without the identity fallback
    pub fn try_resolve(&self, base: &Path, segments: &[&str]) -> Option<PathBuf> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        for handler in entries.ordered() {
            if let Some(resolved) = handler.resolve(base, segments) {
                let requested = identity_path(base, segments);
                if resolved != requested {
                    tracing::debug!(
                        resolver = handler.name(),
                        requested = %requested.display(),
                        resolved = %resolved.display(),
                        "path resolved to alternate location"
                    );
                }
                return Some(resolved);
            }
        }
        None
    }

    /// Resolve to a definite path, falling back to identity
    pub fn resolve(&self, base: &Path, segments: &[&str]) -> PathBuf {
        self.try_resolve(base, segments)
            .unwrap_or_else(|| identity_path(base, segments))
    }

    /// Resolve a logical file below `root`
    pub fn resolve_id(&self, root: &Path, id: &LogicalFileId) -> PathBuf {
        self.resolve(root, &id.segments())
    }
}

impl fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverChain")
            .field("order", &self.names())
            .finish()
    }
}

#[cfg(test)]
#[path = "chain_tests.rs"]
mod tests;
