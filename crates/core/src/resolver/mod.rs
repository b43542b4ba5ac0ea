// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logical-to-physical path resolution
//!
//! ```text
//! (base, segments) → ResolverChain → [handler, handler, ..., default] → PathBuf
//!                                                  ↓ (no match)
//!                                         identity: base/segments...
//! ```

mod chain;
mod registry;
mod relocate;

pub use chain::ResolverChain;
pub use registry::{ResolverConstructor, ResolverRegistry};
pub use relocate::RelocatingResolver;

use std::fmt;
use std::path::{Path, PathBuf};

/// A single handler in the resolver chain.
///
/// Returning `None` means "not mine" and lets the chain try the next handler.
pub trait PathResolver: fmt::Debug + Send + Sync {
    /// Short name used in diagnostics and ordering introspection
    fn name(&self) -> &str;

    /// Rewrite the path formed by `base` and `segments`, if this handler applies
    fn resolve(&self, base: &Path, segments: &[&str]) -> Option<PathBuf>;
}

/// The identity mapping: `base` joined with every segment in order
pub fn identity_path(base: &Path, segments: &[&str]) -> PathBuf {
    let mut path = base.to_path_buf();
    for segment in segments {
        path.push(segment);
    }
    path
}
