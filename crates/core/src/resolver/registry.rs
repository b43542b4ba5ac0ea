// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named constructors for configurable resolvers
//!
//! Configuration names a resolver by `kind`; the registry maps that name to a
//! constructor. Builders register additional kinds before the chain is built.

use super::{PathResolver, RelocatingResolver, ResolverChain};
use crate::config::{ConfigError, IoConfig, ResolverSpec};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Builds a resolver from its configuration entry
pub type ResolverConstructor =
    Arc<dyn Fn(&ResolverSpec) -> Result<Arc<dyn PathResolver>, ConfigError> + Send + Sync>;

/// Map from resolver kind to constructor
#[derive(Clone)]
pub struct ResolverRegistry {
    constructors: BTreeMap<String, ResolverConstructor>,
}

impl ResolverRegistry {
    /// Registry with no kinds at all
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Registry with the built-in `relocate` kind
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("relocate", build_relocate);
        registry
    }

    /// Register (or replace) the constructor for `kind`
    pub fn register<F>(&mut self, kind: impl Into<String>, constructor: F)
    where
        F: Fn(&ResolverSpec) -> Result<Arc<dyn PathResolver>, ConfigError> + Send + Sync + 'static,
    {
        self.constructors.insert(kind.into(), Arc::new(constructor));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    pub fn kinds(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    /// Construct one resolver from its configuration entry
    pub fn build(&self, spec: &ResolverSpec) -> Result<Arc<dyn PathResolver>, ConfigError> {
        let constructor = self
            .constructors
            .get(&spec.kind)
            .ok_or_else(|| ConfigError::UnknownResolver(spec.kind.clone()))?;
        constructor(spec)
    }

    /// Build the chain described by `config`.
    ///
    /// Plugins from `config.resolvers` are added in order; `path_relocation`,
    /// when present, becomes the trailing default.
    pub fn build_chain(&self, config: &IoConfig) -> Result<ResolverChain, ConfigError> {
        let chain = ResolverChain::new();
        for spec in &config.resolvers {
            chain.add(self.build(spec)?);
        }
        if let Some(relocation) = &config.path_relocation {
            let default: Arc<dyn PathResolver> =
                Arc::new(RelocatingResolver::from_relocation(relocation));
            chain.set_default(Some(default));
        }
        tracing::debug!(order = ?chain.names(), "built resolver chain");
        Ok(chain)
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

fn build_relocate(spec: &ResolverSpec) -> Result<Arc<dyn PathResolver>, ConfigError> {
    match (&spec.source, &spec.destination) {
        (Some(source), Some(destination)) => {
            Ok(Arc::new(RelocatingResolver::new(source, destination)))
        }
        _ => Err(ConfigError::InvalidResolver {
            kind: spec.kind.clone(),
            reason: "both source and destination are required".to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
