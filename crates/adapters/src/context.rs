// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared I/O context: configuration, resolver chain and channel factory

use crate::factory::{ChannelFactory, CompositeChannelFactory, PathChannelFactory};
use crate::traced::TracedChannelFactory;
use sstio_core::{ConfigError, IoConfig, PathResolver, RelocatingResolver, ResolverChain, ResolverRegistry};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Owns the process-level I/O collaborators.
///
/// The chain and factory are built from the configuration on first use and
/// can be replaced or reset afterwards. Handles already given out keep
/// whatever they were built with.
pub struct IoContext {
    config: IoConfig,
    registry: ResolverRegistry,
    chain: RwLock<Option<Arc<ResolverChain>>>,
    factory: RwLock<Option<Arc<dyn ChannelFactory>>>,
}

impl IoContext {
    pub fn new(config: IoConfig) -> Self {
        Self::with_registry(config, ResolverRegistry::with_builtins())
    }

    pub fn with_registry(config: IoConfig, registry: ResolverRegistry) -> Self {
        Self {
            config,
            registry,
            chain: RwLock::new(None),
            factory: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &IoConfig {
        &self.config
    }

    pub fn registry(&self) -> &ResolverRegistry {
        &self.registry
    }

    /// The active resolver chain, built from the configuration if unset
    pub fn chain(&self) -> Result<Arc<ResolverChain>, ConfigError> {
        if let Some(chain) = self.chain.read().unwrap_or_else(|e| e.into_inner()).as_ref() {
            return Ok(Arc::clone(chain));
        }

        let mut slot = self.chain.write().unwrap_or_else(|e| e.into_inner());
        if let Some(chain) = slot.as_ref() {
            return Ok(Arc::clone(chain));
        }
        let chain = Arc::new(self.registry.build_chain(&self.config)?);
        *slot = Some(Arc::clone(&chain));
        Ok(chain)
    }

    /// Replace the resolver chain. A factory built earlier keeps the old one.
    pub fn set_chain(&self, chain: Arc<ResolverChain>) {
        *self.chain.write().unwrap_or_else(|e| e.into_inner()) = Some(chain);
    }

    /// Add a resolver ahead of the chain's default
    pub fn add_resolver(&self, resolver: Arc<dyn PathResolver>) -> Result<(), ConfigError> {
        tracing::debug!(resolver = resolver.name(), "adding resolver");
        self.chain()?.add(resolver);
        Ok(())
    }

    /// The active channel factory, built from the configuration if unset
    pub fn channel_factory(&self) -> Result<Arc<dyn ChannelFactory>, ConfigError> {
        if let Some(factory) = self.factory.read().unwrap_or_else(|e| e.into_inner()).as_ref() {
            return Ok(Arc::clone(factory));
        }

        let chain = self.chain()?;
        let mut slot = self.factory.write().unwrap_or_else(|e| e.into_inner());
        if let Some(factory) = slot.as_ref() {
            return Ok(Arc::clone(factory));
        }
        let factory = self.build_factory(chain);
        *slot = Some(Arc::clone(&factory));
        Ok(factory)
    }

    pub fn set_channel_factory(&self, factory: Arc<dyn ChannelFactory>) {
        *self.factory.write().unwrap_or_else(|e| e.into_inner()) = Some(factory);
    }

    /// Drop the chain and factory so the next use rebuilds them
    pub fn reset(&self) {
        *self.factory.write().unwrap_or_else(|e| e.into_inner()) = None;
        *self.chain.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    fn build_factory(&self, chain: Arc<ResolverChain>) -> Arc<dyn ChannelFactory> {
        let base = PathChannelFactory::new(&self.config.data_dir, chain);

        let Some(relocation) = &self.config.channel_relocation else {
            return Arc::new(TracedChannelFactory::new(base));
        };

        tracing::debug!(
            source = %relocation.source.display(),
            destination = %relocation.destination.display(),
            scope = ?relocation.scope,
            "channel relocation enabled"
        );
        let relocated = base.clone().relocated(RelocatingResolver::new(
            &relocation.source,
            &relocation.destination,
        ));
        let pick = |relocate: bool| -> Arc<dyn ChannelFactory> {
            if relocate {
                Arc::new(relocated.clone())
            } else {
                Arc::new(base.clone())
            }
        };
        let composite = CompositeChannelFactory::new(
            pick(relocation.scope.relocates_reads()),
            pick(relocation.scope.relocates_writes()),
        );
        Arc::new(TracedChannelFactory::new(composite))
    }
}

impl fmt::Debug for IoContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain = self.chain.read().unwrap_or_else(|e| e.into_inner());
        let factory = self.factory.read().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("IoContext")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("chain", &*chain)
            .field("factory_built", &factory.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
