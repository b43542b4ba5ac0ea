// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolve-then-open factory over the real filesystem

use super::ChannelFactory;
use crate::channel::{Channel, FileChannel};
use sstio_core::{LogicalFileId, RelocatingResolver, ResolverChain};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Opens [`FileChannel`]s at the path the resolver chain picks.
///
/// An optional channel-level relocation is applied after chain resolution,
/// independently of any relocation the chain itself performs.
#[derive(Debug, Clone)]
pub struct PathChannelFactory {
    root: PathBuf,
    chain: Arc<ResolverChain>,
    relocation: Option<RelocatingResolver>,
}

impl PathChannelFactory {
    pub fn new(root: impl Into<PathBuf>, chain: Arc<ResolverChain>) -> Self {
        Self {
            root: root.into(),
            chain,
            relocation: None,
        }
    }

    /// Identity factory: no resolvers, files live at `root/keyspace/table/name`
    pub fn identity(root: impl Into<PathBuf>) -> Self {
        Self::new(root, Arc::new(ResolverChain::new()))
    }

    /// Same factory with paths under `relocation.source()` moved to its destination
    pub fn relocated(mut self, relocation: RelocatingResolver) -> Self {
        self.relocation = Some(relocation);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, id: &LogicalFileId) -> PathBuf {
        let path = self.chain.resolve_id(&self.root, id);
        match &self.relocation {
            Some(relocation) => match relocation.relocate(&path) {
                Some(relocated) => {
                    tracing::debug!(
                        file = %id,
                        requested = %path.display(),
                        resolved = %relocated.display(),
                        "channel relocated"
                    );
                    relocated
                }
                None => path,
            },
            None => path,
        }
    }
}

impl ChannelFactory for PathChannelFactory {
    fn read_path(&self, id: &LogicalFileId) -> PathBuf {
        self.resolve(id)
    }

    fn write_path(&self, id: &LogicalFileId) -> PathBuf {
        self.resolve(id)
    }

    fn open_for_read(&self, id: &LogicalFileId) -> io::Result<Box<dyn Channel>> {
        let path = self.read_path(id);
        Ok(Box::new(FileChannel::open_read(&path)?))
    }

    fn open_for_write(&self, id: &LogicalFileId) -> io::Result<Box<dyn Channel>> {
        let path = self.write_path(id);
        Ok(Box::new(FileChannel::open_write(&path)?))
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
