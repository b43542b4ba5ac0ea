// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake channel factory for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::ChannelFactory;
use crate::channel::{Channel, ChannelCall, FakeFileSystem};
use sstio_core::{LogicalFileId, ResolverChain};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Channel factory backed by an in-memory filesystem
#[derive(Debug, Clone)]
pub struct FakeChannelFactory {
    root: PathBuf,
    chain: Arc<ResolverChain>,
    fs: FakeFileSystem,
}

impl FakeChannelFactory {
    pub fn new() -> Self {
        Self::with_chain("/fake", Arc::new(ResolverChain::new()))
    }

    pub fn with_chain(root: impl Into<PathBuf>, chain: Arc<ResolverChain>) -> Self {
        Self {
            root: root.into(),
            chain,
            fs: FakeFileSystem::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The shared in-memory filesystem
    pub fn fs(&self) -> &FakeFileSystem {
        &self.fs
    }

    /// Content of the file a write of `id` lands in
    pub fn contents(&self, id: &LogicalFileId) -> Option<Vec<u8>> {
        self.fs.contents(&self.write_path(id))
    }

    /// Number of open handles on the write path of `id`
    pub fn open_handles(&self, id: &LogicalFileId) -> usize {
        self.fs.open_handles(&self.write_path(id))
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ChannelCall> {
        self.fs.calls()
    }
}

impl Default for FakeChannelFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelFactory for FakeChannelFactory {
    fn read_path(&self, id: &LogicalFileId) -> PathBuf {
        self.chain.resolve_id(&self.root, id)
    }

    fn write_path(&self, id: &LogicalFileId) -> PathBuf {
        self.chain.resolve_id(&self.root, id)
    }

    fn open_for_read(&self, id: &LogicalFileId) -> io::Result<Box<dyn Channel>> {
        Ok(Box::new(self.fs.open_read(&self.read_path(id))?))
    }

    fn open_for_write(&self, id: &LogicalFileId) -> io::Result<Box<dyn Channel>> {
        Ok(Box::new(self.fs.open_write(&self.write_path(id))?))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
