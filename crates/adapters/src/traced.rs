// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced factory wrapper for consistent observability

use crate::channel::Channel;
use crate::factory::ChannelFactory;
use sstio_core::LogicalFileId;
use std::io;
use std::path::PathBuf;

/// Wrapper that adds tracing to any ChannelFactory
#[derive(Debug, Clone)]
pub struct TracedChannelFactory<F> {
    inner: F,
}

impl<F> TracedChannelFactory<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: ChannelFactory> ChannelFactory for TracedChannelFactory<F> {
    fn read_path(&self, id: &LogicalFileId) -> PathBuf {
        self.inner.read_path(id)
    }

    fn write_path(&self, id: &LogicalFileId) -> PathBuf {
        self.inner.write_path(id)
    }

    fn open_for_read(&self, id: &LogicalFileId) -> io::Result<Box<dyn Channel>> {
        let span = tracing::info_span!("channel.open_for_read", file = %id);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.open_for_read(id);
        let elapsed = start.elapsed();

        match &result {
            Ok(channel) => tracing::debug!(
                path = %channel.path().display(),
                elapsed_us = elapsed.as_micros() as u64,
                "opened"
            ),
            Err(e) => tracing::error!(
                path = %self.inner.read_path(id).display(),
                error = %e,
                "open failed"
            ),
        }

        result
    }

    fn open_for_write(&self, id: &LogicalFileId) -> io::Result<Box<dyn Channel>> {
        let span = tracing::info_span!("channel.open_for_write", file = %id);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.open_for_write(id);
        let elapsed = start.elapsed();

        match &result {
            Ok(channel) => tracing::debug!(
                path = %channel.path().display(),
                elapsed_us = elapsed.as_micros() as u64,
                "opened"
            ),
            Err(e) => tracing::error!(
                path = %self.inner.write_path(id).display(),
                error = %e,
                "open failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
