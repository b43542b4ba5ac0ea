// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Factory with independent read and write pipelines

use super::ChannelFactory;
use crate::channel::Channel;
use sstio_core::LogicalFileId;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// Routes reads to one factory and writes to another
#[derive(Clone)]
pub struct CompositeChannelFactory {
    reader: Arc<dyn ChannelFactory>,
    writer: Arc<dyn ChannelFactory>,
}

impl CompositeChannelFactory {
    pub fn new(reader: Arc<dyn ChannelFactory>, writer: Arc<dyn ChannelFactory>) -> Self {
        Self { reader, writer }
    }

    pub fn reader(&self) -> &Arc<dyn ChannelFactory> {
        &self.reader
    }

    pub fn writer(&self) -> &Arc<dyn ChannelFactory> {
        &self.writer
    }
}

impl ChannelFactory for CompositeChannelFactory {
    fn read_path(&self, id: &LogicalFileId) -> PathBuf {
        self.reader.read_path(id)
    }

    fn write_path(&self, id: &LogicalFileId) -> PathBuf {
        self.writer.write_path(id)
    }

    fn open_for_read(&self, id: &LogicalFileId) -> io::Result<Box<dyn Channel>> {
        self.reader.open_for_read(id)
    }

    fn open_for_write(&self, id: &LogicalFileId) -> io::Result<Box<dyn Channel>> {
        self.writer.open_for_write(id)
    }
}

#[cfg(test)]
#[path = "composite_tests.rs"]
mod tests;
