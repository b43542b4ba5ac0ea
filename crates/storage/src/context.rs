// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Writer construction from a shared [`IoContext`]

use crate::buffered::BufferedWriter;
use crate::checksummed::ChecksummedWriter;
use crate::error::StorageError;
use crate::options::WriterOptions;
use crate::transactional::TransactionalWriter;
use sstio_adapters::IoContext;
use sstio_core::LogicalFileId;

/// Opens writers through a context's channel factory and configuration
pub trait WriterContext {
    fn writer_options(&self) -> WriterOptions;

    fn open_writer(&self, id: &LogicalFileId) -> Result<BufferedWriter, StorageError>;

    fn open_transactional_writer(
        &self,
        id: &LogicalFileId,
    ) -> Result<TransactionalWriter<BufferedWriter>, StorageError>;

    fn open_checksummed_writer(
        &self,
        id: &LogicalFileId,
    ) -> Result<ChecksummedWriter, StorageError>;
}

impl WriterContext for IoContext {
    fn writer_options(&self) -> WriterOptions {
        WriterOptions::from_config(self.config())
    }

    fn open_writer(&self, id: &LogicalFileId) -> Result<BufferedWriter, StorageError> {
        let factory = self.channel_factory()?;
        BufferedWriter::open(factory.as_ref(), id, self.writer_options())
    }

    fn open_transactional_writer(
        &self,
        id: &LogicalFileId,
    ) -> Result<TransactionalWriter<BufferedWriter>, StorageError> {
        Ok(TransactionalWriter::new(self.open_writer(id)?))
    }

    fn open_checksummed_writer(
        &self,
        id: &LogicalFileId,
    ) -> Result<ChecksummedWriter, StorageError> {
        ChecksummedWriter::open(self.channel_factory()?, id, self.writer_options())
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
