// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Data writer paired with a checksum side-file
//!
//! Every physical flush of the data file appends one [`ChecksumRecord`] to
//! `<name>.checksum` and flushes it, so the checksum file always describes
//! exactly the bytes that reached the data file. Finishing also writes the
//! whole-file CRC32 to `<name>.digest`.

use crate::buffered::{BufferedWriter, FlushListener, Mark};
use crate::checksum::{format_digest, ChecksumRecord, RECORD_LEN};
use crate::error::StorageError;
use crate::options::WriterOptions;
use crate::sequential::SequentialWriter;
use sstio_adapters::ChannelFactory;
use sstio_core::LogicalFileId;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Receives data flushes and records them in the checksum file
struct ChecksumSink {
    writer: BufferedWriter,
    hasher: crc32fast::Hasher,
}

impl FlushListener for ChecksumSink {
    fn on_flush(&mut self, offset: u64, data: &[u8]) -> Result<(), StorageError> {
        let record = ChecksumRecord::for_span(offset, data)?;
        let before = self.writer.mark();
        self.writer.write(&record.encode())?;
        if let Err(e) = self.writer.flush() {
            // A retried data flush records the span again
            self.writer.reset_and_truncate(&before)?;
            return Err(e);
        }
        self.hasher.update(data);
        Ok(())
    }
}

/// Position snapshot of a [`ChecksummedWriter`]
#[derive(Clone)]
pub struct ChecksummedMark {
    data: Mark,
    checksum: Mark,
    hasher: crc32fast::Hasher,
}

impl ChecksummedMark {
    pub fn position(&self) -> u64 {
        self.data.position()
    }
}

impl fmt::Debug for ChecksummedMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChecksummedMark")
            .field("data", &self.data)
            .field("checksum", &self.checksum)
            .finish()
    }
}

/// Writes a data file together with its checksum and digest side-files
pub struct ChecksummedWriter {
    id: LogicalFileId,
    factory: Arc<dyn ChannelFactory>,
    data: BufferedWriter<ChecksumSink>,
    finished: bool,
}

impl ChecksummedWriter {
    /// Open `id` and `id.checksum` for writing through the same factory.
    ///
    /// The checksum file exists, empty, as soon as this returns.
    pub fn open(
        factory: Arc<dyn ChannelFactory>,
        id: &LogicalFileId,
        options: WriterOptions,
    ) -> Result<Self, StorageError> {
        let data_channel = factory.open_for_write(id)?;
        let checksum_channel = factory.open_for_write(&id.checksum_file())?;

        let sink = ChecksumSink {
            writer: BufferedWriter::new(checksum_channel, options.with_buffer_size(RECORD_LEN)),
            hasher: crc32fast::Hasher::new(),
        };
        let data = BufferedWriter::with_listener(data_channel, options, sink);
        tracing::debug!(file = %id, "opened checksummed writer");

        Ok(Self {
            id: id.clone(),
            factory,
            data,
            finished: false,
        })
    }

    pub fn data_path(&self) -> &Path {
        self.data.path()
    }

    pub fn checksum_path(&self) -> &Path {
        self.data.listener().writer.path()
    }

    /// Bytes the checksum file has received so far
    pub fn checksum_length(&self) -> u64 {
        self.data.listener().writer.last_flush_offset()
    }

    /// CRC32 of every data byte flushed so far
    pub fn running_crc32(&self) -> u32 {
        self.data.listener().hasher.clone().finalize()
    }

    pub fn write(&mut self, buf: &[u8]) -> Result<(), StorageError> {
        self.data.write(buf)
    }

    pub fn mark(&self) -> ChecksummedMark {
        let sink = self.data.listener();
        ChecksummedMark {
            data: self.data.mark(),
            checksum: sink.writer.mark(),
            hasher: sink.hasher.clone(),
        }
    }

    /// Rewind both files to `mark`.
    ///
    /// When the data file is physically truncated the checksum file returns
    /// to its state at the mark, and the span that was still buffered back
    /// then, now on disk, gets a fresh record. A mark taken before an
    /// earlier truncation below it is rejected.
    pub fn reset_and_truncate(&mut self, mark: &ChecksummedMark) -> Result<bool, StorageError> {
        self.data.check_mark(&mark.data)?;
        self.data.listener().writer.check_mark(&mark.checksum)?;
        if !self.data.reset_and_truncate(&mark.data)? {
            return Ok(false);
        }

        let sink = self.data.listener_mut();
        sink.writer.reset_and_truncate(&mark.checksum)?;
        sink.hasher = mark.hasher.clone();

        let from = mark.data.last_flush_offset();
        let to = mark.data.position();
        if to > from {
            let span = self.data.read_flushed(from, (to - from) as usize)?;
            self.data.listener_mut().on_flush(from, &span)?;
        }
        tracing::debug!(file = %self.id, position = to, "rewound checksummed writer");
        Ok(true)
    }

    pub fn position(&self) -> u64 {
        self.data.position()
    }

    pub fn last_flush_offset(&self) -> u64 {
        self.data.last_flush_offset()
    }

    pub fn is_open(&self) -> bool {
        self.data.is_open()
    }

    /// Finish the data file, then the checksum file, then write the digest
    pub fn finish(&mut self) -> Result<(), StorageError> {
        if self.finished {
            return Ok(());
        }
        self.data.finish()?;
        self.data.listener_mut().writer.finish()?;

        let crc32 = self.running_crc32();
        let digest = format_digest(crc32);
        let mut channel = self.factory.open_for_write(&self.id.digest_file())?;
        channel.write_at(0, digest.as_bytes())?;
        channel.sync()?;

        self.finished = true;
        tracing::debug!(
            file = %self.id,
            length = self.data.position(),
            crc32,
            "finished checksummed writer"
        );
        Ok(())
    }

    /// Finish if configured to, then release both handles
    pub fn close(&mut self) -> Result<(), StorageError> {
        let result = if self.data.options().finish_on_close && !self.finished && self.is_open() {
            self.finish()
        } else {
            Ok(())
        };
        self.release();
        result
    }

    pub fn release(&mut self) {
        self.data.release();
        self.data.listener_mut().writer.release();
    }
}

impl SequentialWriter for ChecksummedWriter {
    type Mark = ChecksummedMark;

    fn write(&mut self, buf: &[u8]) -> Result<(), StorageError> {
        Self::write(self, buf)
    }

    fn mark(&self) -> ChecksummedMark {
        Self::mark(self)
    }

    fn reset_and_truncate(&mut self, mark: &ChecksummedMark) -> Result<bool, StorageError> {
        Self::reset_and_truncate(self, mark)
    }

    fn position(&self) -> u64 {
        self.data.position()
    }

    fn last_flush_offset(&self) -> u64 {
        self.data.last_flush_offset()
    }

    fn finish(&mut self) -> Result<(), StorageError> {
        Self::finish(self)
    }

    fn close(&mut self) -> Result<(), StorageError> {
        Self::close(self)
    }

    fn release(&mut self) {
        Self::release(self)
    }

    fn is_open(&self) -> bool {
        self.data.is_open()
    }
}

impl fmt::Debug for ChecksummedWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChecksummedWriter")
            .field("id", &self.id)
            .field("data", &self.data)
            .field("checksum", &self.data.listener().writer)
            .field("finished", &self.finished)
            .finish()
    }
}

impl Drop for ChecksummedWriter {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(file = %self.id, error = %e, "close on drop failed");
        }
    }
}

#[cfg(test)]
#[path = "checksummed_tests.rs"]
mod tests;
