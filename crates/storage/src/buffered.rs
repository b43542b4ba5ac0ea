// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Buffered sequential writer
//!
//! Bytes accumulate in a fixed-capacity buffer and reach the channel one full
//! buffer at a time. A buffer is only flushed when it is full and more bytes
//! arrive, so a writer that never exceeds its capacity touches the file only
//! when it finishes.

use crate::error::StorageError;
use crate::options::WriterOptions;
use crate::sequential::SequentialWriter;
use sstio_adapters::{Channel, ChannelFactory};
use sstio_core::LogicalFileId;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_WRITER_ID: AtomicU64 = AtomicU64::new(1);

/// Observes every physical flush of a [`BufferedWriter`]
pub trait FlushListener {
    /// Called after `data` has been written to the channel at `offset`
    fn on_flush(&mut self, offset: u64, data: &[u8]) -> Result<(), StorageError>;
}

impl FlushListener for () {
    fn on_flush(&mut self, _offset: u64, _data: &[u8]) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Position snapshot of a [`BufferedWriter`].
///
/// Only valid for the writer that produced it, and only until that writer
/// truncates below the mark's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    writer_id: u64,
    generation: u64,
    position: u64,
    last_flush_offset: u64,
}

impl Mark {
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn last_flush_offset(&self) -> u64 {
        self.last_flush_offset
    }
}

/// Sequential writer over a [`Channel`]
///
/// Invariants: `last_flush_offset <= position` and
/// `position - last_flush_offset <= buffer_size`.
pub struct BufferedWriter<L: FlushListener = ()> {
    id: u64,
    path: PathBuf,
    channel: Option<Box<dyn Channel>>,
    buffer: Vec<u8>,
    capacity: usize,
    position: u64,
    last_flush_offset: u64,
    open: bool,
    finished: bool,
    unsynced: u64,
    /// Target of every physical truncation, oldest first
    truncations: Vec<u64>,
    options: WriterOptions,
    listener: L,
}

impl BufferedWriter {
    /// Open `id` for writing through `factory`
    pub fn open(
        factory: &dyn ChannelFactory,
        id: &LogicalFileId,
        options: WriterOptions,
    ) -> Result<Self, StorageError> {
        let channel = factory.open_for_write(id)?;
        Ok(Self::new(channel, options))
    }

    pub fn new(channel: Box<dyn Channel>, options: WriterOptions) -> Self {
        Self::with_listener(channel, options, ())
    }
}

impl<L: FlushListener> BufferedWriter<L> {
    pub fn with_listener(channel: Box<dyn Channel>, options: WriterOptions, listener: L) -> Self {
        let capacity = options.buffer_size.max(1);
        let path = channel.path().to_path_buf();
        tracing::debug!(path = %path.display(), capacity, "opened writer");
        Self {
            id: NEXT_WRITER_ID.fetch_add(1, Ordering::Relaxed),
            path,
            channel: Some(channel),
            buffer: Vec::with_capacity(capacity),
            capacity,
            position: 0,
            last_flush_offset: 0,
            open: true,
            finished: false,
            unsynced: 0,
            truncations: Vec::new(),
            options,
            listener,
        }
    }

    /// Physical path of the underlying channel
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn last_flush_offset(&self) -> u64 {
        self.last_flush_offset
    }

    /// Whether the writer still accepts bytes
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    pub(crate) fn listener(&self) -> &L {
        &self.listener
    }

    pub(crate) fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Current physical length of the file
    pub fn on_disk_length(&self) -> Result<u64, StorageError> {
        Ok(self.channel()?.size()?)
    }

    fn channel(&self) -> Result<&dyn Channel, StorageError> {
        self.channel.as_deref().ok_or(StorageError::Closed)
    }

    fn channel_mut(&mut self) -> Result<&mut Box<dyn Channel>, StorageError> {
        self.channel.as_mut().ok_or(StorageError::Closed)
    }

    /// Append `buf`.
    ///
    /// On error the bytes of `buf` that had not reached the file are dropped
    /// again, so `position()` only counts bytes that were accepted.
    pub fn write(&mut self, buf: &[u8]) -> Result<(), StorageError> {
        if !self.open {
            return Err(StorageError::Closed);
        }

        let flushed = self.last_flush_offset;
        let buffered = self.buffer.len();
        let mut rest = buf;
        while !rest.is_empty() {
            match self.append(rest) {
                Ok(n) => rest = &rest[n..],
                Err(e) => {
                    let keep = if self.last_flush_offset == flushed { buffered } else { 0 };
                    self.buffer.truncate(keep);
                    self.position = self.last_flush_offset + keep as u64;
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Flush a full buffer, then take as much of `buf` as fits
    fn append(&mut self, buf: &[u8]) -> Result<usize, StorageError> {
        if self.buffer.len() == self.capacity {
            self.flush_buffer()?;
        }
        let take = (self.capacity - self.buffer.len()).min(buf.len());
        self.buffer.extend_from_slice(&buf[..take]);
        self.position += take as u64;
        Ok(take)
    }

    pub fn mark(&self) -> Mark {
        Mark {
            writer_id: self.id,
            generation: self.truncations.len() as u64,
            position: self.position,
            last_flush_offset: self.last_flush_offset,
        }
    }

    /// Whether `mark` can still be rewound to
    pub fn check_mark(&self, mark: &Mark) -> Result<(), StorageError> {
        if mark.writer_id != self.id {
            return Err(StorageError::invalid_mark("mark belongs to another writer"));
        }
        if mark.position > self.position {
            return Err(StorageError::invalid_mark(format!(
                "mark position {} is past writer position {}",
                mark.position, self.position
            )));
        }
        let since = self
            .truncations
            .get(mark.generation as usize..)
            .unwrap_or(&[]);
        if let Some(target) = since.iter().find(|&&t| t < mark.position) {
            return Err(StorageError::invalid_mark(format!(
                "mark position {} predates a truncation to {}",
                mark.position, target
            )));
        }
        Ok(())
    }

    /// Discard every byte written after `mark`.
    ///
    /// When the mark still lies inside the buffer only the buffer shrinks.
    /// Otherwise the buffer is dropped and the file is truncated to the mark.
    /// Returns `true` in the second case.
    pub fn reset_and_truncate(&mut self, mark: &Mark) -> Result<bool, StorageError> {
        if !self.open {
            return Err(StorageError::Closed);
        }
        self.check_mark(mark)?;

        if mark.position >= self.last_flush_offset {
            let keep = (mark.position - self.last_flush_offset) as usize;
            self.buffer.truncate(keep);
            self.position = mark.position;
            return Ok(false);
        }

        let target = mark.position;
        self.channel_mut()?.truncate(target)?;
        self.buffer.clear();
        self.truncations.push(target);
        tracing::debug!(
            path = %self.path.display(),
            from = self.last_flush_offset,
            to = target,
            "truncated to mark"
        );
        self.position = target;
        self.last_flush_offset = target;
        Ok(true)
    }

    /// Write buffered bytes to the channel without syncing
    pub fn flush(&mut self) -> Result<(), StorageError> {
        if !self.open {
            return Err(StorageError::Closed);
        }
        self.flush_buffer()
    }

    /// Make everything flushed so far durable
    pub fn sync(&mut self) -> Result<(), StorageError> {
        self.channel_mut()?.sync()?;
        self.unsynced = 0;
        Ok(())
    }

    fn flush_buffer(&mut self) -> Result<(), StorageError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let offset = self.last_flush_offset;
        let channel = self.channel.as_mut().ok_or(StorageError::Closed)?;
        channel.write_at(offset, &self.buffer)?;
        self.listener.on_flush(offset, &self.buffer)?;

        let len = self.buffer.len() as u64;
        self.last_flush_offset += len;
        self.unsynced += len;
        self.buffer.clear();
        tracing::trace!(path = %self.path.display(), offset, len, "flushed");

        if let Some(interval) = self.options.trickle_fsync_interval {
            if self.unsynced >= interval {
                tracing::trace!(path = %self.path.display(), bytes = self.unsynced, "trickle fsync");
                self.sync()?;
            }
        }
        Ok(())
    }

    /// Read back bytes that have already reached the file
    pub fn read_flushed(&mut self, offset: u64, len: usize) -> Result<Vec<u8>, StorageError> {
        let end = offset.saturating_add(len as u64);
        if end > self.last_flush_offset {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "range {}..{} extends past flushed length {}",
                    offset, end, self.last_flush_offset
                ),
            )
            .into());
        }

        let channel = self.channel_mut()?;
        let mut buf = vec![0u8; len];
        let mut filled = 0;
        while filled < len {
            let n = channel.read_at(offset + filled as u64, &mut buf[filled..])?;
            if n == 0 {
                return Err(StorageError::corrupt(
                    offset + filled as u64,
                    "file shorter than flushed length",
                ));
            }
            filled += n;
        }
        Ok(buf)
    }

    /// Flush, optionally trim to `position`, and sync.
    ///
    /// The writer stops accepting bytes; the handle stays open until
    /// [`close`](Self::close) or [`release`](Self::release).
    pub fn finish(&mut self) -> Result<(), StorageError> {
        if self.finished {
            return Ok(());
        }
        if !self.open {
            return Err(StorageError::Closed);
        }

        self.flush_buffer()?;
        let position = self.position;
        let trim = self.options.trim_on_finish;
        let channel = self.channel_mut()?;
        if trim {
            channel.truncate(position)?;
        }
        channel.sync()?;
        self.unsynced = 0;
        self.open = false;
        self.finished = true;
        tracing::debug!(path = %self.path.display(), length = position, "finished writer");
        Ok(())
    }

    /// Finish if configured to, then release the handle
    pub fn close(&mut self) -> Result<(), StorageError> {
        if self.channel.is_none() {
            return Ok(());
        }
        let result = if self.options.finish_on_close && !self.finished {
            self.finish()
        } else {
            Ok(())
        };
        self.release();
        result
    }

    /// Drop the physical handle without finishing. Idempotent.
    pub fn release(&mut self) {
        self.open = false;
        self.buffer.clear();
        if self.channel.take().is_some() {
            tracing::trace!(path = %self.path.display(), "released handle");
        }
    }
}

impl<L: FlushListener> SequentialWriter for BufferedWriter<L> {
    type Mark = Mark;

    fn write(&mut self, buf: &[u8]) -> Result<(), StorageError> {
        Self::write(self, buf)
    }

    fn mark(&self) -> Mark {
        Self::mark(self)
    }

    fn reset_and_truncate(&mut self, mark: &Mark) -> Result<bool, StorageError> {
        Self::reset_and_truncate(self, mark)
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn last_flush_offset(&self) -> u64 {
        self.last_flush_offset
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
        self.open
    }
}

impl<L: FlushListener> io::Write for BufferedWriter<L> {
    /// Accepts at most one buffer's worth; `Err` means nothing was taken.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.open {
            return Err(StorageError::Closed.into());
        }
        if buf.is_empty() {
            return Ok(0);
        }
        Ok(self.append(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Self::flush(self)?;
        Ok(())
    }
}

impl<L: FlushListener> std::fmt::Debug for BufferedWriter<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferedWriter")
            .field("path", &self.path)
            .field("position", &self.position)
            .field("last_flush_offset", &self.last_flush_offset)
            .field("capacity", &self.capacity)
            .field("open", &self.open)
            .field("released", &self.channel.is_none())
            .finish()
    }
}

impl<L: FlushListener> Drop for BufferedWriter<L> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(path = %self.path.display(), error = %e, "close on drop failed");
        }
    }
}

#[cfg(test)]
#[path = "buffered_tests.rs"]
mod tests;
