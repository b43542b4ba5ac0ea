// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The writer surface shared by plain and checksummed writers

use crate::error::StorageError;

/// A positioned, append-only writer that can rewind to an earlier mark.
///
/// `finish` makes everything written durable; `release` drops the physical
/// handle without finishing and never fails.
pub trait SequentialWriter {
    type Mark: Clone;

    fn write(&mut self, buf: &[u8]) -> Result<(), StorageError>;

    /// Snapshot the current position
    fn mark(&self) -> Self::Mark;

    /// Discard everything written after `mark`.
    ///
    /// Returns `true` when the file itself had to be truncated.
    fn reset_and_truncate(&mut self, mark: &Self::Mark) -> Result<bool, StorageError>;

    /// Logical length: every byte accepted so far
    fn position(&self) -> u64;

    /// Bytes handed to the physical file so far
    fn last_flush_offset(&self) -> u64;

    fn finish(&mut self) -> Result<(), StorageError>;

    fn close(&mut self) -> Result<(), StorageError>;

    fn release(&mut self);

    fn is_open(&self) -> bool;
}
