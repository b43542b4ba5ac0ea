// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Two-phase commit wrapper around a sequential writer
//!
//! ```text
//! InProgress --prepare_to_commit--> Prepared --commit--> Committed
//!      \                               |
//!       `-------------abort------------+--> Aborted
//! ```

use crate::error::StorageError;
use crate::sequential::SequentialWriter;
use std::fmt;

/// Lifecycle of a [`TransactionalWriter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnState {
    InProgress,
    Prepared,
    Committed,
    Aborted,
}

impl TxnState {
    /// Committed and Aborted are final
    pub fn is_terminal(self) -> bool {
        matches!(self, TxnState::Committed | TxnState::Aborted)
    }
}

impl fmt::Display for TxnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxnState::InProgress => "in progress",
            TxnState::Prepared => "prepared",
            TxnState::Committed => "committed",
            TxnState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Owns a writer and drives it through prepare/commit or abort.
///
/// Dropping the wrapper before it reaches a final state aborts it.
pub struct TransactionalWriter<W: SequentialWriter> {
    inner: W,
    state: TxnState,
}

impl<W: SequentialWriter> TransactionalWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            state: TxnState::InProgress,
        }
    }

    pub fn state(&self) -> TxnState {
        self.state
    }

    fn require(&self, expected: TxnState, op: &'static str) -> Result<(), StorageError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(StorageError::IllegalState {
                op,
                state: self.state,
            })
        }
    }

    pub fn write(&mut self, buf: &[u8]) -> Result<(), StorageError> {
        self.require(TxnState::InProgress, "write")?;
        self.inner.write(buf)
    }

    pub fn mark(&self) -> W::Mark {
        self.inner.mark()
    }

    pub fn reset_and_truncate(&mut self, mark: &W::Mark) -> Result<bool, StorageError> {
        self.require(TxnState::InProgress, "reset")?;
        self.inner.reset_and_truncate(mark)
    }

    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    pub fn last_flush_offset(&self) -> u64 {
        self.inner.last_flush_offset()
    }

    /// Finish the writer so every byte is durable. The handle stays open.
    pub fn prepare_to_commit(&mut self) -> Result<(), StorageError> {
        self.require(TxnState::InProgress, "prepare")?;
        self.inner.finish()?;
        self.state = TxnState::Prepared;
        tracing::debug!(length = self.inner.position(), "prepared");
        Ok(())
    }

    /// Release the handle of a prepared writer
    pub fn commit(&mut self) -> Result<(), StorageError> {
        self.require(TxnState::Prepared, "commit")?;
        self.inner.close()?;
        self.state = TxnState::Committed;
        tracing::debug!(length = self.inner.position(), "committed");
        Ok(())
    }

    /// Prepare and commit in one step
    pub fn finish(&mut self) -> Result<(), StorageError> {
        self.prepare_to_commit()?;
        self.commit()
    }

    /// Release the handle without finishing.
    ///
    /// Never fails and may be called any number of times. Bytes already
    /// made durable by `prepare_to_commit` stay on disk.
    pub fn abort(&mut self) {
        match self.state {
            TxnState::Aborted => {}
            TxnState::Committed => {
                tracing::debug!("abort after commit ignored");
            }
            TxnState::InProgress | TxnState::Prepared => {
                self.inner.release();
                tracing::debug!(from = %self.state, "aborted");
                self.state = TxnState::Aborted;
            }
        }
    }
}

impl<W: SequentialWriter> fmt::Debug for TransactionalWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionalWriter")
            .field("state", &self.state)
            .field("position", &self.inner.position())
            .finish()
    }
}

impl<W: SequentialWriter> Drop for TransactionalWriter<W> {
    fn drop(&mut self) {
        if !self.state.is_terminal() {
            tracing::warn!(state = %self.state, "writer dropped before commit, aborting");
            self.abort();
        }
    }
}

#[cfg(test)]
#[path = "transactional_tests.rs"]
mod tests;
