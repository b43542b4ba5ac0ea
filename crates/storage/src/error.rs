// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage errors

use crate::transactional::TxnState;
use sstio_core::ConfigError;
use std::io;
use thiserror::Error;

/// Errors from writers and checksum verification
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid mark: {reason}")]
    InvalidMark { reason: String },
    #[error("cannot {op} while {state}")]
    IllegalState { op: &'static str, state: TxnState },
    #[error("writer is closed")]
    Closed,
    #[error("corrupt data at offset {offset}: {reason}")]
    Corrupt { offset: u64, reason: String },
}

impl StorageError {
    pub(crate) fn invalid_mark(reason: impl Into<String>) -> Self {
        StorageError::InvalidMark {
            reason: reason.into(),
        }
    }

    pub(crate) fn corrupt(offset: u64, reason: impl Into<String>) -> Self {
        StorageError::Corrupt {
            offset,
            reason: reason.into(),
        }
    }
}

impl From<StorageError> for io::Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => e,
            other => io::Error::other(other),
        }
    }
}
