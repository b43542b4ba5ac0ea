// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel factories: logical file → physical channel
//!
//! Read and write resolution are independent pipelines, so a composite
//! factory can read from an untouched source tree while writes land in a
//! staging tree.

mod composite;
mod path;

pub use composite::CompositeChannelFactory;
pub use path::PathChannelFactory;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeChannelFactory;

use crate::channel::Channel;
use sstio_core::LogicalFileId;
use std::io;
use std::path::PathBuf;

/// Produces physical channels for logical files.
///
/// Resolution never fails; opening may fail with an I/O error, which is
/// returned unchanged and never retried here.
pub trait ChannelFactory: Send + Sync {
    /// Physical path a read of `id` would open
    fn read_path(&self, id: &LogicalFileId) -> PathBuf;

    /// Physical path a write of `id` would open
    fn write_path(&self, id: &LogicalFileId) -> PathBuf;

    /// Open `id` for reading
    fn open_for_read(&self, id: &LogicalFileId) -> io::Result<Box<dyn Channel>>;

    /// Open `id` for writing, creating missing parent directories
    fn open_for_write(&self, id: &LogicalFileId) -> io::Result<Box<dyn Channel>>;
}
