// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Physical I/O handles

mod file;

pub use file::FileChannel;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ChannelCall, FakeChannel, FakeFileSystem};

use std::fmt;
use std::io;
use std::path::Path;

/// An open physical file, addressed by absolute offset.
///
/// Dropping the channel releases the underlying handle.
pub trait Channel: fmt::Debug + Send {
    /// Physical path backing this channel
    fn path(&self) -> &Path;

    /// Write all of `buf` starting at `offset`
    fn write_at(&mut self, offset: u64, buf: &[u8]) -> io::Result<()>;

    /// Read up to `buf.len()` bytes at `offset`; returns the count read
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize>;

    /// Set the physical length to exactly `len`
    fn truncate(&mut self, len: u64) -> io::Result<()>;

    /// Make written data durable
    fn sync(&mut self) -> io::Result<()>;

    /// Current physical length
    fn size(&self) -> io::Result<u64>;
}

/// Read the whole content of a channel
pub fn read_all(channel: &mut dyn Channel) -> io::Result<Vec<u8>> {
    let len = usize::try_from(channel.size()?)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "file too large to read"))?;
    let mut buf = vec![0u8; len];
    let mut filled = 0;
    while filled < len {
        let n = channel.read_at(filled as u64, &mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    buf.truncate(filled);
    Ok(buf)
}
