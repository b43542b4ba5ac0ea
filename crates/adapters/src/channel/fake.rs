// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory channels for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::Channel;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded channel call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelCall {
    Write { path: PathBuf, offset: u64, len: usize },
    Truncate { path: PathBuf, len: u64 },
    Sync { path: PathBuf },
    Release { path: PathBuf },
}

#[derive(Debug, Default)]
struct FakeState {
    files: HashMap<PathBuf, Vec<u8>>,
    calls: Vec<ChannelCall>,
    open_handles: HashMap<PathBuf, usize>,
    fail_opens: bool,
    fail_writes: bool,
    fail_syncs: bool,
}

/// Shared in-memory filesystem handing out [`FakeChannel`]s
#[derive(Debug, Clone, Default)]
pub struct FakeFileSystem {
    state: Arc<Mutex<FakeState>>,
}

impl FakeFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Open a channel for reading; the file must exist
    pub fn open_read(&self, path: &Path) -> io::Result<FakeChannel> {
        let mut state = self.lock();
        if state.fail_opens {
            return Err(injected("open"));
        }
        if !state.files.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            ));
        }
        *state.open_handles.entry(path.to_path_buf()).or_default() += 1;
        Ok(self.handle(path, false))
    }

    /// Open a channel for writing, replacing any existing content
    pub fn open_write(&self, path: &Path) -> io::Result<FakeChannel> {
        let mut state = self.lock();
        if state.fail_opens {
            return Err(injected("open"));
        }
        state.files.insert(path.to_path_buf(), Vec::new());
        *state.open_handles.entry(path.to_path_buf()).or_default() += 1;
        Ok(self.handle(path, true))
    }

    fn handle(&self, path: &Path, writable: bool) -> FakeChannel {
        FakeChannel {
            path: path.to_path_buf(),
            fs: self.clone(),
            writable,
        }
    }

    /// Content of a file, if it exists
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.lock().files.get(path).cloned()
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.lock().files.contains_key(path)
    }

    /// Seed a file with content
    pub fn insert(&self, path: impl Into<PathBuf>, content: Vec<u8>) {
        self.lock().files.insert(path.into(), content);
    }

    /// Number of handles currently open on `path`
    pub fn open_handles(&self, path: &Path) -> usize {
        self.lock().open_handles.get(path).copied().unwrap_or(0)
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ChannelCall> {
        self.lock().calls.clone()
    }

    pub fn set_fail_opens(&self, fail: bool) {
        self.lock().fail_opens = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    pub fn set_fail_syncs(&self, fail: bool) {
        self.lock().fail_syncs = fail;
    }
}

fn injected(op: &str) -> io::Error {
    io::Error::other(format!("injected {} failure", op))
}

/// In-memory channel
#[derive(Debug)]
pub struct FakeChannel {
    path: PathBuf,
    fs: FakeFileSystem,
    writable: bool,
}

impl FakeChannel {
    fn check_writable(&self) -> io::Result<()> {
        if self.writable {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "channel opened read-only",
            ))
        }
    }
}

impl Channel for FakeChannel {
    fn path(&self) -> &Path {
        &self.path
    }

    fn write_at(&mut self, offset: u64, buf: &[u8]) -> io::Result<()> {
        self.check_writable()?;
        let mut state = self.fs.lock();
        state.calls.push(ChannelCall::Write {
            path: self.path.clone(),
            offset,
            len: buf.len(),
        });
        if state.fail_writes {
            return Err(injected("write"));
        }
        let data = state.files.entry(self.path.clone()).or_default();
        let start = offset as usize;
        let end = start + buf.len();
        if data.len() < end {
            data.resize(end, 0);
        }
        data[start..end].copy_from_slice(buf);
        Ok(())
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        let state = self.fs.lock();
        let data = state.files.get(&self.path).map(Vec::as_slice).unwrap_or(&[]);
        let start = (offset as usize).min(data.len());
        let n = buf.len().min(data.len() - start);
        buf[..n].copy_from_slice(&data[start..start + n]);
        Ok(n)
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.check_writable()?;
        let mut state = self.fs.lock();
        state.calls.push(ChannelCall::Truncate {
            path: self.path.clone(),
            len,
        });
        let data = state.files.entry(self.path.clone()).or_default();
        data.resize(len as usize, 0);
        Ok(())
    }

    fn sync(&mut self) -> io::Result<()> {
        let mut state = self.fs.lock();
        state.calls.push(ChannelCall::Sync {
            path: self.path.clone(),
        });
        if state.fail_syncs {
            return Err(injected("sync"));
        }
        Ok(())
    }

    fn size(&self) -> io::Result<u64> {
        let state = self.fs.lock();
        Ok(state.files.get(&self.path).map_or(0, |d| d.len() as u64))
    }
}

impl Drop for FakeChannel {
    fn drop(&mut self) {
        let mut state = self.fs.lock();
        state.calls.push(ChannelCall::Release {
            path: self.path.clone(),
        });
        if let Some(count) = state.open_handles.get_mut(&self.path) {
            *count = count.saturating_sub(1);
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
