// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for behavioral specs

#![allow(dead_code)]

pub use sstio_adapters::{ChannelFactory, IoContext};
pub use sstio_core::{IoConfig, LogicalFileId};
pub use sstio_storage::{
    verify_checksums, SequentialWriter, StorageError, TransactionalWriter, TxnState,
    WriterContext,
};
pub use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A scratch directory holding the data tree and any relocation targets
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of `rel` inside the workspace
    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Build a context from a TOML snippet; `{root}` expands to the workspace path
    pub fn context(&self, toml: &str) -> IoContext {
        let toml = toml.replace("{root}", &self.dir.path().display().to_string());
        IoContext::new(IoConfig::from_toml_str(&toml).unwrap())
    }

    /// Write `content` at `rel`, creating parent directories
    pub fn file(&self, rel: &str, content: &[u8]) {
        let path = self.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> Vec<u8> {
        std::fs::read(self.join(rel)).unwrap()
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.join(rel).exists()
    }
}

pub fn data_file() -> LogicalFileId {
    LogicalFileId::new("ks", "events", "nb-1-big-Data.db")
}

pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(13).wrapping_add(seed)).collect()
}
