// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Location-independent file identities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Suffix of the per-flush checksum side-file
pub const CHECKSUM_SUFFIX: &str = ".checksum";

/// Suffix of the whole-file digest side-file
pub const DIGEST_SUFFIX: &str = ".digest";

/// Identifies a table file independent of where it is physically stored.
///
/// The identity is the triple `{keyspace, table, file_name}`; the physical
/// path is only decided later by the resolver chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LogicalFileId {
    keyspace: String,
    table: String,
    file_name: String,
}

impl LogicalFileId {
    pub fn new(
        keyspace: impl Into<String>,
        table: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            keyspace: keyspace.into(),
            table: table.into(),
            file_name: file_name.into(),
        }
    }

    pub fn keyspace(&self) -> &str {
        &self.keyspace
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Identity of a side-file living next to this one (`name` + `suffix`)
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self {
            keyspace: self.keyspace.clone(),
            table: self.table.clone(),
            file_name: format!("{}{}", self.file_name, suffix),
        }
    }

    /// Identity of the checksum side-file
    pub fn checksum_file(&self) -> Self {
        self.with_suffix(CHECKSUM_SUFFIX)
    }

    /// Identity of the whole-file digest side-file
    pub fn digest_file(&self) -> Self {
        self.with_suffix(DIGEST_SUFFIX)
    }

    /// Path segments below the data directory, in order
    pub fn segments(&self) -> [&str; 3] {
        [&self.keyspace, &self.table, &self.file_name]
    }

    /// The identity mapping: `root/keyspace/table/file_name`
    pub fn default_path(&self, root: &Path) -> PathBuf {
        crate::resolver::identity_path(root, &self.segments())
    }
}

impl fmt::Display for LogicalFileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.keyspace, self.table, self.file_name)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
