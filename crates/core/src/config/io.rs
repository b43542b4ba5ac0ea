// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! I/O configuration
//!
//! Plain values handed over by whatever owns option parsing: buffer sizing,
//! finish behaviour, and where files should really live.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default writer buffer capacity (64 KiB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Errors from loading or interpreting configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown resolver kind: {0}")]
    UnknownResolver(String),
    #[error("invalid resolver {kind}: {reason}")]
    InvalidResolver { kind: String, reason: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A `{source, destination}` prefix pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relocation {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl Relocation {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Which side of the channel factory a relocation applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelocationScope {
    Reads,
    #[default]
    Writes,
    Both,
}

impl RelocationScope {
    pub fn relocates_reads(self) -> bool {
        matches!(self, RelocationScope::Reads | RelocationScope::Both)
    }

    pub fn relocates_writes(self) -> bool {
        matches!(self, RelocationScope::Writes | RelocationScope::Both)
    }
}

/// Relocation applied at channel-open time rather than path-resolution time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRelocation {
    pub source: PathBuf,
    pub destination: PathBuf,
    #[serde(default)]
    pub scope: RelocationScope,
}

/// A resolver plugin entry, looked up by `kind` in the resolver registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverSpec {
    pub kind: String,
    #[serde(default)]
    pub source: Option<PathBuf>,
    #[serde(default)]
    pub destination: Option<PathBuf>,
    /// Free-form options for registry-provided resolvers
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl ResolverSpec {
    pub fn relocate(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            kind: "relocate".to_string(),
            source: Some(source.into()),
            destination: Some(destination.into()),
            options: BTreeMap::new(),
        }
    }
}

/// Configuration consumed by the resolver chain, channel factories and writers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Root under which logical files are laid out
    pub data_dir: PathBuf,
    /// Writer buffer capacity in bytes
    pub buffer_size: usize,
    /// Finish (flush + sync) on close instead of discarding buffered bytes
    pub finish_on_close: bool,
    /// Truncate the file to the logical position when finishing
    pub trim_on_finish: bool,
    /// Fsync after this many flushed bytes, if set
    pub trickle_fsync_interval: Option<u64>,
    /// Installed as the chain's default resolver
    pub path_relocation: Option<Relocation>,
    pub channel_relocation: Option<ChannelRelocation>,
    /// Additional resolvers, tried in order before the default
    pub resolvers: Vec<ResolverSpec>,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            buffer_size: DEFAULT_BUFFER_SIZE,
            finish_on_close: false,
            trim_on_finish: true,
            trickle_fsync_interval: None,
            path_relocation: None,
            channel_relocation: None,
            resolvers: Vec::new(),
        }
    }
}

impl IoConfig {
    /// Default configuration rooted at `data_dir`
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Parse and validate configuration from TOML content
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: IoConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::Invalid(
                "buffer_size must be greater than zero".to_string(),
            ));
        }
        if self.trickle_fsync_interval == Some(0) {
            return Err(ConfigError::Invalid(
                "trickle_fsync_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "io_tests.rs"]
mod tests;
