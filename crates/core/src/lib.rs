// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sstio-core: Core types for relocatable table-file I/O
//!
//! This crate provides:
//! - Logical file identities independent of physical location
//! - I/O configuration loaded from TOML
//! - The path resolver chain and its plugin registry

pub mod config;
pub mod id;
pub mod resolver;

pub use config::{
    ChannelRelocation, ConfigError, IoConfig, Relocation, RelocationScope, ResolverSpec,
    DEFAULT_BUFFER_SIZE,
};
pub use id::{LogicalFileId, CHECKSUM_SUFFIX, DIGEST_SUFFIX};
pub use resolver::{
    identity_path, PathResolver, RelocatingResolver, ResolverChain, ResolverConstructor,
    ResolverRegistry,
};
