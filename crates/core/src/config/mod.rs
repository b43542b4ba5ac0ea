// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration modules

mod io;

pub use io::{
    ChannelRelocation, ConfigError, IoConfig, Relocation, RelocationScope, ResolverSpec,
    DEFAULT_BUFFER_SIZE,
};
