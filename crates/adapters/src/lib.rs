// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Physical I/O for logical files: channels, factories and the I/O context

pub mod channel;
pub mod context;
pub mod factory;
pub mod traced;

pub use channel::{read_all, Channel, FileChannel};
pub use context::IoContext;
pub use factory::{ChannelFactory, CompositeChannelFactory, PathChannelFactory};
pub use traced::TracedChannelFactory;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use channel::{ChannelCall, FakeChannel, FakeFileSystem};
#[cfg(any(test, feature = "test-support"))]
pub use factory::FakeChannelFactory;
