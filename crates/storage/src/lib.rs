// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sstio-storage: buffered, transactional and checksummed file writers
//!
//! Writers append to a channel obtained from a [`sstio_adapters::ChannelFactory`],
//! so the physical location of every file follows the configured resolver
//! chain and relocation.

mod buffered;
mod checksum;
mod checksummed;
mod context;
mod error;
mod options;
mod sequential;
mod transactional;

pub use buffered::{BufferedWriter, FlushListener, Mark};
pub use checksum::{
    format_digest, parse_digest, read_checksum_records, verify_checksums, ChecksumRecord,
    Verified, RECORD_LEN,
};
pub use checksummed::{ChecksummedMark, ChecksummedWriter};
pub use context::WriterContext;
pub use error::StorageError;
pub use options::WriterOptions;
pub use sequential::SequentialWriter;
pub use transactional::{TransactionalWriter, TxnState};
