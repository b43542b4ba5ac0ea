// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checksum side-file format and verification
//!
//! The checksum file is a sequence of fixed-size little-endian records, one
//! per physical flush of the data file:
//!
//! ```text
//! offset: u64 | length: u32 | crc32: u32
//! ```
//!
//! The digest file holds the CRC32 of the whole data file as ASCII decimal.

use crate::error::StorageError;
use sstio_adapters::{read_all, Channel, ChannelFactory};
use sstio_core::LogicalFileId;
use std::io;

/// Encoded size of one [`ChecksumRecord`]
pub const RECORD_LEN: usize = 16;

/// CRC32 of one flushed span of the data file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumRecord {
    pub offset: u64,
    pub length: u32,
    pub crc32: u32,
}

impl ChecksumRecord {
    /// Record covering `data` written at `offset`
    pub fn for_span(offset: u64, data: &[u8]) -> Result<Self, StorageError> {
        let length = u32::try_from(data.len()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("span of {} bytes is too large for a checksum record", data.len()),
            )
        })?;
        Ok(Self {
            offset,
            length,
            crc32: crc32fast::hash(data),
        })
    }

    /// Offset one past the covered span
    pub fn end(&self) -> u64 {
        self.offset + u64::from(self.length)
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        data.len() == self.length as usize && crc32fast::hash(data) == self.crc32
    }

    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut out = [0u8; RECORD_LEN];
        out[..8].copy_from_slice(&self.offset.to_le_bytes());
        out[8..12].copy_from_slice(&self.length.to_le_bytes());
        out[12..].copy_from_slice(&self.crc32.to_le_bytes());
        out
    }

    pub fn decode(bytes: &[u8; RECORD_LEN]) -> Self {
        let mut offset = [0u8; 8];
        let mut length = [0u8; 4];
        let mut crc32 = [0u8; 4];
        offset.copy_from_slice(&bytes[..8]);
        length.copy_from_slice(&bytes[8..12]);
        crc32.copy_from_slice(&bytes[12..]);
        Self {
            offset: u64::from_le_bytes(offset),
            length: u32::from_le_bytes(length),
            crc32: u32::from_le_bytes(crc32),
        }
    }
}

/// Decode every record of a checksum file
pub fn read_checksum_records(
    channel: &mut dyn Channel,
) -> Result<Vec<ChecksumRecord>, StorageError> {
    let bytes = read_all(channel)?;
    if bytes.len() % RECORD_LEN != 0 {
        let whole = (bytes.len() / RECORD_LEN * RECORD_LEN) as u64;
        return Err(StorageError::corrupt(
            whole,
            format!(
                "checksum file length {} is not a multiple of {}",
                bytes.len(),
                RECORD_LEN
            ),
        ));
    }

    Ok(bytes
        .chunks_exact(RECORD_LEN)
        .map(|chunk| {
            let mut record = [0u8; RECORD_LEN];
            record.copy_from_slice(chunk);
            ChecksumRecord::decode(&record)
        })
        .collect())
}

/// Render a whole-file CRC32 the way the digest file stores it
pub fn format_digest(crc32: u32) -> String {
    crc32.to_string()
}

/// Parse the content of a digest file
pub fn parse_digest(content: &[u8]) -> Result<u32, StorageError> {
    std::str::from_utf8(content)
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .ok_or_else(|| StorageError::corrupt(0, "digest file is not a decimal CRC32"))
}

/// Outcome of a successful [`verify_checksums`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verified {
    pub records: usize,
    pub length: u64,
    pub crc32: u32,
    /// Whether a digest file was present and checked
    pub digest_checked: bool,
}

/// Re-read the data file of `id` and check it against its side-files.
///
/// Records must start at offset 0, be contiguous, cover the whole data file
/// and match their spans. The digest file is checked when present.
pub fn verify_checksums(
    factory: &dyn ChannelFactory,
    id: &LogicalFileId,
) -> Result<Verified, StorageError> {
    let data = read_all(factory.open_for_read(id)?.as_mut())?;
    let records = read_checksum_records(factory.open_for_read(&id.checksum_file())?.as_mut())?;

    let mut hasher = crc32fast::Hasher::new();
    let mut expected = 0u64;
    for record in &records {
        if record.offset != expected {
            return Err(StorageError::corrupt(
                record.offset,
                format!("record does not follow previous span ending at {}", expected),
            ));
        }
        let end = record.end();
        if end > data.len() as u64 {
            return Err(StorageError::corrupt(
                record.offset,
                format!("record extends past data length {}", data.len()),
            ));
        }
        let span = &data[record.offset as usize..end as usize];
        if !record.matches(span) {
            return Err(StorageError::corrupt(record.offset, "checksum mismatch"));
        }
        hasher.update(span);
        expected = end;
    }
    if expected != data.len() as u64 {
        return Err(StorageError::corrupt(
            expected,
            format!("data beyond {} is not covered by checksums", expected),
        ));
    }

    let crc32 = hasher.finalize();
    let digest_checked = match factory.open_for_read(&id.digest_file()) {
        Ok(mut channel) => {
            let stored = parse_digest(&read_all(channel.as_mut())?)?;
            if stored != crc32 {
                return Err(StorageError::corrupt(
                    0,
                    format!("digest {} does not match data crc {}", stored, crc32),
                ));
            }
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => return Err(e.into()),
    };

    tracing::debug!(
        file = %id,
        records = records.len(),
        length = expected,
        digest_checked,
        "checksums verified"
    );
    Ok(Verified {
        records: records.len(),
        length: expected,
        crc32,
        digest_checked,
    })
}

#[cfg(test)]
#[path = "checksum_tests.rs"]
mod tests;
