// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-writer settings derived from [`IoConfig`]

use sstio_core::{IoConfig, DEFAULT_BUFFER_SIZE};

/// Settings a writer is opened with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    /// Buffer capacity in bytes, at least 1
    pub buffer_size: usize,
    pub finish_on_close: bool,
    pub trim_on_finish: bool,
    pub trickle_fsync_interval: Option<u64>,
}

impl WriterOptions {
    pub fn from_config(config: &IoConfig) -> Self {
        Self {
            buffer_size: config.buffer_size.max(1),
            finish_on_close: config.finish_on_close,
            trim_on_finish: config.trim_on_finish,
            trickle_fsync_interval: config.trickle_fsync_interval.filter(|n| *n > 0),
        }
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    pub fn with_finish_on_close(mut self, finish_on_close: bool) -> Self {
        self.finish_on_close = finish_on_close;
        self
    }

    pub fn with_trim_on_finish(mut self, trim_on_finish: bool) -> Self {
        self.trim_on_finish = trim_on_finish;
        self
    }

    pub fn with_trickle_fsync(mut self, interval: Option<u64>) -> Self {
        self.trickle_fsync_interval = interval.filter(|n| *n > 0);
        self
    }
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            finish_on_close: false,
            trim_on_finish: true,
            trickle_fsync_interval: None,
        }
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
