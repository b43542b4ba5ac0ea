// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Writer lifecycle specs
//!
//! Verify what reaches disk across write, rewind, commit and abort.

use crate::prelude::*;
use similar_asserts::assert_eq;

const DATA: &str = "data/ks/events/nb-1-big-Data.db";

#[test]
fn rewind_after_flush_then_commit() {
    let ws = Workspace::empty();
    let ctx = ws.context(
        r#"
        data_dir = "{root}/data"
        buffer_size = 48
        "#,
    );
    let mut txn = ctx.open_transactional_writer(&data_file()).unwrap();
    let kept = pattern(64, 1);

    txn.write(&kept).unwrap();
    let mark = txn.mark();
    txn.write(&pattern(64, 2)).unwrap();
    assert_eq!(txn.last_flush_offset(), 96);
    assert_eq!(ws.read(DATA).len(), 96);

    txn.reset_and_truncate(&mark).unwrap();
    assert_eq!(txn.position(), 64);
    assert_eq!(txn.last_flush_offset(), 64);
    assert_eq!(ws.read(DATA), kept);

    txn.write(b"!").unwrap();
    txn.prepare_to_commit().unwrap();
    txn.commit().unwrap();

    assert_eq!(ws.read(DATA), [kept, b"!".to_vec()].concat());
}

#[test]
fn small_writes_stay_buffered_until_prepare() {
    let ws = Workspace::empty();
    let ctx = ws.context(r#"data_dir = "{root}/data""#);
    let mut txn = ctx.open_transactional_writer(&data_file()).unwrap();

    txn.write(b"header").unwrap();
    txn.write(b"row").unwrap();
    assert_eq!(ws.read(DATA).len(), 0);

    txn.prepare_to_commit().unwrap();
    assert_eq!(txn.state(), TxnState::Prepared);
    assert_eq!(ws.read(DATA), b"headerrow");

    txn.commit().unwrap();
}

#[test]
fn abort_keeps_only_flushed_bytes_and_is_repeatable() {
    let ws = Workspace::empty();
    let ctx = ws.context(
        r#"
        data_dir = "{root}/data"
        buffer_size = 16
        "#,
    );
    let mut txn = ctx.open_transactional_writer(&data_file()).unwrap();

    txn.write(&pattern(40, 0)).unwrap();
    txn.abort();
    txn.abort();

    assert_eq!(txn.state(), TxnState::Aborted);
    assert_eq!(ws.read(DATA), pattern(32, 0));
    assert!(matches!(
        txn.write(b"late"),
        Err(StorageError::IllegalState { .. })
    ));
}

#[test]
fn abort_after_prepare_leaves_file_in_place() {
    let ws = Workspace::empty();
    let ctx = ws.context(r#"data_dir = "{root}/data""#);
    let mut txn = ctx.open_transactional_writer(&data_file()).unwrap();

    txn.write(b"prepared").unwrap();
    txn.prepare_to_commit().unwrap();
    txn.abort();

    assert_eq!(ws.read(DATA), b"prepared");
}

#[test]
fn dropping_an_uncommitted_writer_aborts_it() {
    let ws = Workspace::empty();
    let ctx = ws.context(r#"data_dir = "{root}/data""#);

    {
        let mut txn = ctx.open_transactional_writer(&data_file()).unwrap();
        txn.write(b"never committed").unwrap();
    }

    assert_eq!(ws.read(DATA).len(), 0);
}

#[test]
fn finish_on_close_flushes_plain_writer() {
    let ws = Workspace::empty();
    let ctx = ws.context(
        r#"
        data_dir = "{root}/data"
        finish_on_close = true
        "#,
    );

    let mut writer = ctx.open_writer(&data_file()).unwrap();
    writer.write(b"closed").unwrap();
    writer.close().unwrap();

    assert_eq!(ws.read(DATA), b"closed");
}

#[test]
fn writer_is_usable_as_io_write() {
    use std::io::Write;

    let ws = Workspace::empty();
    let ctx = ws.context(r#"data_dir = "{root}/data""#);
    let mut writer = ctx.open_writer(&data_file()).unwrap();

    writeln!(writer, "row {}", 1).unwrap();
    writeln!(writer, "row {}", 2).unwrap();
    writer.finish().unwrap();

    assert_eq!(ws.read(DATA), b"row 1\nrow 2\n");
}
