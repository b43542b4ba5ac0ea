// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Checksummed writer specs
//!
//! Verify side-files are produced alongside the data file and catch damage.

use crate::prelude::*;
use similar_asserts::assert_eq;

const DATA: &str = "data/ks/events/nb-1-big-Data.db";
const CHECKSUM: &str = "data/ks/events/nb-1-big-Data.db.checksum";
const DIGEST: &str = "data/ks/events/nb-1-big-Data.db.digest";

fn config() -> &'static str {
    r#"
    data_dir = "{root}/data"
    buffer_size = 1024
    "#
}

#[test]
fn checksum_file_starts_empty_and_grows_per_flush() {
    let ws = Workspace::empty();
    let ctx = ws.context(config());
    let mut txn = TransactionalWriter::new(ctx.open_checksummed_writer(&data_file()).unwrap());

    assert!(ws.exists(CHECKSUM));
    assert_eq!(ws.read(CHECKSUM).len(), 0);

    txn.write(&pattern(1024, 0)).unwrap();
    assert_eq!(ws.read(CHECKSUM).len(), 0);

    txn.write(&pattern(1, 1)).unwrap();
    assert_eq!(ws.read(CHECKSUM).len(), 16);

    txn.finish().unwrap();
    assert_eq!(ws.read(CHECKSUM).len(), 32);
    assert_eq!(ws.read(DATA).len(), 1025);
}

#[test]
fn committed_files_verify() {
    let ws = Workspace::empty();
    let ctx = ws.context(config());
    let mut txn = TransactionalWriter::new(ctx.open_checksummed_writer(&data_file()).unwrap());

    txn.write(&pattern(3000, 5)).unwrap();
    txn.finish().unwrap();

    let factory = ctx.channel_factory().unwrap();
    let verified = verify_checksums(factory.as_ref(), &data_file()).unwrap();
    assert_eq!(verified.length, 3000);
    assert_eq!(verified.records, 3);
    assert!(verified.digest_checked);
    assert_eq!(
        String::from_utf8(ws.read(DIGEST)).unwrap(),
        crc32fast::hash(&pattern(3000, 5)).to_string()
    );
}

#[test]
fn damaged_data_is_reported() {
    let ws = Workspace::empty();
    let ctx = ws.context(config());
    let mut txn = TransactionalWriter::new(ctx.open_checksummed_writer(&data_file()).unwrap());
    txn.write(&pattern(2048, 9)).unwrap();
    txn.finish().unwrap();

    let mut data = ws.read(DATA);
    data[1500] ^= 0x40;
    ws.file(DATA, &data);

    let factory = ctx.channel_factory().unwrap();
    match verify_checksums(factory.as_ref(), &data_file()) {
        Err(StorageError::Corrupt { offset, .. }) => assert_eq!(offset, 1024),
        other => panic!("expected corruption, got {:?}", other),
    }
}

#[test]
fn rewound_checksummed_file_still_verifies() {
    let ws = Workspace::empty();
    let ctx = ws.context(config());
    let mut txn = TransactionalWriter::new(ctx.open_checksummed_writer(&data_file()).unwrap());

    txn.write(&pattern(1500, 1)).unwrap();
    let mark = txn.mark();
    txn.write(&pattern(2000, 2)).unwrap();
    txn.reset_and_truncate(&mark).unwrap();
    txn.write(&pattern(10, 3)).unwrap();
    txn.finish().unwrap();

    let factory = ctx.channel_factory().unwrap();
    let verified = verify_checksums(factory.as_ref(), &data_file()).unwrap();
    assert_eq!(verified.length, 1510);
    assert_eq!(
        ws.read(DATA),
        [pattern(1500, 1), pattern(10, 3)].concat()
    );
}

#[test]
fn side_files_follow_path_relocation() {
    let ws = Workspace::empty();
    let ctx = ws.context(
        r#"
        data_dir = "{root}/data"

        [path_relocation]
        source = "{root}/data"
        destination = "{root}/fast"
        "#,
    );
    let mut txn = TransactionalWriter::new(ctx.open_checksummed_writer(&data_file()).unwrap());
    txn.write(b"relocated").unwrap();
    txn.finish().unwrap();

    for name in ["nb-1-big-Data.db", "nb-1-big-Data.db.checksum", "nb-1-big-Data.db.digest"] {
        assert!(ws.exists(&format!("fast/ks/events/{name}")), "{name}");
        assert!(!ws.exists(&format!("data/ks/events/{name}")), "{name}");
    }
}
