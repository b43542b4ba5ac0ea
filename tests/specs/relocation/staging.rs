// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel relocation specs
//!
//! Verify reads and writes can be pointed at different trees.

use crate::prelude::*;
use similar_asserts::assert_eq;
use sstio_adapters::read_all;

const STAGING: &str = r#"
data_dir = "{root}/data"

[channel_relocation]
source = "{root}/data"
destination = "{root}/staging"
scope = "writes"
"#;

#[test]
fn writes_land_in_staging_while_source_is_untouched() {
    let ws = Workspace::empty();
    ws.file("data/ks/events/nb-1-big-Data.db", b"live");
    let ctx = ws.context(STAGING);

    let mut txn = ctx.open_transactional_writer(&data_file()).unwrap();
    txn.write(b"rewritten").unwrap();
    txn.finish().unwrap();

    assert_eq!(ws.read("staging/ks/events/nb-1-big-Data.db"), b"rewritten");
    assert_eq!(ws.read("data/ks/events/nb-1-big-Data.db"), b"live");
}

#[test]
fn reads_still_come_from_source() {
    let ws = Workspace::empty();
    ws.file("data/ks/events/nb-1-big-Data.db", b"live");
    let ctx = ws.context(STAGING);
    let factory = ctx.channel_factory().unwrap();

    let mut channel = factory.open_for_read(&data_file()).unwrap();

    assert_eq!(read_all(channel.as_mut()).unwrap(), b"live");
    assert_eq!(
        factory.write_path(&data_file()),
        ws.join("staging/ks/events/nb-1-big-Data.db")
    );
}

#[test]
fn both_scope_reads_back_staged_file() {
    let ws = Workspace::empty();
    let ctx = ws.context(&STAGING.replace(r#"scope = "writes""#, r#"scope = "both""#));

    let mut txn = ctx.open_transactional_writer(&data_file()).unwrap();
    txn.write(b"staged").unwrap();
    txn.finish().unwrap();

    let mut channel = ctx
        .channel_factory()
        .unwrap()
        .open_for_read(&data_file())
        .unwrap();
    assert_eq!(read_all(channel.as_mut()).unwrap(), b"staged");
    assert!(!ws.exists("data/ks/events/nb-1-big-Data.db"));
}
