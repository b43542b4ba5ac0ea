// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Path relocation specs
//!
//! Verify resolved paths decide where committed files land.

use crate::prelude::*;
use similar_asserts::assert_eq;
use sstio_core::RelocatingResolver;
use std::sync::Arc;

fn commit(ctx: &IoContext, content: &[u8]) {
    let mut txn = ctx.open_transactional_writer(&data_file()).unwrap();
    txn.write(content).unwrap();
    txn.finish().unwrap();
}

#[test]
fn unrelocated_files_use_default_layout() {
    let ws = Workspace::empty();
    let ctx = ws.context(r#"data_dir = "{root}/data""#);

    commit(&ctx, b"plain");

    assert_eq!(ws.read("data/ks/events/nb-1-big-Data.db"), b"plain");
}

#[test]
fn path_relocation_moves_the_file() {
    let ws = Workspace::empty();
    let ctx = ws.context(
        r#"
        data_dir = "{root}/data"

        [path_relocation]
        source = "{root}/data"
        destination = "{root}/fast"
        "#,
    );

    commit(&ctx, b"moved");

    assert_eq!(ws.read("fast/ks/events/nb-1-big-Data.db"), b"moved");
    assert!(!ws.exists("data/ks/events/nb-1-big-Data.db"));
}

#[test]
fn relocation_outside_its_source_is_ignored() {
    let ws = Workspace::empty();
    let ctx = ws.context(
        r#"
        data_dir = "{root}/data"

        [path_relocation]
        source = "{root}/elsewhere"
        destination = "{root}/fast"
        "#,
    );

    commit(&ctx, b"stays");

    assert_eq!(ws.read("data/ks/events/nb-1-big-Data.db"), b"stays");
}

#[test]
fn configured_resolver_is_tried_before_default() {
    let ws = Workspace::empty();
    let ctx = ws.context(
        r#"
        data_dir = "{root}/data"

        [path_relocation]
        source = "{root}/data"
        destination = "{root}/fast"

        [[resolvers]]
        kind = "relocate"
        source = "{root}/data/ks"
        destination = "{root}/hot"
        "#,
    );

    commit(&ctx, b"hot");

    assert_eq!(ws.read("hot/events/nb-1-big-Data.db"), b"hot");
    assert!(!ws.exists("fast/ks/events/nb-1-big-Data.db"));
}

#[test]
fn resolver_added_at_runtime_precedes_default() {
    let ws = Workspace::empty();
    let ctx = ws.context(
        r#"
        data_dir = "{root}/data"

        [path_relocation]
        source = "{root}/data"
        destination = "{root}/fast"
        "#,
    );

    ctx.add_resolver(Arc::new(RelocatingResolver::new(
        ws.join("data/ks/events"),
        ws.join("pinned"),
    )))
    .unwrap();
    commit(&ctx, b"pinned");

    assert_eq!(ws.read("pinned/nb-1-big-Data.db"), b"pinned");
}
