// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::TempDir;

fn data_id() -> LogicalFileId {
    LogicalFileId::new("ks", "events", "Data.db")
}

#[test]
fn identity_factory_uses_default_layout() {
    let dir = TempDir::new().unwrap();
    let factory = PathChannelFactory::identity(dir.path());

    assert_eq!(
        factory.write_path(&data_id()),
        dir.path().join("ks").join("events").join("Data.db")
    );
    assert_eq!(factory.read_path(&data_id()), factory.write_path(&data_id()));
}

#[test]
fn open_for_write_creates_directories_and_file() {
    let dir = TempDir::new().unwrap();
    let factory = PathChannelFactory::identity(dir.path());

    let channel = factory.open_for_write(&data_id()).unwrap();

    assert!(channel.path().exists());
    assert_eq!(channel.size().unwrap(), 0);
}

#[test]
fn open_for_read_missing_file_propagates_not_found() {
    let dir = TempDir::new().unwrap();
    let factory = PathChannelFactory::identity(dir.path());

    let err = factory.open_for_read(&data_id()).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn chain_resolution_is_applied() {
    let dir = TempDir::new().unwrap();
    let chain = Arc::new(ResolverChain::new());
    chain.add(Arc::new(RelocatingResolver::new(
        dir.path().join("ks"),
        dir.path().join("moved"),
    )));
    let factory = PathChannelFactory::new(dir.path(), chain);

    let channel = factory.open_for_write(&data_id()).unwrap();

    assert_eq!(
        channel.path(),
        dir.path().join("moved").join("events").join("Data.db")
    );
}

#[test]
fn channel_relocation_applies_after_chain() {
    let dir = TempDir::new().unwrap();
    let factory = PathChannelFactory::identity(dir.path()).relocated(RelocatingResolver::new(
        dir.path(),
        dir.path().join("staging"),
    ));

    assert_eq!(
        factory.write_path(&data_id()),
        dir.path().join("staging").join("ks").join("events").join("Data.db")
    );
}

#[test]
fn channel_relocation_outside_source_is_ignored() {
    let dir = TempDir::new().unwrap();
    let factory = PathChannelFactory::identity(dir.path())
        .relocated(RelocatingResolver::new("/nowhere", "/elsewhere"));

    assert_eq!(
        factory.write_path(&data_id()),
        data_id().default_path(dir.path())
    );
}

#[test]
fn chain_mutation_is_visible_to_factory() {
    let dir = TempDir::new().unwrap();
    let chain = Arc::new(ResolverChain::new());
    let factory = PathChannelFactory::new(dir.path(), Arc::clone(&chain));

    let before = factory.write_path(&data_id());
    chain.add(Arc::new(RelocatingResolver::new(dir.path(), "/late")));
    let after = factory.write_path(&data_id());

    assert_eq!(before, data_id().default_path(dir.path()));
    assert_eq!(after, PathBuf::from("/late/ks/events/Data.db"));
}
