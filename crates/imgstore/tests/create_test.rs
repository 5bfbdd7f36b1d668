// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod db_utils;

use db_utils::ScratchStore;
use imgstore::{OpenMode, Store, MAX_MAX_FILES};

#[test]
fn create_then_list_is_empty() {
    let scratch = ScratchStore::new();
    {
        let store = Store::create(&scratch.path, 10, (64, 64), (256, 256)).unwrap();
        assert_eq!(store.header().num_files, 0);
        assert_eq!(store.header().max_files, 10);
    }

    let store = Store::open(&scratch.path, OpenMode::ReadOnly).unwrap();
    let out = imgstore::list_stdout(&store);
    assert!(out.contains("IMAGE COUNT: 0"));
    assert!(out.contains("<< empty imgStore >>"));
    assert!(imgstore::list_ids(&store).is_empty());
}

#[test]
fn create_rejects_out_of_range_max_files() {
    let scratch = ScratchStore::new();
    let err = Store::create(&scratch.path, 0, (64, 64), (256, 256)).unwrap_err();
    assert!(matches!(err, imgstore::Error::MaxFiles(0)));

    let err = Store::create(&scratch.path, MAX_MAX_FILES + 1, (64, 64), (256, 256)).unwrap_err();
    assert!(matches!(err, imgstore::Error::MaxFiles(_)));
}

#[test]
fn create_rejects_out_of_range_resolutions() {
    let scratch = ScratchStore::new();
    assert!(Store::create(&scratch.path, 10, (0, 64), (256, 256)).is_err());
    assert!(Store::create(&scratch.path, 10, (129, 64), (256, 256)).is_err());
    assert!(Store::create(&scratch.path, 10, (64, 64), (257, 256)).is_err());
}

#[test]
fn reopened_store_round_trips_header() {
    let scratch = ScratchStore::new();
    Store::create(&scratch.path, 7, (32, 32), (128, 128)).unwrap();

    let store = Store::open(&scratch.path, OpenMode::ReadOnly).unwrap();
    assert_eq!(store.header().max_files, 7);
    assert_eq!(store.header().thumb_res(), (32, 32));
    assert_eq!(store.header().small_res(), (128, 128));
    assert_eq!(store.header().name_str(), imgstore::STORE_NAME);
    assert_eq!(store.slots().len(), 7);
}
