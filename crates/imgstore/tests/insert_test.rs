// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod db_utils;

use db_utils::{tiny_jpeg, ScratchStore};
use imgstore::{OpenMode, Resolution, Store};

#[test]
fn insert_then_read_is_bit_equal() {
    let scratch = ScratchStore::new();
    Store::create(&scratch.path, 10, (64, 64), (256, 256)).unwrap();
    let mut store = Store::open(&scratch.path, OpenMode::ReadWrite).unwrap();

    let jpeg = tiny_jpeg(8, 8, 1);
    store.insert(&jpeg, "a").unwrap();

    let bytes = store.read("a", Resolution::Orig).unwrap();
    assert_eq!(bytes, jpeg);
    assert_eq!(store.header().num_files, 1);
    assert_eq!(store.header().version, 1);
}

#[test]
fn identical_content_deduplicates_the_payload() {
    let scratch = ScratchStore::new();
    Store::create(&scratch.path, 10, (64, 64), (256, 256)).unwrap();
    let mut store = Store::open(&scratch.path, OpenMode::ReadWrite).unwrap();

    let jpeg = tiny_jpeg(8, 8, 42);
    store.insert(&jpeg, "a").unwrap();
    store.insert(&jpeg, "b").unwrap();

    let slots = store.slots();
    let a = slots.iter().find(|s| s.img_id_str() == "a").unwrap();
    let b = slots.iter().find(|s| s.img_id_str() == "b").unwrap();
    assert_eq!(a.offset_of(Resolution::Orig), b.offset_of(Resolution::Orig));
    assert_eq!(a.size_of(Resolution::Orig), b.size_of(Resolution::Orig));
    assert_eq!(a.sha, b.sha);

    // header (64 bytes) + 10 slots (208 bytes each) + one shared payload.
    let expected_len = 64 + 10 * 208 + jpeg.len();
    let actual_len = std::fs::metadata(&scratch.path).unwrap().len() as usize;
    assert_eq!(actual_len, expected_len);
}

#[test]
fn duplicate_id_is_rejected_and_slot_count_unchanged() {
    let scratch = ScratchStore::new();
    Store::create(&scratch.path, 10, (64, 64), (256, 256)).unwrap();
    let mut store = Store::open(&scratch.path, OpenMode::ReadWrite).unwrap();

    store.insert(&tiny_jpeg(8, 8, 1), "a").unwrap();
    let err = store.insert(&tiny_jpeg(8, 8, 2), "a").unwrap_err();
    assert!(matches!(err, imgstore::Error::DuplicateId(id) if id == "a"));
    assert_eq!(store.header().num_files, 1);

    let reused = store
        .slots()
        .iter()
        .filter(|s| s.img_id_str() == "a")
        .count();
    assert_eq!(reused, 1);
}

#[test]
fn insert_rejects_empty_buffer_and_id() {
    let scratch = ScratchStore::new();
    Store::create(&scratch.path, 10, (64, 64), (256, 256)).unwrap();
    let mut store = Store::open(&scratch.path, OpenMode::ReadWrite).unwrap();

    assert!(matches!(
        store.insert(&[], "a"),
        Err(imgstore::Error::InvalidArgument(_))
    ));
    assert!(matches!(
        store.insert(&tiny_jpeg(4, 4, 1), ""),
        Err(imgstore::Error::InvalidArgument(_))
    ));
}

#[test]
fn insert_fails_once_store_is_full() {
    let scratch = ScratchStore::new();
    Store::create(&scratch.path, 2, (64, 64), (256, 256)).unwrap();
    let mut store = Store::open(&scratch.path, OpenMode::ReadWrite).unwrap();

    store.insert(&tiny_jpeg(4, 4, 1), "a").unwrap();
    store.insert(&tiny_jpeg(4, 4, 2), "b").unwrap();
    let err = store.insert(&tiny_jpeg(4, 4, 3), "c").unwrap_err();
    assert!(matches!(err, imgstore::Error::FullImgStore { max_files: 2 }));
}

#[test]
fn long_id_is_truncated_to_the_field_width() {
    let scratch = ScratchStore::new();
    Store::create(&scratch.path, 10, (64, 64), (256, 256)).unwrap();
    let mut store = Store::open(&scratch.path, OpenMode::ReadWrite).unwrap();

    let long_id: String = std::iter::repeat('x').take(200).collect();
    store.insert(&tiny_jpeg(4, 4, 1), &long_id).unwrap();

    let stored = &store.slots()[0];
    // IMG_ID_LEN is 128 bytes, always NUL-terminated.
    assert_eq!(stored.img_id_bytes().len(), 127);
}
