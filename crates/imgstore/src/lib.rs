// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `imgstore` is a single-file, content-addressed image database. Every
//! image lives inside one monolithic file made up of a fixed-layout header,
//! a preallocated slot table of metadata records, and a payload region of
//! raw JPEG bytes appended after it.
//!
//! This crate implements the storage engine only: the on-disk layout and
//! its invariants, the slot allocator, content deduplication, lazy
//! secondary-resolution generation, and the compactor. CLI and HTTP front
//! ends live in sibling crates and call through to the functions here.

mod alloc;
mod codec;
mod delete;
mod digest;
mod error;
mod gc;
mod header;
mod image_codec;
mod insert;
mod list;
mod read;
mod resize;
mod slot;
mod store;

pub use error::{Error, Result};
pub use header::{
    Header, Resolution, MAX_IMGST_NAME, MAX_MAX_FILES, MAX_SMALL_RES, MAX_THUMB_RES, STORE_NAME,
};
pub use list::{list_ids, list_json, list_stdout, ImageList};
pub use slot::Slot;
pub use store::{OpenMode, Store};

impl Store {
    /// Inserts `buf` under `id`. See [`insert::insert`].
    pub fn insert(&mut self, buf: &[u8], id: &str) -> Result<()> {
        insert::insert(self, buf, id)
    }

    /// Reads the bytes of `id` at resolution `r`, lazily resizing if cold.
    pub fn read(&mut self, id: &str, r: Resolution) -> Result<Vec<u8>> {
        read::read(self, id, r)
    }

    /// Marks `id`'s slot invalid. Payload bytes linger until compaction.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        delete::delete(self, id)
    }

    /// Returns `true` if the payload region has holes that compaction
    /// would reclaim.
    pub fn needs_gc(&mut self) -> Result<bool> {
        gc::needs_gc(self)
    }
}

/// Compacts `source_path` into `temp_path`, then atomically replaces
/// `source_path` with the compacted file. Returns `true` if a rewrite
/// happened, `false` if the store had no holes.
pub fn gc(source_path: &std::path::Path, temp_path: &std::path::Path) -> Result<bool> {
    gc::gc(source_path, temp_path)
}
