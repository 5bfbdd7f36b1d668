// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compactor ("garbage collection"): rebuilds the file to reclaim holes left
//! by deleted slots.
//!
//! ## Algorithm
//! Phase 1 walks the payload region once, from its start to end-of-file, in
//! order; at each position it looks for a valid slot whose `(offset, size)`
//! claims that byte range and advances past it. Any gap means the file has
//! holes and needs rebuilding.
//!
//! Phase 2 opens a fresh store with the same `max_files`/`res_resized` and
//! re-inserts every valid slot's original payload through the standard
//! insert pipeline — this recomputes digests, so cross-slot dedup is
//! restored automatically for originals. Already-materialized secondary
//! resolutions are copied over as raw bytes and re-registered directly,
//! without going through `resize` again.
//!
//! Phase 3 is the atomic swap: close both stores, delete the source, rename
//! the temporary file over it. On any I/O failure during phase 2, the
//! source is left untouched and the temporary file is not auto-deleted.

use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::codec;
use crate::error::Result;
use crate::header::Resolution;
use crate::insert;
use crate::store::{OpenMode, Store};

/// Returns `true` if the payload region of an already-opened store contains
/// at least one byte range not claimed by any valid slot.
pub fn needs_gc(store: &mut Store) -> Result<bool> {
    let end_of_file = store.file.seek(SeekFrom::End(0))?;
    let mut cursor = codec::payload_region_start(store.header.max_files);

    'walk: while cursor < end_of_file {
        for slot in &store.slots {
            if !slot.is_valid() {
                continue;
            }
            for r in Resolution::ALL {
                if slot.size_of(r) != 0 && slot.offset_of(r) == cursor {
                    cursor += slot.size_of(r) as u64;
                    continue 'walk;
                }
            }
        }
        return Ok(true);
    }
    Ok(false)
}

/// Compacts `source_path` into `temp_path`, then renames `temp_path` over
/// `source_path`. Returns `true` if a rewrite happened, `false` if the
/// source had no holes and was left untouched.
pub fn gc(source_path: &Path, temp_path: &Path) -> Result<bool> {
    let mut source = Store::open(source_path, OpenMode::ReadOnly)?;

    if !needs_gc(&mut source)? {
        tracing::info!(path = %source_path.display(), "no holes, skipping compaction");
        return Ok(false);
    }

    let mut temp = Store::create(
        temp_path,
        source.header().max_files,
        source.header().thumb_res(),
        source.header().small_res(),
    )?;

    let mut next_temp_index = 0usize;
    for i in 0..source.slots().len() {
        if !source.slots()[i].is_valid() {
            continue;
        }
        let slot = source.slots()[i];
        let orig_size = slot.size_of(Resolution::Orig) as usize;
        let orig_offset = slot.offset_of(Resolution::Orig);

        let mut buf = vec![0u8; orig_size];
        source.file.seek(SeekFrom::Start(orig_offset))?;
        source.file.read_exact(&mut buf)?;

        insert::insert(&mut temp, &buf, &slot.img_id_str())?;
        let temp_index = next_temp_index;
        next_temp_index += 1;

        for r in [Resolution::Thumb, Resolution::Small] {
            let size = slot.size_of(r);
            if size == 0 {
                continue;
            }
            let mut variant = vec![0u8; size as usize];
            source.file.seek(SeekFrom::Start(slot.offset_of(r)))?;
            source.file.read_exact(&mut variant)?;

            temp.file.seek(SeekFrom::End(0))?;
            let append_offset = temp.file.stream_position()?;
            temp.file.write_all(&variant)?;
            temp.file.flush()?;

            temp.slots[temp_index].set_res(r, size, append_offset);
            temp.flush_slot(temp_index)?;
        }
    }

    drop(source);
    drop(temp);

    std::fs::remove_file(source_path)?;
    std::fs::rename(temp_path, source_path)?;

    tracing::info!(path = %source_path.display(), "compaction complete");
    Ok(true)
}
