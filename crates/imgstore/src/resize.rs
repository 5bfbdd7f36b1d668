// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lazy resizer: materializes a secondary resolution variant on first read.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::Result;
use crate::header::Resolution;
use crate::image_codec;
use crate::store::Store;

/// Ensures resolution `r` exists for slot `i`, appending the encoded variant
/// to end-of-file and flushing the slot if it had to be materialized.
pub fn ensure_resolution(store: &mut Store, i: usize, r: Resolution) -> Result<()> {
    if r == Resolution::Orig {
        return Ok(());
    }
    if store.slots[i].size_of(r) != 0 {
        return Ok(());
    }

    let slot = store.slots[i];
    let orig_offset = slot.offset_of(Resolution::Orig);
    let orig_size = slot.size_of(Resolution::Orig) as usize;

    let mut buf = vec![0u8; orig_size];
    store.file.seek(SeekFrom::Start(orig_offset))?;
    store.file.read_exact(&mut buf)?;

    let decoded = image_codec::decode(&buf)?;
    let orig_dims = image_codec::dimensions(&decoded);
    let target = store.header.res(r);
    let factor = image_codec::shrink_factor(orig_dims, target);
    let resized = image_codec::resize(&decoded, factor)?;
    let encoded = image_codec::encode(&resized)?;

    store.file.seek(SeekFrom::End(0))?;
    let append_offset = store.file.stream_position()?;
    store.file.write_all(&encoded)?;
    store.file.flush()?;

    store.slots[i].set_res(r, encoded.len() as u32, append_offset);
    store.flush_slot(i)?;

    tracing::debug!(slot = i, resolution = ?r, bytes = encoded.len(), "materialized resized variant");
    Ok(())
}
