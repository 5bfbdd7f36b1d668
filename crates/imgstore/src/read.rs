// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::io::{Read, Seek, SeekFrom};

use crate::error::{Error, Result};
use crate::header::Resolution;
use crate::resize;
use crate::store::Store;

/// Reads the bytes of `id` at resolution `r`, lazily materializing it if
/// it's cold. Returns `FileNotFound` on a miss; an empty store short-circuits
/// without scanning.
pub fn read(store: &mut Store, id: &str, r: Resolution) -> Result<Vec<u8>> {
    if store.header.num_files == 0 {
        return Err(Error::FileNotFound(id.to_string()));
    }

    let index = store
        .slots
        .iter()
        .position(|s| s.is_valid() && s.img_id_bytes() == id.as_bytes())
        .ok_or_else(|| Error::FileNotFound(id.to_string()))?;

    if store.slots[index].size_of(r) == 0 {
        resize::ensure_resolution(store, index, r)?;
    }

    let slot = store.slots[index];
    let size = slot.size_of(r) as usize;
    let offset = slot.offset_of(r);

    let mut buf = vec![0u8; size];
    store.file.seek(SeekFrom::Start(offset))?;
    store.file.read_exact(&mut buf)?;
    Ok(buf)
}
