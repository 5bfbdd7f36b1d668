// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::io::{Seek, SeekFrom, Write};

use crate::alloc::{self, DedupOutcome};
use crate::digest;
use crate::error::{Error, Result};
use crate::header::Resolution;
use crate::image_codec;
use crate::store::Store;

/// Inserts `buf` under `id`. See the specification's insert pipeline for
/// the exact validation/allocation/dedup/append/flush sequence.
pub fn insert(store: &mut Store, buf: &[u8], id: &str) -> Result<()> {
    if buf.is_empty() || id.is_empty() {
        return Err(Error::InvalidArgument(
            "insert requires a non-empty buffer and id".into(),
        ));
    }
    if store.header.num_files >= store.header.max_files {
        return Err(Error::FullImgStore {
            max_files: store.header.max_files,
        });
    }

    let index = alloc::find_free_slot(&store.slots)?;
    let sha = digest::sha256(buf);

    let slot = &mut store.slots[index];
    slot.set_img_id(id.as_bytes());
    slot.sha = sha;
    slot.size[Resolution::Orig.index()] = buf.len() as u32;
    slot.set_valid(true);
    slot.offset = [0; 3];
    slot.size[Resolution::Thumb.index()] = 0;
    slot.size[Resolution::Small.index()] = 0;

    match alloc::dedup(&store.slots, index) {
        Ok(DedupOutcome::SharesWith(donor)) => {
            alloc::share_offsets(&mut store.slots, index, donor);
        }
        Ok(DedupOutcome::NewContent) => {
            // offset[ORIG] stays 0 until appended below.
        }
        Err(e @ Error::DuplicateId(_)) => {
            store.slots[index].set_valid(false);
            return Err(e);
        }
        Err(e) => return Err(e),
    }

    if store.slots[index].offset_of(Resolution::Orig) == 0 {
        store.file.seek(SeekFrom::End(0))?;
        let offset = store.file.stream_position()?;
        store.file.write_all(buf)?;
        store.file.flush()?;
        store.slots[index].offset[Resolution::Orig.index()] = offset;
    }

    let decoded = image_codec::decode(buf)?;
    let (w, h) = image_codec::dimensions(&decoded);
    store.slots[index].res_orig = [w, h];

    store.flush_slot(index)?;
    store.header.num_files += 1;
    store.header.version += 1;
    store.flush_header()?;

    tracing::info!(id, index, bytes = buf.len(), "inserted image");
    Ok(())
}
