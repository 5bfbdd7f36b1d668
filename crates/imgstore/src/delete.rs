// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::{Error, Result};
use crate::slot::IMG_ID_LEN;
use crate::store::Store;

/// Marks the slot for `id` invalid, bumps `version`, and flushes header
/// then slot. Payload bytes linger until compaction.
pub fn delete(store: &mut Store, id: &str) -> Result<()> {
    if id.is_empty() || id.len() > IMG_ID_LEN - 1 {
        return Err(Error::InvalidImgId(id.to_string()));
    }

    let index = store
        .slots
        .iter()
        .position(|s| s.is_valid() && s.img_id_bytes() == id.as_bytes())
        .ok_or_else(|| Error::FileNotFound(id.to_string()))?;

    store.slots[index].set_valid(false);
    store.header.num_files -= 1;
    store.header.version += 1;

    store.flush_header()?;
    store.flush_slot(index)?;

    tracing::info!(id, index, "deleted image");
    Ok(())
}
