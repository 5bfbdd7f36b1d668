// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slot allocation and content/id deduplication.
//!
//! The original implementation signals "no content duplicate found" by
//! resetting `offset[ORIG]` to zero and letting the insert pipeline read
//! that sentinel back out. This module keeps the sentinel as an on-disk
//! detail (invariant 3 never stores a non-zero size with a zero offset) but
//! exposes a typed [`DedupOutcome`] to callers instead, per the
//! specification's recommended redesign.

use crate::error::{Error, Result};
use crate::header::Resolution;
use crate::slot::Slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupOutcome {
    /// No other valid slot shares this content; the payload still needs to
    /// be appended by the insert pipeline.
    NewContent,
    /// Slot `index` (by position in the table) already holds this exact
    /// content; offsets/sizes were copied from it.
    SharesWith(usize),
}

/// Finds the first free slot (`is_valid == 0`), scanning in ascending
/// index order. Returns `FullImgStore` if none is free.
pub fn find_free_slot(slots: &[Slot]) -> Result<usize> {
    slots
        .iter()
        .position(|s| !s.is_valid())
        .ok_or(Error::FullImgStore {
            max_files: slots.len() as u32,
        })
}

/// Runs deduplication for the tentative slot at `index` against every other
/// valid slot, in ascending index order (first match wins ties). `index`
/// itself must already carry its candidate `img_id` and `sha`.
///
/// On `DuplicateId`, the caller is responsible for rewinding the tentative
/// allocation (clearing `is_valid`).
pub fn dedup(slots: &[Slot], index: usize) -> Result<DedupOutcome> {
    let candidate = &slots[index];
    let mut outcome = DedupOutcome::NewContent;

    for (j, other) in slots.iter().enumerate() {
        if j == index || !other.is_valid() {
            continue;
        }
        if other.img_id_bytes() == candidate.img_id_bytes() {
            return Err(Error::DuplicateId(candidate.img_id_str()));
        }
        if outcome == DedupOutcome::NewContent && other.sha == candidate.sha {
            outcome = DedupOutcome::SharesWith(j);
        }
    }

    Ok(outcome)
}

/// Applies a [`DedupOutcome::SharesWith`] result: copies the `(size,
/// offset)` triple for every resolution from `source` into `slots[index]`.
pub fn share_offsets(slots: &mut [Slot], index: usize, source: usize) {
    let donor = slots[source];
    let target = &mut slots[index];
    for r in Resolution::ALL {
        target.set_res(r, donor.size_of(r), donor.offset_of(r));
    }
}
