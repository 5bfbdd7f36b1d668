// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use sha2::{Digest, Sha256};

use crate::slot::SHA_LEN;

/// Computes the content digest of a payload. Used as the content-dedup key.
pub fn sha256(bytes: &[u8]) -> [u8; SHA_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}
