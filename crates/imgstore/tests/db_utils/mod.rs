// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for the integration tests: scratch store paths and tiny
//! synthetic JPEG payloads, so no binary fixture files need to live in the
//! repository.

use std::path::PathBuf;

use image::{ImageBuffer, Rgb};
use tempfile::TempDir;

/// Holds a `TempDir` alive for the duration of a test and hands out a path
/// inside it for a store file that does not exist yet.
pub struct ScratchStore {
    _dir: TempDir,
    pub path: PathBuf,
    pub tmp_path: PathBuf,
}

impl ScratchStore {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.imgst");
        let tmp_path = dir.path().join("test.imgst.tmp");
        ScratchStore {
            _dir: dir,
            path,
            tmp_path,
        }
    }
}

/// Encodes a `w x h` solid-color JPEG. `seed` perturbs the color so distinct
/// seeds reliably produce distinct content digests.
pub fn tiny_jpeg(w: u32, h: u32, seed: u8) -> Vec<u8> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(w, h, |x, y| Rgb([seed, (x % 256) as u8, (y % 256) as u8]));
    let mut buf = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new(&mut buf);
    image::DynamicImage::ImageRgb8(img)
        .write_with_encoder(encoder)
        .unwrap();
    buf
}
