// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The image codec collaborator: decode/dimensions/resize/encode over JPEG
//! bytes. The rest of the storage engine treats this as opaque; only this
//! module knows about the `image` crate.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageFormat};

use crate::error::{Error, Result};

pub fn decode(buf: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory_with_format(buf, ImageFormat::Jpeg)
        .map_err(|e| Error::ImgLib(e.to_string()))
}

pub fn dimensions(handle: &DynamicImage) -> (u32, u32) {
    handle.dimensions()
}

/// Resizes `handle` uniformly by `factor`, matching the original's
/// area-preserving `vips_resize(image, ratio)` call: both axes are scaled by
/// the same ratio, never stretched independently.
pub fn resize(handle: &DynamicImage, factor: f64) -> Result<DynamicImage> {
    if factor <= 0.0 || !factor.is_finite() {
        return Err(Error::ImgLib(format!("invalid resize factor {factor}")));
    }
    let (w, h) = dimensions(handle);
    let new_w = ((w as f64) * factor).round().max(1.0) as u32;
    let new_h = ((h as f64) * factor).round().max(1.0) as u32;
    Ok(handle.resize_exact(new_w, new_h, image::imageops::FilterType::Triangle))
}

pub fn encode(handle: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new(&mut buf);
    handle
        .write_with_encoder(encoder)
        .map_err(|e| Error::ImgLib(e.to_string()))?;
    Ok(buf)
}

/// Uniform shrink factor for `r`, per `shrink_value` in the original
/// implementation: `min(target_w/orig_w, target_h/orig_h)`.
pub fn shrink_factor(orig: (u32, u32), target: (u16, u16)) -> f64 {
    let h_shrink = target.0 as f64 / orig.0 as f64;
    let v_shrink = target.1 as f64 / orig.1 as f64;
    h_shrink.min(v_shrink)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn shrink_factor_is_the_tighter_axis() {
        // 200x100 shrunk toward a 64x64 target: width is the binding axis.
        assert_eq!(shrink_factor((200, 100), (64, 64)), 64.0 / 200.0);
        // A square original keeps both axes equal.
        assert_eq!(shrink_factor((100, 100), (50, 25)), 0.25);
    }

    #[test]
    fn resize_keeps_aspect_via_exact_dims_rounding() {
        let img = DynamicImage::ImageRgb8(image::ImageBuffer::from_pixel(
            200,
            100,
            image::Rgb([10u8, 20, 30]),
        ));
        let resized = resize(&img, 0.5).unwrap();
        assert_eq!(dimensions(&resized), (100, 50));
    }

    #[test]
    fn rejects_non_finite_or_non_positive_factor() {
        let img = DynamicImage::ImageRgb8(image::ImageBuffer::from_pixel(
            10,
            10,
            image::Rgb([0u8, 0, 0]),
        ));
        assert!(resize(&img, 0.0).is_err());
        assert!(resize(&img, f64::NAN).is_err());
    }
}
