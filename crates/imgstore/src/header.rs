// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::{Error, Result};

/// Literal tag written into every store's `name` field. Identifies the file
/// format regardless of which implementation produced it.
pub const STORE_NAME: &str = "EPFL ImgStore binary";

/// Width in bytes of the on-disk `name` field (31 usable ASCII bytes + NUL).
pub const NAME_LEN: usize = 32;

/// Longest store filename the CLI/HTTP front ends accept, per the original
/// dispatcher's `strlen(img_store_filename) > MAX_IMGST_NAME` check (it
/// reuses the header name field's usable width as the filename length cap).
pub const MAX_IMGST_NAME: usize = NAME_LEN - 1;

pub const MAX_MAX_FILES: u32 = 100_000;
pub const MAX_THUMB_RES: u16 = 128;
pub const MAX_SMALL_RES: u16 = 256;

pub const HEADER_SIZE: usize = NAME_LEN + 4 + 4 + 4 + 2 * 4 + 4 + 8;

/// Index into [`Header::res_resized`] / [`crate::slot::Slot::size`] /
/// [`crate::slot::Slot::offset`] for each resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Thumb = 0,
    Small = 1,
    Orig = 2,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::Thumb, Resolution::Small, Resolution::Orig];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Maps a CLI/HTTP resolution tag to its index, per the specification's
    /// resolution tag mapping.
    pub fn from_tag(tag: &str) -> Result<Resolution> {
        match tag {
            "thumb" | "thumbnail" => Ok(Resolution::Thumb),
            "small" => Ok(Resolution::Small),
            "orig" | "original" => Ok(Resolution::Orig),
            other => Err(Error::Resolutions(other.to_string())),
        }
    }
}

/// Fixed-layout store header. Every instance of this struct on disk is
/// byte-exact: the codec never relies on struct padding, only on the
/// explicit field widths below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: [u8; NAME_LEN],
    pub version: u32,
    pub num_files: u32,
    pub max_files: u32,
    /// `[thumb_x, thumb_y, small_x, small_y]`.
    pub res_resized: [u16; 4],
    unused_32: u32,
    unused_64: u64,
}

impl Header {
    pub fn new(max_files: u32, thumb_res: (u16, u16), small_res: (u16, u16)) -> Result<Header> {
        if max_files < 1 || max_files > MAX_MAX_FILES {
            return Err(Error::MaxFiles(max_files));
        }
        for dim in [thumb_res.0, thumb_res.1] {
            if dim < 1 || dim > MAX_THUMB_RES {
                return Err(Error::InvalidArgument(format!(
                    "thumbnail resolution {dim} out of range"
                )));
            }
        }
        for dim in [small_res.0, small_res.1] {
            if dim < 1 || dim > MAX_SMALL_RES {
                return Err(Error::InvalidArgument(format!(
                    "small resolution {dim} out of range"
                )));
            }
        }

        let mut name = [0u8; NAME_LEN];
        let tag = STORE_NAME.as_bytes();
        name[..tag.len()].copy_from_slice(tag);

        Ok(Header {
            name,
            version: 0,
            num_files: 0,
            max_files,
            res_resized: [thumb_res.0, thumb_res.1, small_res.0, small_res.1],
            unused_32: 0,
            unused_64: 0,
        })
    }

    pub fn thumb_res(&self) -> (u16, u16) {
        (self.res_resized[0], self.res_resized[1])
    }

    pub fn small_res(&self) -> (u16, u16) {
        (self.res_resized[2], self.res_resized[3])
    }

    pub fn res(&self, r: Resolution) -> (u16, u16) {
        match r {
            Resolution::Thumb => self.thumb_res(),
            Resolution::Small => self.small_res(),
            Resolution::Orig => (0, 0),
        }
    }

    pub fn name_str(&self) -> String {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(self.name.len());
        String::from_utf8_lossy(&self.name[..end]).into_owned()
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        let mut at = 0usize;

        buf[at..at + NAME_LEN].copy_from_slice(&self.name);
        at += NAME_LEN;
        buf[at..at + 4].copy_from_slice(&self.version.to_le_bytes());
        at += 4;
        buf[at..at + 4].copy_from_slice(&self.num_files.to_le_bytes());
        at += 4;
        buf[at..at + 4].copy_from_slice(&self.max_files.to_le_bytes());
        at += 4;
        for v in self.res_resized {
            buf[at..at + 2].copy_from_slice(&v.to_le_bytes());
            at += 2;
        }
        buf[at..at + 4].copy_from_slice(&self.unused_32.to_le_bytes());
        at += 4;
        buf[at..at + 8].copy_from_slice(&self.unused_64.to_le_bytes());
        at += 8;
        debug_assert_eq!(at, HEADER_SIZE);
        buf
    }

    pub fn from_bytes(buf: &[u8; HEADER_SIZE]) -> Header {
        let mut at = 0usize;

        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&buf[at..at + NAME_LEN]);
        at += NAME_LEN;

        let version = u32::from_le_bytes(buf[at..at + 4].try_into().unwrap());
        at += 4;
        let num_files = u32::from_le_bytes(buf[at..at + 4].try_into().unwrap());
        at += 4;
        let max_files = u32::from_le_bytes(buf[at..at + 4].try_into().unwrap());
        at += 4;

        let mut res_resized = [0u16; 4];
        for slot in res_resized.iter_mut() {
            *slot = u16::from_le_bytes(buf[at..at + 2].try_into().unwrap());
            at += 2;
        }

        let unused_32 = u32::from_le_bytes(buf[at..at + 4].try_into().unwrap());
        at += 4;
        let unused_64 = u64::from_le_bytes(buf[at..at + 8].try_into().unwrap());
        at += 8;
        debug_assert_eq!(at, HEADER_SIZE);

        Header {
            name,
            version,
            num_files,
            max_files,
            res_resized,
            unused_32,
            unused_64,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_through_bytes() {
        let mut header = Header::new(10, (64, 64), (256, 256)).unwrap();
        header.version = 3;
        header.num_files = 2;

        let bytes = header.to_bytes();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(Header::from_bytes(&bytes), header);
    }

    #[test]
    fn rejects_max_files_out_of_range() {
        assert!(matches!(
            Header::new(0, (64, 64), (256, 256)),
            Err(Error::MaxFiles(0))
        ));
        assert!(matches!(
            Header::new(MAX_MAX_FILES + 1, (64, 64), (256, 256)),
            Err(Error::MaxFiles(_))
        ));
    }

    #[test]
    fn resolution_from_tag_matches_original_indices() {
        assert_eq!(Resolution::from_tag("thumb").unwrap(), Resolution::Thumb);
        assert_eq!(Resolution::from_tag("small").unwrap(), Resolution::Small);
        assert_eq!(Resolution::from_tag("orig").unwrap(), Resolution::Orig);
        assert!(Resolution::from_tag("huge").is_err());
    }
}
