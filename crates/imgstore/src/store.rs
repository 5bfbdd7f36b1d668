// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::codec;
use crate::error::{Error, Result};
use crate::header::Header;
use crate::slot::Slot;

/// How a store was opened. The original C implementation accepted any
/// `fopen` mode string that happened to start with `"rb"`; this enum makes
/// the two supported modes explicit, per the specification's redesign flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    ReadOnly,
    ReadWrite,
}

/// Owns the file descriptor, in-memory header, and metadata slot table for
/// one imgStore file. Single-writer, single-reader: not safe for concurrent
/// access, by design (see the specification's concurrency model).
pub struct Store {
    pub(crate) file: File,
    pub(crate) header: Header,
    pub(crate) slots: Vec<Slot>,
    mode: OpenMode,
}

impl Store {
    /// Opens an existing store, reading the header and the full slot table
    /// into memory.
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<Store> {
        let mut options = OpenOptions::new();
        options.read(true);
        if mode == OpenMode::ReadWrite {
            options.write(true);
        }
        let mut file = options.open(path)?;

        let header = codec::read_header(&mut file)?;
        let slots = codec::read_slot_table(&mut file, header.max_files)?;

        Ok(Store {
            file,
            header,
            slots,
            mode,
        })
    }

    /// Creates a fresh store: writes a new header plus `max_files`
    /// zero-filled slots.
    pub fn create<P: AsRef<Path>>(
        path: P,
        max_files: u32,
        thumb_res: (u16, u16),
        small_res: (u16, u16),
    ) -> Result<Store> {
        let header = Header::new(max_files, thumb_res, small_res)?;

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        codec::write_header(&mut file, &header)?;
        let slots = vec![Slot::EMPTY; max_files as usize];
        codec::write_slot_table(&mut file, &slots)?;

        tracing::info!(max_files, "created imgStore");

        Ok(Store {
            file,
            header,
            slots,
            mode: OpenMode::ReadWrite,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    fn require_writable(&self) -> Result<()> {
        if self.mode == OpenMode::ReadOnly {
            return Err(Error::InvalidArgument("store is read-only".into()));
        }
        Ok(())
    }

    pub fn flush_header(&mut self) -> Result<()> {
        self.require_writable()?;
        codec::write_header(&mut self.file, &self.header)
    }

    pub fn flush_slot(&mut self, i: usize) -> Result<()> {
        self.require_writable()?;
        codec::write_slot(&mut self.file, i, &self.slots[i])
    }

    /// Releases the slot table and closes the underlying file. Idempotent
    /// and infallible, matching the specification's `do_close` contract:
    /// dropping a `Store` twice is not possible in Rust, but calling
    /// `close` after the handle has already been consumed is a compile
    /// error rather than a runtime hazard.
    pub fn close(self) {
        drop(self);
    }
}
