// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File format codec: serializes and deserializes the header and slot table
//! bit-exactly. Every function positions the file pointer explicitly before
//! it reads or writes; none of them rely on the current offset.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::Result;
use crate::header::{Header, HEADER_SIZE};
use crate::slot::{Slot, SLOT_SIZE};

/// Byte offset of slot `i` within the file.
pub fn slot_offset(i: usize) -> u64 {
    (HEADER_SIZE + i * SLOT_SIZE) as u64
}

/// Byte offset of the start of the payload region, given `max_files`.
pub fn payload_region_start(max_files: u32) -> u64 {
    HEADER_SIZE as u64 + max_files as u64 * SLOT_SIZE as u64
}

pub fn read_header(file: &mut File) -> Result<Header> {
    file.seek(SeekFrom::Start(0))?;
    let mut buf = [0u8; HEADER_SIZE];
    file.read_exact(&mut buf)?;
    Ok(Header::from_bytes(&buf))
}

pub fn write_header(file: &mut File, header: &Header) -> Result<()> {
    file.seek(SeekFrom::Start(0))?;
    file.write_all(&header.to_bytes())?;
    file.flush()?;
    Ok(())
}

pub fn read_slot(file: &mut File, i: usize) -> Result<Slot> {
    file.seek(SeekFrom::Start(slot_offset(i)))?;
    let mut buf = [0u8; SLOT_SIZE];
    file.read_exact(&mut buf)?;
    Ok(Slot::from_bytes(&buf))
}

pub fn write_slot(file: &mut File, i: usize, slot: &Slot) -> Result<()> {
    file.seek(SeekFrom::Start(slot_offset(i)))?;
    file.write_all(&slot.to_bytes())?;
    file.flush()?;
    Ok(())
}

pub fn read_slot_table(file: &mut File, max_files: u32) -> Result<Vec<Slot>> {
    file.seek(SeekFrom::Start(slot_offset(0)))?;
    let mut slots = Vec::with_capacity(max_files as usize);
    let mut buf = [0u8; SLOT_SIZE];
    for _ in 0..max_files {
        file.read_exact(&mut buf)?;
        slots.push(Slot::from_bytes(&buf));
    }
    Ok(slots)
}

/// Writes the full slot table in one sequential pass, used only by
/// [`crate::store::Store::create`]. Subsequent mutations go through
/// [`write_slot`] for a single record at a time.
pub fn write_slot_table(file: &mut File, slots: &[Slot]) -> Result<()> {
    file.seek(SeekFrom::Start(slot_offset(0)))?;
    for slot in slots {
        file.write_all(&slot.to_bytes())?;
    }
    file.flush()?;
    Ok(())
}
