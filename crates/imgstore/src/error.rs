// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Error kinds produced by the storage engine.
///
/// Each variant corresponds to one of the error kinds in the specification's
/// error handling design: propagation only, no silent recovery.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid filename: {0}")]
    InvalidFilename(String),

    #[error("invalid image id: {0}")]
    InvalidImgId(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("out of memory")]
    OutOfMemory,

    #[error("not enough arguments")]
    NotEnoughArguments,

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("image '{0}' not found")]
    FileNotFound(String),

    #[error("duplicate image id: {0}")]
    DuplicateId(String),

    #[error("store is full ({max_files} files)")]
    FullImgStore { max_files: u32 },

    #[error("invalid max_files value: {0}")]
    MaxFiles(u32),

    #[error("invalid resolution: {0}")]
    Resolutions(String),

    #[error("image codec error: {0}")]
    ImgLib(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Maps an error kind to the small positive process exit code the CLI
    /// surface reports, per the specification's external interfaces.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 1,
            Error::InvalidFilename(_) => 2,
            Error::InvalidImgId(_) => 3,
            Error::Io(_) => 4,
            Error::OutOfMemory => 5,
            Error::NotEnoughArguments => 6,
            Error::InvalidCommand(_) => 7,
            Error::FileNotFound(_) => 8,
            Error::DuplicateId(_) => 9,
            Error::FullImgStore { .. } => 10,
            Error::MaxFiles(_) => 11,
            Error::Resolutions(_) => 12,
            Error::ImgLib(_) => 13,
        }
    }
}
