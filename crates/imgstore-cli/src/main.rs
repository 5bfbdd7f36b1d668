// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line front end. Thin wrapper over [`imgstore`]: parses
//! arguments, opens/creates the store, calls the pipeline function, and
//! renders the result. No core logic lives here.

mod config;

use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use imgstore::{OpenMode, Resolution, Store};

use config::CreateConfig;

/// imgStore — a single-file, content-addressed JPEG image store.
#[derive(Parser)]
#[command(name = "imgstore", version, about, author)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open a store read-only and print its header and valid slots
    List { file: PathBuf },

    /// Create a fresh store
    Create {
        file: PathBuf,
        /// TOML file with `CreateConfig` defaults; flags below override it
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        max_files: Option<u32>,
        #[arg(long, num_args = 2)]
        thumb_res: Option<Vec<u16>>,
        #[arg(long, num_args = 2)]
        small_res: Option<Vec<u16>>,
    },

    /// Read an image out of the store and write it beside the current directory
    Read {
        file: PathBuf,
        id: String,
        #[arg(default_value = "original")]
        res: String,
    },

    /// Insert a JPEG file under an identifier
    Insert {
        file: PathBuf,
        id: String,
        jpeg_path: PathBuf,
    },

    /// Delete an image by identifier
    Delete { file: PathBuf, id: String },

    /// Compact the store, reclaiming space left by deletions
    Gc { file: PathBuf, tmp_file: PathBuf },
}

impl Command {
    /// The store filename every subcommand takes as its first argument,
    /// mirroring `check_args_insert_and_read`'s `img_store_filename` check
    /// in the original dispatcher — every command validates it the same way
    /// before doing anything else.
    fn file(&self) -> &Path {
        match self {
            Command::List { file }
            | Command::Create { file, .. }
            | Command::Read { file, .. }
            | Command::Insert { file, .. }
            | Command::Delete { file, .. }
            | Command::Gc { file, .. } => file,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => exit_on_clap_error(err),
    };

    if let Err(err) = run(cli.cmd) {
        exit_on_error(err);
    }
}

/// Clap already validates flag syntax and argument arity for us; this maps
/// its failure modes onto the error kinds the original dispatcher returns
/// for the same situations (`ERR_NOT_ENOUGH_ARGUMENTS`, `ERR_INVALID_COMMAND`)
/// instead of letting clap's own usage-error exit code short-circuit them.
fn exit_on_clap_error(err: clap::Error) -> ! {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            print!("{err}");
            std::process::exit(0);
        }
        ErrorKind::MissingRequiredArgument | ErrorKind::MissingSubcommand => {
            exit_on_error(imgstore::Error::NotEnoughArguments)
        }
        ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument => {
            exit_on_error(imgstore::Error::InvalidCommand(err.to_string()))
        }
        _ => exit_on_error(imgstore::Error::InvalidCommand(err.to_string())),
    }
}

fn exit_on_error(err: imgstore::Error) -> ! {
    tracing::error!(%err, "command failed");
    eprintln!("error: {err}");
    std::process::exit(err.exit_code());
}

/// Validates the store filename every subcommand takes, per the original
/// dispatcher's `strlen(img_store_filename) == 0 || strlen(...) >
/// MAX_IMGST_NAME` check.
fn validate_filename(file: &Path) -> imgstore::Result<()> {
    let name = file.to_string_lossy();
    if name.is_empty() || name.len() > imgstore::MAX_IMGST_NAME {
        return Err(imgstore::Error::InvalidFilename(name.into_owned()));
    }
    Ok(())
}

fn run(cmd: Command) -> imgstore::Result<()> {
    validate_filename(cmd.file())?;

    match cmd {
        Command::List { file } => cmd_list(&file),
        Command::Create {
            file,
            config,
            max_files,
            thumb_res,
            small_res,
        } => cmd_create(&file, config.as_deref(), max_files, thumb_res, small_res),
        Command::Read { file, id, res } => cmd_read(&file, &id, &res),
        Command::Insert { file, id, jpeg_path } => cmd_insert(&file, &id, &jpeg_path),
        Command::Delete { file, id } => cmd_delete(&file, &id),
        Command::Gc { file, tmp_file } => cmd_gc(&file, &tmp_file),
    }
}

fn cmd_list(file: &Path) -> imgstore::Result<()> {
    let store = Store::open(file, OpenMode::ReadOnly)?;
    print!("{}", imgstore::list_stdout(&store));
    Ok(())
}

fn cmd_create(
    file: &Path,
    config_path: Option<&Path>,
    max_files: Option<u32>,
    thumb_res: Option<Vec<u16>>,
    small_res: Option<Vec<u16>>,
) -> imgstore::Result<()> {
    let mut config = match config_path {
        Some(path) => CreateConfig::load(path)
            .map_err(|e| imgstore::Error::InvalidArgument(e.to_string()))?,
        None => CreateConfig::default(),
    };
    if let Some(n) = max_files {
        config.max_files = n;
    }
    if let Some(r) = thumb_res {
        config.thumb_res = (r[0], r[1]);
    }
    if let Some(r) = small_res {
        config.small_res = (r[0], r[1]);
    }

    Store::create(file, config.max_files, config.thumb_res, config.small_res)?;
    println!("created {}", file.display());
    Ok(())
}

fn cmd_read(file: &Path, id: &str, res: &str) -> imgstore::Result<()> {
    let r = Resolution::from_tag(res)?;
    let mut store = Store::open(file, OpenMode::ReadWrite)?;
    let bytes = store.read(id, r)?;

    let tag = match r {
        Resolution::Thumb => "thumb",
        Resolution::Small => "small",
        Resolution::Orig => "orig",
    };
    let out_path = format!("{id}_{tag}.jpg");
    std::fs::write(&out_path, &bytes)?;
    println!("wrote {out_path} ({} bytes)", bytes.len());
    Ok(())
}

fn cmd_insert(file: &Path, id: &str, jpeg_path: &Path) -> imgstore::Result<()> {
    let buf = std::fs::read(jpeg_path)?;
    let mut store = Store::open(file, OpenMode::ReadWrite)?;
    store.insert(&buf, id)?;
    println!("inserted {id}");
    Ok(())
}

fn cmd_delete(file: &Path, id: &str) -> imgstore::Result<()> {
    let mut store = Store::open(file, OpenMode::ReadWrite)?;
    store.delete(id)?;
    println!("deleted {id}");
    Ok(())
}

fn cmd_gc(file: &Path, tmp_file: &Path) -> imgstore::Result<()> {
    let rewrote = imgstore::gc(file, tmp_file)?;
    if rewrote {
        println!("compacted {}", file.display());
    } else {
        println!("{} has no holes, nothing to do", file.display());
    }
    Ok(())
}
