//! File formats: reading stacks from files and writing them back.
//!
//! ## Supported Formats
//!
//! - Deck list (`.arena`, `.txt`, `.deck`): `Deck` header and `<count> <name>`
//!   lines. Produces card keys.
//! - CSV collection (`.csv`): `Count, Card Name, Set Name, Collector Number,
//!   Foil, Price`. Produces print keys.
//!
//! The format is chosen from the file extension. Each writer normalizes keys
//! from the other domain: prints written to a deck list keep only their name,
//! cards written to CSV get default metadata.

pub mod csv;
pub mod deck_list;

pub use self::csv::{CsvReader, CsvWriter};
pub use deck_list::{DeckListReader, DeckListWriter};

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::config::IoConfig;
use crate::error::{Result, StackError};
use crate::stack::Stack;

/// Produces a stack from a source.
pub trait StackReader {
    /// Read a whole stack. Fails on the first invalid record.
    fn read(&self, input: &mut dyn Read) -> Result<Stack>;
}

/// Consumes a stack into a destination.
pub trait StackWriter {
    /// Write a whole stack.
    fn write(&self, stack: &Stack, output: &mut dyn Write) -> Result<()>;
}

/// A supported file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    DeckList,
    Csv,
}

impl Format {
    /// Pick a format from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "arena" | "txt" | "deck" => Ok(Format::DeckList),
            "csv" => Ok(Format::Csv),
            _ => Err(StackError::format(format!("Unsupported file format: .{}", ext))),
        }
    }

    /// Pick a format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            StackError::format(format!("Cannot determine format of '{}'", path.display()))
        })?;
        Self::from_extension(ext)
    }

    /// Reader for this format.
    #[must_use]
    pub fn reader(self, config: &IoConfig) -> Box<dyn StackReader> {
        match self {
            Format::DeckList => Box::new(DeckListReader::new(config)),
            Format::Csv => Box::new(CsvReader::new(config)),
        }
    }

    /// Writer for this format.
    #[must_use]
    pub fn writer(self, config: &IoConfig) -> Box<dyn StackWriter> {
        match self {
            Format::DeckList => Box::new(DeckListWriter::new(config)),
            Format::Csv => Box::new(CsvWriter::new()),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::DeckList => f.write_str("deck list"),
            Format::Csv => f.write_str("csv"),
        }
    }
}

/// Load a stack from a file, choosing the reader by extension.
pub fn load_stack(path: impl AsRef<Path>, config: &IoConfig) -> Result<Stack> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    log::info!("Loading {} from {}", format, path.display());

    let file = File::open(path).map_err(|e| StackError::Read(path.to_path_buf(), e))?;
    let stack = format
        .reader(config)
        .read(&mut BufReader::new(file))
        .map_err(|e| match e {
            StackError::Io(source) => StackError::Read(path.to_path_buf(), source),
            other => other,
        })?;

    log::debug!(
        "Read {} entries ({} cards) from {}",
        stack.len(),
        stack.total(),
        path.display()
    );
    Ok(stack)
}

/// Write a stack to a file, choosing the writer by extension.
///
/// Missing parent directories are created.
pub fn write_stack(stack: &Stack, path: impl AsRef<Path>, config: &IoConfig) -> Result<()> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    log::info!("Writing {} to {}", format, path.display());

    let write_error = |e: std::io::Error| StackError::Write(path.to_path_buf(), e);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(write_error)?;
            log::debug!("Created directory: {}", parent.display());
        }
    }

    let mut output = BufWriter::new(File::create(path).map_err(write_error)?);
    format
        .writer(config)
        .write(stack, &mut output)
        .map_err(|e| match e {
            StackError::Io(source) => write_error(source),
            other => other,
        })?;
    output.flush().map_err(write_error)?;
    Ok(())
}
