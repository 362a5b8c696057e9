//! JSON file storage for the stock mapping.
//!
//! The file is a single JSON object mapping item names to numbers, written
//! with 4-space indentation in mapping order. Reads and writes are a single
//! blocking open/read-or-write/close; there is no atomic rename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use stockledger_core::Quantity;

/// Item name → quantity, iterated in insertion order.
pub type StockMap = IndexMap<String, Quantity>;

const INDENT: &[u8] = b"    ";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage file {path} not found")]
    Missing { path: PathBuf },

    #[error("storage file {path} is not a valid stock document: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("i/o error on storage file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode stock document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Which branch a `load_data` call took.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read; carries the number of items now in the ledger.
    Loaded(usize),
    /// No file at the storage location; the ledger starts empty.
    Missing,
    /// The file could not be read or decoded; the ledger starts empty.
    Malformed,
}

/// Read and decode the stock document at `path`.
pub fn read_stock(path: &Path) -> Result<StockMap, StorageError> {
    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            StorageError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            StorageError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    decode_stock(&contents).map_err(|e| StorageError::Malformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Decode a stock document: an object whose values are all numbers.
pub fn decode_stock(contents: &str) -> Result<StockMap, serde_json::Error> {
    serde_json::from_str(contents)
}

/// Encode the stock mapping as an indented JSON document.
pub fn encode_stock(stock: &StockMap) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    stock.serialize(&mut ser)?;
    Ok(buf)
}

/// Overwrite `path` with the encoded stock mapping.
pub fn write_stock(path: &Path, stock: &StockMap) -> Result<(), StorageError> {
    let bytes = encode_stock(stock)?;
    fs::write(path, bytes).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}
