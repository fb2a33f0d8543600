//! The two files a compressed text is stored as.
//!
//! The framed payload goes to the path the user chose. The frequency table goes next to
//! it as `{file stem}.freq.json`, unless another path is given:
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "symbols": [
//!     { "symbol": "a", "count": 2 },
//!     { "symbol": "b", "count": 3 }
//!   ]
//! }
//! ```
//!
//! Neither file can be decompressed without the other.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize, de};
use thiserror::Error;

use crate::compressor::Compressed;
use crate::huffman::FrequencyTable;
use crate::storage::ByteStore;

if_tracing! {
    use tracing::{debug, info, warn};
}

pub const TABLE_SUFFIX: &str = "freq.json";

/// Layout version written into every table file. Tables of any other version are refused.
pub const TABLE_VERSION: &str = "0.1.0";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("frequency table {} is invalid: {source}", .path.display())]
    Table { path: PathBuf, source: serde_json::Error },

    #[error("cannot derive a frequency table path from {}", .0.display())]
    InvalidPath(PathBuf),
}

#[derive(Serialize)]
struct TableFileRef<'a> {
    version: &'a str,
    symbols: &'a FrequencyTable,
}

#[derive(Deserialize)]
struct TableFile {
    version: String,
    symbols: FrequencyTable,
}

/// Where the frequency table of `payload_path` lives by default.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidPath`] if `payload_path` has no file name.
pub fn table_path(payload_path: &Path) -> Result<PathBuf, ArchiveError> {
    let stem = payload_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ArchiveError::InvalidPath(payload_path.to_path_buf()))?;

    let mut path = payload_path.to_path_buf();
    path.set_file_name(format!("{}.{}", stem, TABLE_SUFFIX));
    Ok(path)
}

pub fn encode_table(table: &FrequencyTable) -> serde_json::Result<Vec<u8>> {
    let file = TableFileRef {
        version: TABLE_VERSION,
        symbols: table,
    };
    serde_json::to_vec_pretty(&file)
}

pub fn decode_table(bytes: &[u8]) -> serde_json::Result<FrequencyTable> {
    let file: TableFile = serde_json::from_slice(bytes)?;
    if file.version != TABLE_VERSION {
        return Err(de::Error::custom(format_args!(
            "unsupported table version {:?}, expected {:?}",
            file.version, TABLE_VERSION
        )));
    }
    Ok(file.symbols)
}

/// Byte sizes and locations of a written archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveSizes {
    pub payload: u64,
    pub table: u64,
    pub table_path: PathBuf,
}

impl ArchiveSizes {
    pub fn total(&self) -> u64 {
        self.payload + self.table
    }
}

/// Reads and writes the payload/table pair through a [`ByteStore`].
#[derive(Debug, Default)]
pub struct Archive<S> {
    store: S,
}

impl<S: ByteStore> Archive<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Writes the payload to `payload_path` and the table to `table_override`, or to the
    /// sibling path when that is `None`.
    ///
    /// If the table cannot be written the payload is removed again.
    pub fn write(
        &mut self,
        payload_path: &Path,
        table_override: Option<&Path>,
        compressed: &Compressed,
    ) -> Result<ArchiveSizes, ArchiveError> {
        let table_path = resolve_table_path(payload_path, table_override)?;
        let table_bytes = encode_table(&compressed.table).map_err(|source| ArchiveError::Table {
            path: table_path.clone(),
            source,
        })?;

        self.store
            .write_bytes(payload_path, &compressed.payload)
            .map_err(|source| ArchiveError::Io {
                path: payload_path.to_path_buf(),
                source,
            })?;
        if let Err(source) = self.store.write_bytes(&table_path, &table_bytes) {
            // a payload without its table cannot be decompressed
            if let Err(_e) = self.store.remove(payload_path) {
                if_tracing! {
                    warn!(target = "archive", payload = %payload_path.display(), error = %_e, "could not remove orphaned payload");
                }
            }
            return Err(ArchiveError::Io { path: table_path, source });
        }

        if_tracing! {
            info!(target = "archive", payload = %payload_path.display(), table = %table_path.display(), payload_len = compressed.payload.len(), table_len = table_bytes.len(), "archive written");
        }
        Ok(ArchiveSizes {
            payload: compressed.payload.len() as u64,
            table: table_bytes.len() as u64,
            table_path,
        })
    }

    /// Reads back a pair written by [`write`](Archive::write).
    pub fn read(&self, payload_path: &Path, table_override: Option<&Path>) -> Result<Compressed, ArchiveError> {
        let table_path = resolve_table_path(payload_path, table_override)?;
        if_tracing! {
            debug!(target = "archive", payload = %payload_path.display(), table = %table_path.display(), "reading archive");
        }

        let payload = self.store.read_bytes(payload_path).map_err(|source| ArchiveError::Io {
            path: payload_path.to_path_buf(),
            source,
        })?;
        let table_bytes = self.store.read_bytes(&table_path).map_err(|source| ArchiveError::Io {
            path: table_path.clone(),
            source,
        })?;
        let table = decode_table(&table_bytes).map_err(|source| ArchiveError::Table {
            path: table_path.clone(),
            source,
        })?;

        Ok(Compressed { payload, table })
    }
}

fn resolve_table_path(payload_path: &Path, table_override: Option<&Path>) -> Result<PathBuf, ArchiveError> {
    match table_override {
        Some(path) => Ok(path.to_path_buf()),
        None => table_path(payload_path),
    }
}
