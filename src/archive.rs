//! Archive assembly.
//!
//! The generated files travel as an [`AssetMap`] (filename → bytes) and are
//! packed into a single ZIP. The namespace is flat: member names are plain
//! filenames, never paths.
//!
//! ## Determinism
//!
//! Members are written in filename order (the map is a `BTreeMap`) and every
//! member carries the same fixed modification time (1980-01-01 00:00, the
//! earliest time ZIP can express). Identical assets therefore always produce
//! identical archive bytes. Consumers still must not rely on member order.
//!
//! ## Injection
//!
//! The pipeline talks to an [`ArchiveWriter`] rather than to `zip` directly,
//! so tests can swap in a writer that records or fails.

use std::collections::BTreeMap;
use std::io::{Cursor, Seek, Write};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Filename → payload. The hand-off between generation and assembly.
pub type AssetMap = BTreeMap<String, Vec<u8>>;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Invalid archive member name: {0:?}")]
    InvalidName(String),
}

/// Packs an asset map into archive bytes.
pub trait ArchiveWriter: Sync {
    fn assemble(&self, assets: &AssetMap) -> Result<Vec<u8>, ArchiveError>;
}

/// Production [`ArchiveWriter`] producing a ZIP in memory.
#[derive(Debug, Clone, Copy)]
pub struct ZipArchiver {
    method: CompressionMethod,
}

impl ZipArchiver {
    /// Deflate every member.
    pub fn new() -> Self {
        Self {
            method: CompressionMethod::Deflated,
        }
    }

    /// Store members uncompressed. PNG payloads barely shrink under Deflate,
    /// so this trades a slightly larger archive for less CPU.
    pub fn stored() -> Self {
        Self {
            method: CompressionMethod::Stored,
        }
    }
}

impl Default for ZipArchiver {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveWriter for ZipArchiver {
    fn assemble(&self, assets: &AssetMap) -> Result<Vec<u8>, ArchiveError> {
        let cursor = write_zip(Cursor::new(Vec::new()), assets, self.method)?;
        Ok(cursor.into_inner())
    }
}

/// Write every asset as one ZIP member into `writer` and finalize the archive.
///
/// Returns the writer so in-memory callers can take the buffer back.
pub fn write_zip<W: Write + Seek>(
    writer: W,
    assets: &AssetMap,
    method: CompressionMethod,
) -> Result<W, ArchiveError> {
    let options = SimpleFileOptions::default()
        .compression_method(method)
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(writer);
    for (name, data) in assets {
        validate_member_name(name)?;
        zip.start_file(name.as_str(), options)?;
        zip.write_all(data)?;
    }
    Ok(zip.finish()?)
}

/// Suggested download name: `favicons-<unix-timestamp>.zip`.
pub fn archive_filename(unix_timestamp: u64) -> String {
    format!("favicons-{unix_timestamp}.zip")
}

fn validate_member_name(name: &str) -> Result<(), ArchiveError> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ArchiveError::InvalidName(name.to_string()));
    }
    Ok(())
}
