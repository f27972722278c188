//! ICO container writer.
//!
//! An ICO file bundles several embedded images behind a small directory:
//!
//! ```text
//! ICONDIR        6 bytes   reserved=0, type=1 (icon), frame count
//! ICONDIRENTRY  16 bytes   one per frame
//!     u8   width        (256 is stored as 0)
//!     u8   height       (256 is stored as 0)
//!     u8   palette size (0 = no palette)
//!     u8   reserved
//!     u16  color planes (1)
//!     u16  bits per pixel (32)
//!     u32  payload size
//!     u32  payload offset from start of file
//! payloads              PNG streams, concatenated in directory order
//! ```
//!
//! All integers are little-endian. Only PNG payloads are written; the legacy
//! BMP/DIB payload form is never produced.

use super::backend::BackendError;
use std::io::Write;

pub const HEADER_LEN: usize = 6;
pub const DIR_ENTRY_LEN: usize = 16;

const RESOURCE_TYPE_ICON: u16 = 1;
const COLOR_PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 32;
const MAX_EDGE: u32 = 256;

/// One image to embed: its pixel dimensions and an encoded PNG stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcoFrame {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Encode frames into an in-memory ICO file.
pub fn encode_ico(frames: &[IcoFrame]) -> Result<Vec<u8>, BackendError> {
    let payload_len: usize = frames.iter().map(|f| f.png.len()).sum();
    let mut buffer = Vec::with_capacity(HEADER_LEN + DIR_ENTRY_LEN * frames.len() + payload_len);
    write_ico(&mut buffer, frames)?;
    Ok(buffer)
}

/// Write frames as an ICO file to `writer`.
///
/// Fails with [`BackendError::Encode`] when there are no frames or a frame
/// cannot be described by the directory (edge of 0 or above 256, payload
/// beyond 4 GiB), and with [`BackendError::Io`] when the writer fails.
pub fn write_ico<W: Write>(writer: &mut W, frames: &[IcoFrame]) -> Result<(), BackendError> {
    if frames.is_empty() {
        return Err(BackendError::Encode(
            "ICO container needs at least one frame".into(),
        ));
    }
    let count = u16::try_from(frames.len())
        .map_err(|_| BackendError::Encode(format!("too many ICO frames: {}", frames.len())))?;

    writer.write_all(&0u16.to_le_bytes())?;
    writer.write_all(&RESOURCE_TYPE_ICON.to_le_bytes())?;
    writer.write_all(&count.to_le_bytes())?;

    let mut offset = (HEADER_LEN + DIR_ENTRY_LEN * frames.len()) as u64;
    for frame in frames {
        let size = u32::try_from(frame.png.len())
            .map_err(|_| BackendError::Encode("ICO frame payload exceeds 4 GiB".into()))?;
        let start = u32::try_from(offset)
            .map_err(|_| BackendError::Encode("ICO file exceeds 4 GiB".into()))?;

        writer.write_all(&[
            dimension_byte(frame.width)?,
            dimension_byte(frame.height)?,
            0,
            0,
        ])?;
        writer.write_all(&COLOR_PLANES.to_le_bytes())?;
        writer.write_all(&BITS_PER_PIXEL.to_le_bytes())?;
        writer.write_all(&size.to_le_bytes())?;
        writer.write_all(&start.to_le_bytes())?;

        offset += u64::from(size);
    }

    for frame in frames {
        writer.write_all(&frame.png)?;
    }
    Ok(())
}

/// Directory width/height byte. The format has no room for 256, so it is stored as 0.
fn dimension_byte(value: u32) -> Result<u8, BackendError> {
    match value {
        MAX_EDGE => Ok(0),
        1..MAX_EDGE => Ok(value as u8),
        _ => Err(BackendError::Encode(format!(
            "ICO frame edge must be 1-256, got {value}"
        ))),
    }
}
