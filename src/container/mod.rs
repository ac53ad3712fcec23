//! GLB (Binary glTF) container reader.
//!
//! Layout:
//! - 12-byte file header (magic, version 2, total length)
//! - JSON chunk (type 0x4E4F534A), mandatory and first
//! - BIN chunk (type 0x004E4942), optional
//!
//! The container is only ever read. Output is always the externally
//! referenced `.gltf` + `.bin` form.

use std::io::Cursor;

use binrw::{binrw, BinReaderExt};

use crate::document::Document;
use crate::error::{ConvertError, Result};

pub const GLB_MAGIC: u32 = 0x46546C67; // "glTF"
pub const GLB_VERSION: u32 = 2;
pub const GLB_HEADER_SIZE: usize = 12;
pub const CHUNK_HEADER_SIZE: usize = 8;
pub const CHUNK_TYPE_JSON: u32 = 0x4E4F534A;
pub const CHUNK_TYPE_BIN: u32 = 0x004E4942;

#[binrw]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct GlbHeader {
    pub magic: u32,
    pub version: u32,
    pub length: u32,
}

#[binrw]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[brw(little)]
pub struct ChunkHeader {
    pub length: u32,
    pub chunk_type: u32,
}

/// A parsed container: the JSON document and the raw BIN chunk, if any.
#[derive(Debug, Clone)]
pub struct Container {
    pub document: Document,
    pub binary: Option<Vec<u8>>,
}

/// Whether `bytes` start with the GLB magic.
pub fn is_container(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && bytes[..4] == GLB_MAGIC.to_le_bytes()
}

/// Parse a GLB byte buffer.
pub fn read_container(bytes: &[u8]) -> Result<Container> {
    if bytes.len() < GLB_HEADER_SIZE {
        return Err(ConvertError::malformed(format!(
            "{} bytes is too short for a GLB header",
            bytes.len()
        )));
    }

    let mut reader = Cursor::new(bytes);
    let header: GlbHeader = reader
        .read_le()
        .map_err(|e| ConvertError::malformed(format!("unreadable header: {e}")))?;

    if header.magic != GLB_MAGIC {
        return Err(ConvertError::malformed(format!(
            "bad magic 0x{:08X}",
            header.magic
        )));
    }
    if header.version != GLB_VERSION {
        return Err(ConvertError::malformed(format!(
            "unsupported version {}",
            header.version
        )));
    }
    if header.length as usize != bytes.len() {
        return Err(ConvertError::malformed(format!(
            "declared length {} does not match actual length {}",
            header.length,
            bytes.len()
        )));
    }

    let (json_header, json_range) =
        next_chunk(&mut reader, bytes)?.ok_or(ConvertError::MissingJsonChunk)?;
    if json_header.chunk_type != CHUNK_TYPE_JSON {
        return Err(ConvertError::MissingJsonChunk);
    }
    let document = Document::from_slice(&bytes[json_range])?;

    let mut binary = None;
    while let Some((chunk, range)) = next_chunk(&mut reader, bytes)? {
        match chunk.chunk_type {
            CHUNK_TYPE_BIN => {
                binary = Some(bytes[range].to_vec());
                break;
            }
            other => {
                tracing::debug!("ignoring chunk of type 0x{other:08X}");
            }
        }
    }

    Ok(Container { document, binary })
}

/// Read the next chunk header and return it with its payload range.
///
/// `Ok(None)` means fewer than a chunk header's worth of bytes remain.
fn next_chunk(
    reader: &mut Cursor<&[u8]>,
    bytes: &[u8],
) -> Result<Option<(ChunkHeader, std::ops::Range<usize>)>> {
    let start = reader.position() as usize;
    if bytes.len().saturating_sub(start) < CHUNK_HEADER_SIZE {
        if start < bytes.len() {
            tracing::debug!(trailing = bytes.len() - start, "ignoring trailing bytes");
        }
        return Ok(None);
    }

    let chunk: ChunkHeader = reader
        .read_le()
        .map_err(|e| ConvertError::malformed(format!("unreadable chunk header at {start}: {e}")))?;

    let data_start = start + CHUNK_HEADER_SIZE;
    let data_end = data_start
        .checked_add(chunk.length as usize)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| {
            ConvertError::malformed(format!(
                "chunk at {start} declares {} bytes but only {} remain",
                chunk.length,
                bytes.len() - data_start
            ))
        })?;

    reader.set_position(data_end as u64);
    Ok(Some((chunk, data_start..data_end)))
}

// ============================================================================
// Tests
// ============================================================================
