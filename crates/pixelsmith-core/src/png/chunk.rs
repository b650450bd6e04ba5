//! Chunk scanning.

use std::fmt;

use tracing::debug;

use super::crc::chunk_crc;
use crate::error::PngError;

/// Chunk types the codec understands. Anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkType {
    Header,
    Palette,
    Data,
    Gamma,
    End,
}

impl ChunkType {
    pub fn tag(self) -> &'static [u8; 4] {
        match self {
            ChunkType::Header => b"IHDR",
            ChunkType::Palette => b"PLTE",
            ChunkType::Data => b"IDAT",
            ChunkType::Gamma => b"gAMA",
            ChunkType::End => b"IEND",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChunkType::Header => "IHDR",
            ChunkType::Palette => "PLTE",
            ChunkType::Data => "IDAT",
            ChunkType::Gamma => "gAMA",
            ChunkType::End => "IEND",
        }
    }

    fn from_tag(tag: &[u8]) -> Result<Self, PngError> {
        match tag {
            b"IHDR" => Ok(ChunkType::Header),
            b"PLTE" => Ok(ChunkType::Palette),
            b"IDAT" => Ok(ChunkType::Data),
            b"gAMA" => Ok(ChunkType::Gamma),
            b"IEND" => Ok(ChunkType::End),
            other => Err(PngError::UnsupportedChunk(
                String::from_utf8_lossy(other).into_owned(),
            )),
        }
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Location of one chunk inside a PNG byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkInfo {
    /// Offset of the chunk's length field.
    pub offset: usize,
    /// Payload length in bytes.
    pub length: usize,
    pub chunk_type: ChunkType,
}

impl ChunkInfo {
    /// Payload slice of this chunk within `bytes`.
    pub fn payload<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        let start = self.offset + 8;
        &bytes[start..start + self.length]
    }
}

fn read_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let raw = bytes.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
}

/// Walk the chunks of `bytes` from `start` up to and including IEND.
///
/// Every chunk's CRC is verified. The first chunk must be IHDR.
pub fn scan_chunks(bytes: &[u8], start: usize) -> Result<Vec<ChunkInfo>, PngError> {
    let mut chunks = Vec::new();
    let mut offset = start;

    loop {
        let length = read_u32(bytes, offset).ok_or(PngError::Truncated { offset })? as usize;
        let tag = bytes
            .get(offset + 4..offset + 8)
            .ok_or(PngError::Truncated { offset })?;
        let payload_end = offset
            .checked_add(8 + length)
            .ok_or(PngError::Truncated { offset })?;
        let stored = read_u32(bytes, payload_end).ok_or(PngError::Truncated { offset })?;

        if chunks.is_empty() && tag != b"IHDR" {
            return Err(PngError::FirstChunkNotHeader(
                String::from_utf8_lossy(tag).into_owned(),
            ));
        }
        let chunk_type = ChunkType::from_tag(tag)?;

        let computed = chunk_crc(tag, &bytes[offset + 8..payload_end]);
        if stored != computed {
            return Err(PngError::CrcMismatch {
                chunk: chunk_type.name().to_string(),
                stored,
                computed,
            });
        }

        debug!(chunk = %chunk_type, offset, length, "read chunk");
        chunks.push(ChunkInfo {
            offset,
            length,
            chunk_type,
        });

        if chunk_type == ChunkType::End {
            return Ok(chunks);
        }
        offset = payload_end + 4;
    }
}

/// Append a chunk (length, type, payload, CRC) to `out`.
pub(crate) fn write_chunk(out: &mut Vec<u8>, chunk_type: ChunkType, payload: &[u8]) {
    let tag = chunk_type.tag();
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(payload);
    out.extend_from_slice(&chunk_crc(tag, payload).to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(tag: ChunkType, payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        write_chunk(&mut out, tag, payload);
        out
    }

    #[test]
    fn test_scan_stops_at_end() {
        let mut bytes = chunk(ChunkType::Header, &[0; 13]);
        bytes.extend(chunk(ChunkType::Data, b"xyz"));
        bytes.extend(chunk(ChunkType::End, &[]));
        bytes.extend_from_slice(b"trailing garbage");

        let chunks = scan_chunks(&bytes, 0).unwrap();
        let kinds: Vec<_> = chunks.iter().map(|c| c.chunk_type).collect();
        assert_eq!(kinds, vec![ChunkType::Header, ChunkType::Data, ChunkType::End]);
        assert_eq!(chunks[1].offset, 25);
        assert_eq!(chunks[1].payload(&bytes), b"xyz");
    }

    #[test]
    fn test_first_chunk_must_be_header() {
        let bytes = chunk(ChunkType::Data, b"xyz");
        assert_eq!(
            scan_chunks(&bytes, 0),
            Err(PngError::FirstChunkNotHeader("IDAT".to_string()))
        );
    }

    #[test]
    fn test_unknown_chunk_is_rejected() {
        let mut bytes = chunk(ChunkType::Header, &[0; 13]);
        let mut text = chunk(ChunkType::End, b"hello");
        text[4..8].copy_from_slice(b"tEXt");
        bytes.extend(text);
        assert_eq!(
            scan_chunks(&bytes, 0),
            Err(PngError::UnsupportedChunk("tEXt".to_string()))
        );
    }

    #[test]
    fn test_crc_mismatch_names_chunk() {
        let mut bytes = chunk(ChunkType::Header, &[0; 13]);
        bytes[10] ^= 0xFF;
        assert!(matches!(
            scan_chunks(&bytes, 0),
            Err(PngError::CrcMismatch { chunk, .. }) if chunk == "IHDR"
        ));
    }

    #[test]
    fn test_truncation_is_an_error() {
        let mut bytes = chunk(ChunkType::Header, &[0; 13]);
        bytes.extend(chunk(ChunkType::Data, &[1, 2, 3, 4]));
        let cut = bytes.len() - 3;
        assert_eq!(
            scan_chunks(&bytes[..cut], 0),
            Err(PngError::Truncated { offset: 25 })
        );
        // Running off the end without IEND
        assert_eq!(
            scan_chunks(&bytes, 0),
            Err(PngError::Truncated { offset: bytes.len() })
        );
    }
}
