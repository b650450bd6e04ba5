//! PNG codec for 8-bit gray, truecolor and indexed images.
//!
//! The decoder accepts exactly the chunks IHDR, PLTE, IDAT, gAMA and IEND,
//! verifies every chunk's CRC and reconstructs all five scanline filters.
//! Indexed images are expanded to RGB. Interlaced images and bit depths
//! other than 8 are rejected.
//!
//! The encoder writes IHDR, gAMA, IDAT and IEND with unfiltered scanlines.
//!
//! # Example
//!
//! ```
//! use pixelsmith_core::{decode_png, encode_png, PixelBuffer, PixelFormat};
//!
//! let buf = PixelBuffer::new(vec![0.0, 64.0, 128.0, 255.0], PixelFormat::Gray, 2, 2)
//!     .unwrap()
//!     .with_gamma(Some(2.2));
//! let bytes = encode_png(&buf).unwrap();
//! let back = decode_png(&bytes).unwrap();
//!
//! assert_eq!(back.samples(), buf.samples());
//! assert_eq!(back.gamma(), Some(2.2));
//! ```

mod chunk;
mod crc;
mod filter;

use miniz_oxide::deflate::compress_to_vec_zlib;
use miniz_oxide::inflate::decompress_to_vec_zlib_with_limit;
use tracing::debug;

use crate::buffer::{PixelBuffer, PixelFormat};
use crate::error::{ImageError, PngError, Result};

pub use chunk::{scan_chunks, ChunkInfo, ChunkType};

/// The eight bytes every PNG file starts with.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// gAMA stores the gamma multiplied by this factor.
const GAMMA_SCALE: f32 = 100_000.0;

/// zlib compression level used for IDAT.
const COMPRESSION_LEVEL: u8 = 6;

const IHDR_LENGTH: usize = 13;

/// PNG color type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorType {
    Gray = 0,
    Truecolor = 2,
    Indexed = 3,
}

impl ColorType {
    fn from_byte(byte: u8) -> std::result::Result<Self, PngError> {
        match byte {
            0 => Ok(ColorType::Gray),
            2 => Ok(ColorType::Truecolor),
            3 => Ok(ColorType::Indexed),
            other => Err(PngError::UnsupportedColorType(other)),
        }
    }

    /// Bytes per pixel in the (unexpanded) scanline data.
    fn bytes_per_pixel(self) -> usize {
        match self {
            ColorType::Gray | ColorType::Indexed => 1,
            ColorType::Truecolor => 3,
        }
    }
}

/// Parsed IHDR fields the decoder needs.
#[derive(Debug, Clone, Copy)]
struct Header {
    width: usize,
    height: usize,
    color_type: ColorType,
}

impl Header {
    fn parse(payload: &[u8]) -> std::result::Result<Self, PngError> {
        if payload.len() != IHDR_LENGTH {
            return Err(PngError::MalformedHeader);
        }
        let width = u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]);
        let height = u32::from_be_bytes([payload[4], payload[5], payload[6], payload[7]]);
        let (bit_depth, color_type) = (payload[8], payload[9]);
        let (compression, filter_method, interlace) = (payload[10], payload[11], payload[12]);

        if width == 0 || height == 0 || compression != 0 || filter_method != 0 {
            return Err(PngError::MalformedHeader);
        }
        if bit_depth != 8 {
            return Err(PngError::UnsupportedBitDepth(bit_depth));
        }
        let color_type = ColorType::from_byte(color_type)?;
        if interlace != 0 {
            return Err(PngError::Interlaced);
        }

        Ok(Self {
            width: width as usize,
            height: height as usize,
            color_type,
        })
    }

    /// Unfiltered row length and total filtered data length, or
    /// `MalformedHeader` when they overflow `usize`.
    fn scanline_sizes(&self) -> std::result::Result<(usize, usize), PngError> {
        let stride = self
            .width
            .checked_mul(self.color_type.bytes_per_pixel())
            .ok_or(PngError::MalformedHeader)?;
        let expected = stride
            .checked_add(1)
            .and_then(|row| row.checked_mul(self.height))
            .ok_or(PngError::MalformedHeader)?;
        Ok((stride, expected))
    }
}

fn parse_gamma(payload: &[u8]) -> std::result::Result<f32, PngError> {
    let raw: [u8; 4] = payload.try_into().map_err(|_| PngError::MalformedGamma)?;
    let scaled = u32::from_be_bytes(raw);
    if scaled == 0 {
        return Err(PngError::MalformedGamma);
    }
    Ok(scaled as f32 / GAMMA_SCALE)
}

fn parse_palette(payload: &[u8]) -> std::result::Result<Vec<[u8; 3]>, PngError> {
    if payload.is_empty() || payload.len() % 3 != 0 || payload.len() > 256 * 3 {
        return Err(PngError::MalformedPalette(payload.len()));
    }
    Ok(payload
        .chunks_exact(3)
        .map(|rgb| [rgb[0], rgb[1], rgb[2]])
        .collect())
}

fn count(chunks: &[ChunkInfo], chunk_type: ChunkType) -> usize {
    chunks.iter().filter(|c| c.chunk_type == chunk_type).count()
}

/// Decode a PNG byte stream into a [`PixelBuffer`].
///
/// Gray images decode to [`PixelFormat::Gray`]; truecolor and indexed
/// images decode to [`PixelFormat::Rgb`]. The buffer's gamma is taken from
/// gAMA when present and left unset otherwise.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer> {
    if !bytes.starts_with(&PNG_SIGNATURE) {
        return Err(PngError::BadSignature.into());
    }

    let chunks = scan_chunks(bytes, PNG_SIGNATURE.len())?;

    let headers = count(&chunks, ChunkType::Header);
    if headers != 1 {
        return Err(PngError::ChunkCount {
            chunk: "IHDR",
            count: headers,
        }
        .into());
    }
    let gammas = count(&chunks, ChunkType::Gamma);
    if gammas > 1 {
        return Err(PngError::ChunkCount {
            chunk: "gAMA",
            count: gammas,
        }
        .into());
    }
    let data_chunks = count(&chunks, ChunkType::Data);
    if data_chunks == 0 {
        return Err(PngError::ChunkCount {
            chunk: "IDAT",
            count: 0,
        }
        .into());
    }

    let header = Header::parse(chunks[0].payload(bytes))?;
    let palettes = count(&chunks, ChunkType::Palette);
    match (header.color_type, palettes) {
        (ColorType::Indexed, 0) => return Err(PngError::MissingPalette.into()),
        (ColorType::Indexed, 1) | (_, 0) => {}
        (_, count) => {
            return Err(PngError::ChunkCount {
                chunk: "PLTE",
                count,
            }
            .into())
        }
    }

    let mut gamma = None;
    let mut palette = Vec::new();
    let mut compressed = Vec::new();
    for info in &chunks {
        let payload = info.payload(bytes);
        match info.chunk_type {
            ChunkType::Gamma => gamma = Some(parse_gamma(payload)?),
            ChunkType::Palette => palette = parse_palette(payload)?,
            ChunkType::Data => compressed.extend_from_slice(payload),
            ChunkType::Header | ChunkType::End => {}
        }
    }

    let bpp = header.color_type.bytes_per_pixel();
    let (stride, expected) = header.scanline_sizes()?;

    let raw = decompress_to_vec_zlib_with_limit(&compressed, expected)
        .map_err(|e| PngError::Inflate(format!("{:?}", e.status)))?;
    if raw.len() != expected {
        return Err(PngError::DataLength {
            expected,
            actual: raw.len(),
        }
        .into());
    }

    let pixels = filter::unfilter(&raw, header.height, stride, bpp)?;

    debug!(
        width = header.width,
        height = header.height,
        color_type = ?header.color_type,
        ?gamma,
        "decoded PNG"
    );

    let (samples, format) = match header.color_type {
        ColorType::Gray => (pixels, PixelFormat::Gray),
        ColorType::Truecolor => (pixels, PixelFormat::Rgb),
        ColorType::Indexed => (expand_palette(&pixels, &palette)?, PixelFormat::Rgb),
    };

    Ok(PixelBuffer::from_bytes(&samples, format, header.width, header.height)?.with_gamma(gamma))
}

fn expand_palette(indices: &[u8], palette: &[[u8; 3]]) -> std::result::Result<Vec<u8>, PngError> {
    let mut out = Vec::with_capacity(indices.len() * 3);
    for &index in indices {
        let rgb = palette.get(index as usize).ok_or(PngError::PaletteIndex {
            index,
            entries: palette.len(),
        })?;
        out.extend_from_slice(rgb);
    }
    Ok(out)
}

/// Encode `buffer` as an 8-bit gray or truecolor PNG.
///
/// Samples are clamped and rounded to bytes. The gAMA chunk carries the
/// buffer's gamma, or 1.0 when it has none.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let too_large = || ImageError::InvalidDimensions {
        width: buffer.width(),
        height: buffer.height(),
    };
    let width = u32::try_from(buffer.width()).map_err(|_| too_large())?;
    let height = u32::try_from(buffer.height()).map_err(|_| too_large())?;
    let color_type = match buffer.format() {
        PixelFormat::Gray => ColorType::Gray,
        PixelFormat::Rgb => ColorType::Truecolor,
    };

    let mut header = Vec::with_capacity(IHDR_LENGTH);
    header.extend_from_slice(&width.to_be_bytes());
    header.extend_from_slice(&height.to_be_bytes());
    header.extend_from_slice(&[8, color_type as u8, 0, 0, 0]);

    let gamma = buffer.gamma().unwrap_or(1.0);
    let scaled_gamma = (gamma * GAMMA_SCALE) as u32;

    let bytes = buffer.to_bytes();
    let stride = buffer.width() * buffer.channels();
    let mut raw = Vec::with_capacity(buffer.height() * (stride + 1));
    for row in bytes.chunks_exact(stride) {
        raw.push(0);
        raw.extend_from_slice(row);
    }
    let compressed = compress_to_vec_zlib(&raw, COMPRESSION_LEVEL);

    debug!(
        width,
        height,
        format = %buffer.format(),
        gamma,
        compressed = compressed.len(),
        "encoded PNG"
    );

    let mut out = Vec::with_capacity(compressed.len() + 64);
    out.extend_from_slice(&PNG_SIGNATURE);
    chunk::write_chunk(&mut out, ChunkType::Header, &header);
    chunk::write_chunk(&mut out, ChunkType::Gamma, &scaled_gamma.to_be_bytes());
    chunk::write_chunk(&mut out, ChunkType::Data, &compressed);
    chunk::write_chunk(&mut out, ChunkType::End, &[]);
    Ok(out)
}
