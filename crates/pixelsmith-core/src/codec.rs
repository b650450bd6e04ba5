//! File format detection and the bytes ⇄ [`PixelBuffer`] codec seam.

use std::fmt;

use crate::buffer::PixelBuffer;
use crate::error::{ImageError, Result};
use crate::png::{decode_png, encode_png, PNG_SIGNATURE};
use crate::pnm::{decode_pnm, encode_pnm};

/// Supported container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ImageFormat {
    Png,
    /// Binary PGM (P5) or PPM (P6)
    Pnm,
}

impl ImageFormat {
    /// Sniff the format from the first bytes of a file.
    pub fn detect(bytes: &[u8]) -> Result<Self> {
        if bytes.starts_with(&PNG_SIGNATURE) {
            Ok(ImageFormat::Png)
        } else if bytes.starts_with(b"P5") || bytes.starts_with(b"P6") {
            Ok(ImageFormat::Pnm)
        } else {
            Err(ImageError::UnknownFormat)
        }
    }

    /// Format for a file extension (without the dot), case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "pnm" | "pgm" | "ppm" => Some(ImageFormat::Pnm),
            _ => None,
        }
    }

    /// Codec for this format.
    pub fn codec(self) -> &'static dyn ImageCodec {
        match self {
            ImageFormat::Png => &PngCodec,
            ImageFormat::Pnm => &PnmCodec,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "png"),
            ImageFormat::Pnm => write!(f, "pnm"),
        }
    }
}

/// Turns file bytes into a [`PixelBuffer`] and back.
pub trait ImageCodec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer>;

    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl ImageCodec for PngCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        decode_png(bytes)
    }

    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>> {
        encode_png(buffer)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PnmCodec;

impl ImageCodec for PnmCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer> {
        decode_pnm(bytes)
    }

    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>> {
        Ok(encode_pnm(buffer))
    }
}

/// Detect the format of `bytes` and decode them.
pub fn decode_any(bytes: &[u8]) -> Result<(ImageFormat, PixelBuffer)> {
    let format = ImageFormat::detect(bytes)?;
    let buffer = format.codec().decode(bytes)?;
    Ok((format, buffer))
}
