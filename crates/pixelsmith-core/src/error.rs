//! Unified error type for the pixelsmith-core public API.
//!
//! [`ImageError`] wraps the codec-specific errors ([`PngError`],
//! [`PnmError`]) together with argument and capability errors into a single
//! enum for convenient `?` propagation in application code.

use thiserror::Error;

use crate::color::ColorSpace;

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Unified error type for the pixelsmith-core public API.
///
/// # Example
///
/// ```
/// use pixelsmith_core::{ImageError, PixelBuffer, PixelFormat};
///
/// fn single_pixel() -> Result<PixelBuffer, ImageError> {
///     let buffer = PixelBuffer::new(vec![0.0, 0.0, 0.0], PixelFormat::Rgb, 1, 1)?;
///     Ok(buffer)
/// }
/// # single_pixel().unwrap();
/// ```
#[derive(Debug, Error)]
pub enum ImageError {
    /// Malformed or unsupported PNG content
    #[error("PNG format error: {0}")]
    Png(#[from] PngError),

    /// Malformed or unsupported PNM content
    #[error("PNM format error: {0}")]
    Pnm(#[from] PnmError),

    /// Byte stream matched neither the PNG signature nor a PNM magic number
    #[error("unrecognized image format")]
    UnknownFormat,

    /// Dithering depth outside 1..=8
    #[error("invalid dithering depth {0} (expected 1..=8)")]
    InvalidDitherDepth(u8),

    /// Channel mask with a length other than three
    #[error("invalid channel mask: expected 3 channels, got {0}")]
    InvalidChannelMask(usize),

    /// Channel mask text that is not a comma-separated list of 0/1 flags
    #[error("malformed channel mask: {0:?}")]
    MalformedChannelMask(String),

    /// Zero, negative or non-finite gamma
    #[error("gamma must be a positive finite number, got {0}")]
    NonPositiveGamma(f32),

    #[error("unknown color space: {0}")]
    UnknownColorSpace(String),

    #[error("unknown dithering type: {0}")]
    UnknownDitheringType(String),

    #[error("unknown scaling type: {0}")]
    UnknownScalingType(String),

    /// Width or height of zero
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Sample array does not match `width * height * channels`
    #[error("sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// Grayscale images only live in the RGB color space
    #[error("grayscale images cannot be converted to {0}")]
    ColorSpaceOnGray(ColorSpace),
}

/// Error type for PNG decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PngError {
    #[error("missing PNG signature")]
    BadSignature,

    /// Buffer ended in the middle of a chunk
    #[error("truncated chunk at offset {offset}")]
    Truncated { offset: usize },

    #[error("first chunk is {0}, expected IHDR")]
    FirstChunkNotHeader(String),

    #[error("unsupported chunk type {0}")]
    UnsupportedChunk(String),

    #[error("CRC mismatch in {chunk} chunk: stored {stored:#010x}, computed {computed:#010x}")]
    CrcMismatch {
        chunk: String,
        stored: u32,
        computed: u32,
    },

    #[error("malformed IHDR chunk")]
    MalformedHeader,

    #[error("unsupported bit depth {0} (only 8 is supported)")]
    UnsupportedBitDepth(u8),

    #[error("unsupported color type {0}")]
    UnsupportedColorType(u8),

    #[error("interlaced images are not supported")]
    Interlaced,

    /// Chunk multiplicity rule violated (IHDR != 1, gAMA > 1, IDAT == 0, PLTE misuse)
    #[error("invalid {chunk} chunk count: {count}")]
    ChunkCount { chunk: &'static str, count: usize },

    #[error("malformed gAMA chunk")]
    MalformedGamma,

    #[error("malformed PLTE chunk of {0} bytes")]
    MalformedPalette(usize),

    #[error("indexed image without PLTE chunk")]
    MissingPalette,

    #[error("palette index {index} out of range ({entries} entries)")]
    PaletteIndex { index: u8, entries: usize },

    #[error("zlib stream error: {0}")]
    Inflate(String),

    #[error("decompressed {actual} bytes, expected {expected}")]
    DataLength { expected: usize, actual: usize },

    #[error("unknown scanline filter type {0}")]
    UnknownFilter(u8),
}

/// Error type for PNM (P5/P6) decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PnmError {
    /// Header does not match `P5|P6 <width> <height> <maxval>`
    #[error("header does not match P5/P6 <width> <height> <maxval>")]
    HeaderMismatch,

    #[error("maxval {0} outside 1..=255")]
    InvalidMaxval(u32),

    #[error("sample {value} exceeds maxval {maxval}")]
    SampleExceedsMaxval { value: u8, maxval: u8 },

    #[error("pixel data holds {actual} bytes, expected {expected}")]
    DataLength { expected: usize, actual: usize },
}
