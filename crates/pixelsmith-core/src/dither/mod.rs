//! Bit-depth reduction with optional dithering.
//!
//! Every variant reduces each sample to one of `2^depth` evenly spaced
//! levels between 0 and 255. They differ in what they add before
//! quantizing:
//!
//! - **None**: nothing, plain truncation to the level below
//! - **Ordered**: an 8×8 Bayer threshold, tiled over the image
//! - **Random**: fresh uniform noise per sample
//! - **Floyd-Steinberg**: the quantization error of earlier pixels (100%)
//! - **Atkinson**: the quantization error of earlier pixels (75%)
//!
//! # Example
//!
//! ```
//! use pixelsmith_core::{DitheringConverter, DitheringType, PixelBuffer, PixelFormat};
//!
//! let buf = PixelBuffer::new(vec![100.0, 100.0, 100.0], PixelFormat::Gray, 3, 1).unwrap();
//! let out = DitheringConverter::new()
//!     .convert(&buf, DitheringType::FloydSteinberg, 1)
//!     .unwrap();
//! assert_eq!(out.samples(), &[0.0, 255.0, 0.0]);
//! ```

mod diffusion;
mod kernel;
mod ordered;

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::{ImageError, Result};

pub use kernel::{Kernel, ATKINSON, FLOYD_STEINBERG};

/// Dithering algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DitheringType {
    /// Quantize without noise.
    #[default]
    None,
    /// 8×8 Bayer threshold matrix.
    Ordered,
    /// Uniform noise in [-0.5, 0.5) of a level.
    Random,
    /// Error diffusion, 7/16 3/16 5/16 1/16.
    FloydSteinberg,
    /// Error diffusion, 1/8 to six neighbors.
    Atkinson,
}

impl DitheringType {
    /// All supported algorithms.
    pub const ALL: [DitheringType; 5] = [
        DitheringType::None,
        DitheringType::Ordered,
        DitheringType::Random,
        DitheringType::FloydSteinberg,
        DitheringType::Atkinson,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DitheringType::None => "none",
            DitheringType::Ordered => "ordered",
            DitheringType::Random => "random",
            DitheringType::FloydSteinberg => "floyd-steinberg",
            DitheringType::Atkinson => "atkinson",
        }
    }
}

impl fmt::Display for DitheringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DitheringType {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "none" => Ok(DitheringType::None),
            "ordered" | "bayer" => Ok(DitheringType::Ordered),
            "random" => Ok(DitheringType::Random),
            "floyd-steinberg" | "floydsteinberg" | "fs" => Ok(DitheringType::FloydSteinberg),
            "atkinson" => Ok(DitheringType::Atkinson),
            _ => Err(ImageError::UnknownDitheringType(s.to_string())),
        }
    }
}

/// Highest level index at `depth` bits.
#[inline]
fn max_level(depth: u8) -> u32 {
    (1u32 << depth) - 1
}

/// Map a sample to a level: `clamp(floor(value / 2^(8-depth) + offset), 0, 2^depth - 1)`.
///
/// `depth` must already be validated to lie in `1..=8`.
#[inline]
pub fn quantize(value: f32, depth: u8, offset: f32) -> u32 {
    let step = (1u32 << (8 - depth)) as f32;
    let level = (value / step + offset).floor();
    level.clamp(0.0, max_level(depth) as f32) as u32
}

/// Map a level back to a sample: `level · 255 / (2^depth - 1)`.
#[inline]
pub fn dequantize(level: u32, depth: u8) -> f32 {
    level as f32 * 255.0 / max_level(depth) as f32
}

/// Reject depths outside `1..=8`.
pub fn validate_depth(depth: u8) -> Result<u8> {
    if (1..=8).contains(&depth) {
        Ok(depth)
    } else {
        Err(ImageError::InvalidDitherDepth(depth))
    }
}

/// Reduces a [`PixelBuffer`] to a lower bit depth.
///
/// The converter itself is stateless apart from an optional seed for
/// [`DitheringType::Random`]; each call builds its own generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DitheringConverter {
    seed: Option<u64>,
}

impl DitheringConverter {
    /// Converter whose random noise is seeded from the OS.
    pub fn new() -> Self {
        Self::default()
    }

    /// Converter whose random noise is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Quantize every sample of `source` to `depth` bits using `dithering`.
    ///
    /// The output keeps the source's format, dimensions and gamma. Every
    /// output sample is one of `k · 255 / (2^depth - 1)`.
    pub fn convert(
        &self,
        source: &PixelBuffer,
        dithering: DitheringType,
        depth: u8,
    ) -> Result<PixelBuffer> {
        let depth = validate_depth(depth)?;

        if dithering == DitheringType::None && depth == 8 {
            return Ok(source.clone());
        }

        debug!(
            algorithm = %dithering,
            depth,
            width = source.width(),
            height = source.height(),
            format = %source.format(),
            "dithering"
        );

        let width = source.width();
        let channels = source.channels();
        let requantize = |value: f32, offset: f32| dequantize(quantize(value, depth, offset), depth);

        let samples = match dithering {
            DitheringType::None => source
                .samples()
                .iter()
                .map(|&v| requantize(v, 0.0))
                .collect(),
            DitheringType::Ordered => source
                .samples()
                .iter()
                .enumerate()
                .map(|(i, &v)| {
                    let pixel = i / channels;
                    let offset = ordered::threshold_offset(pixel / width, pixel % width);
                    requantize(v, offset)
                })
                .collect(),
            DitheringType::Random => {
                let mut rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                source
                    .samples()
                    .iter()
                    .map(|&v| requantize(v, rng.gen_range(-0.5..0.5)))
                    .collect()
            }
            DitheringType::FloydSteinberg | DitheringType::Atkinson => {
                let kernel = if dithering == DitheringType::Atkinson {
                    &ATKINSON
                } else {
                    &FLOYD_STEINBERG
                };
                let mut working = source.samples().to_vec();
                diffusion::diffuse_in_place(
                    &mut working,
                    width,
                    source.height(),
                    channels,
                    depth,
                    kernel,
                );
                working
            }
        };

        Ok(source.with_samples(samples, source.format()))
    }
}
