//! PixelBuffer: the canonical in-memory image.
//!
//! A [`PixelBuffer`] stores one `f32` sample per channel per pixel in
//! row-major, channel-interleaved order together with its dimensions, its
//! [`PixelFormat`] and an optional gamma. Buffers are immutable once built;
//! every transform in this crate returns a new buffer.

use std::fmt;

use crate::error::{ImageError, Result};

/// Channel layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PixelFormat {
    /// One luminance channel
    Gray,
    /// Three color channels
    Rgb,
}

impl PixelFormat {
    /// Number of samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Gray => 1,
            PixelFormat::Rgb => 3,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelFormat::Gray => write!(f, "gray"),
            PixelFormat::Rgb => write!(f, "rgb"),
        }
    }
}

/// Immutable image: samples, format, dimensions and optional gamma.
///
/// Sample values are nominally in `0.0..=255.0`. Intermediate results (for
/// example YCoCg chroma or a resampled overshoot) may leave that range; they
/// are clamped only when converted back to bytes with [`to_bytes`](Self::to_bytes).
///
/// # Example
///
/// ```
/// use pixelsmith_core::{PixelBuffer, PixelFormat};
///
/// let gray = PixelBuffer::new(vec![0.0, 255.0], PixelFormat::Gray, 2, 1).unwrap();
/// let rgb = gray.to_format(PixelFormat::Rgb);
///
/// assert_eq!(rgb.samples(), &[0.0, 0.0, 0.0, 255.0, 255.0, 255.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    samples: Vec<f32>,
    format: PixelFormat,
    width: usize,
    height: usize,
    gamma: Option<f32>,
}

impl PixelBuffer {
    /// Build a buffer, validating dimensions and sample count.
    ///
    /// Fails with [`ImageError::InvalidDimensions`] when either dimension is
    /// zero or the sample count overflows `usize`, and with [`ImageError::SampleCountMismatch`] when
    /// `samples.len() != width * height * format.channels()`.
    pub fn new(
        samples: Vec<f32>,
        format: PixelFormat,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(format.channels()))
            .ok_or(ImageError::InvalidDimensions { width, height })?;
        if samples.len() != expected {
            return Err(ImageError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            samples,
            format,
            width,
            height,
            gamma: None,
        })
    }

    /// Build a buffer from 8-bit samples.
    pub fn from_bytes(
        bytes: &[u8],
        format: PixelFormat,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        Self::new(
            bytes.iter().map(|&b| b as f32).collect(),
            format,
            width,
            height,
        )
    }

    /// Return a copy of this buffer tagged with `gamma`.
    #[must_use]
    pub fn with_gamma(mut self, gamma: Option<f32>) -> Self {
        self.gamma = gamma;
        self
    }

    /// Same dimensions and gamma, new samples. Used by transforms whose
    /// output length is known to match.
    pub(crate) fn with_samples(&self, samples: Vec<f32>, format: PixelFormat) -> Self {
        debug_assert_eq!(
            samples.len(),
            self.width * self.height * format.channels(),
            "sample count must match {}x{} {}",
            self.width,
            self.height,
            format
        );
        Self {
            samples,
            format,
            width: self.width,
            height: self.height,
            gamma: self.gamma,
        }
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn gamma(&self) -> Option<f32> {
        self.gamma
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// Convert between Gray and Rgb.
    ///
    /// Gray to Rgb replicates the channel; Rgb to Gray takes the arithmetic
    /// mean of the three channels (not luma-weighted).
    pub fn to_format(&self, format: PixelFormat) -> PixelBuffer {
        match (self.format, format) {
            (from, to) if from == to => self.clone(),
            (PixelFormat::Gray, PixelFormat::Rgb) => {
                let samples = self.samples.iter().flat_map(|&v| [v, v, v]).collect();
                self.with_samples(samples, PixelFormat::Rgb)
            }
            _ => {
                let samples = self
                    .samples
                    .chunks_exact(3)
                    .map(|px| (px[0] + px[1] + px[2]) / 3.0)
                    .collect();
                self.with_samples(samples, PixelFormat::Gray)
            }
        }
    }

    /// Clamp to `0..=255`, round and narrow every sample to a byte.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.samples.iter().map(|&v| sample_to_byte(v)).collect()
    }
}

/// Clamp and round one sample to a byte.
#[inline]
pub(crate) fn sample_to_byte(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}
