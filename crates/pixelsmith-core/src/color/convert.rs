//! Buffer-level color space conversion.

use tracing::debug;

use super::{ChannelMask, ColorSpace};
use crate::buffer::{PixelBuffer, PixelFormat};
use crate::error::{ImageError, Result};

/// Converts whole [`PixelBuffer`]s between RGB and the other color spaces.
///
/// Output buffers are always [`PixelFormat::Rgb`]; gamma metadata is
/// carried through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorSpaceConverter;

impl ColorSpaceConverter {
    /// Interpret `source` as `color_space` and convert it to RGB.
    ///
    /// Channels disabled in `mask` are pinned to the space's neutral value
    /// before conversion. A gray buffer is promoted to RGB first and is only
    /// accepted when `color_space` is [`ColorSpace::Rgb`].
    pub fn to_rgb(
        &self,
        source: &PixelBuffer,
        color_space: ColorSpace,
        mask: Option<ChannelMask>,
    ) -> Result<PixelBuffer> {
        if source.format() == PixelFormat::Gray && color_space != ColorSpace::Rgb {
            return Err(ImageError::ColorSpaceOnGray(color_space));
        }
        let source = source.to_format(PixelFormat::Rgb);
        let mask = mask.unwrap_or_default();

        if color_space == ColorSpace::Rgb && mask.is_all() {
            return Ok(source);
        }

        debug!(%color_space, ?mask, width = source.width(), height = source.height(), "converting to RGB");

        let flags = mask.flags();
        let neutral = color_space.neutral();
        let samples = map_pixels(source.samples(), |px| {
            let mut masked = px;
            for c in 0..3 {
                if !flags[c] {
                    masked[c] = neutral[c];
                }
            }
            color_space.to_rgb_pixel(masked)
        });
        Ok(source.with_samples(samples, PixelFormat::Rgb))
    }

    /// Convert an RGB (or gray, promoted to RGB) buffer into `color_space`.
    pub fn from_rgb(&self, source: &PixelBuffer, color_space: ColorSpace) -> PixelBuffer {
        let source = source.to_format(PixelFormat::Rgb);
        if color_space == ColorSpace::Rgb {
            return source;
        }

        debug!(%color_space, width = source.width(), height = source.height(), "converting from RGB");

        let samples = map_pixels(source.samples(), |px| color_space.from_rgb_pixel(px));
        source.with_samples(samples, PixelFormat::Rgb)
    }

    /// Re-express `source` from one color space in another, through RGB.
    pub fn convert(
        &self,
        source: &PixelBuffer,
        from: ColorSpace,
        to: ColorSpace,
    ) -> Result<PixelBuffer> {
        if from == to {
            return Ok(source.clone());
        }
        let rgb = self.to_rgb(source, from, None)?;
        Ok(self.from_rgb(&rgb, to))
    }
}

/// Apply `f` to every interleaved 3-sample pixel.
fn map_pixels(samples: &[f32], f: impl Fn([f32; 3]) -> [f32; 3]) -> Vec<f32> {
    samples
        .chunks_exact(3)
        .flat_map(|px| f([px[0], px[1], px[2]]))
        .collect()
}
