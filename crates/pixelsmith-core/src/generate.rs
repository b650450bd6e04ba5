//! Synthetic images.

use crate::buffer::{PixelBuffer, PixelFormat};
use crate::error::Result;

/// Default gradient width.
pub const GRADIENT_WIDTH: usize = 100;
/// Default gradient height.
pub const GRADIENT_HEIGHT: usize = 100;

/// Horizontal ramp from black on the left towards white on the right:
/// column `x` holds `255 · x / width` in every channel.
///
/// The result is tagged with linear gamma.
pub fn gradient(width: usize, height: usize, format: PixelFormat) -> Result<PixelBuffer> {
    let channels = format.channels();
    let row: Vec<f32> = (0..width)
        .flat_map(|x| std::iter::repeat(255.0 * x as f32 / width as f32).take(channels))
        .collect();
    let samples = row.repeat(height);
    Ok(PixelBuffer::new(samples, format, width, height)?.with_gamma(Some(1.0)))
}

/// The 100×100 gray gradient.
pub fn default_gradient() -> Result<PixelBuffer> {
    gradient(GRADIENT_WIDTH, GRADIENT_HEIGHT, PixelFormat::Gray)
}
