//! Raster-order error diffusion shared by Floyd-Steinberg and Atkinson.

use super::kernel::Kernel;
use super::{dequantize, quantize};

/// Quantize `samples` in place, diffusing each sample's error through
/// `kernel`.
///
/// Pixels are visited row-major, left to right, top to bottom, and every
/// channel is diffused independently. Later pixels read the error already
/// added by earlier ones, so the visiting order determines the output.
/// Neighbors outside the image are skipped.
pub(super) fn diffuse_in_place(
    samples: &mut [f32],
    width: usize,
    height: usize,
    channels: usize,
    depth: u8,
    kernel: &Kernel,
) {
    let divisor = kernel.divisor as f32;

    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let idx = (y * width + x) * channels + c;
                let old = samples[idx];
                let new = dequantize(quantize(old, depth, 0.0), depth);
                let error = old - new;
                samples[idx] = new;

                for &(dx, dy, weight) in kernel.entries {
                    let nx = x as i64 + dx as i64;
                    let ny = y + dy as usize;
                    if nx < 0 || nx as usize >= width || ny >= height {
                        continue;
                    }
                    let target = (ny * width + nx as usize) * channels + c;
                    samples[target] += error * weight as f32 / divisor;
                }
            }
        }
    }
}
