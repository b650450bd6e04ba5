//! Power-law gamma remapping.
//!
//! Samples are re-expressed from one gamma to another with
//!
//! ```text
//! out = 256 · (in / 256) ^ (new_gamma / old_gamma)
//! ```
//!
//! Converting to the same gamma (within 1e-3) returns the input untouched so
//! repeated no-op conversions never accumulate floating-point drift.

use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::{ImageError, Result};

/// Gamma differences below this are treated as equal.
pub const GAMMA_EPSILON: f32 = 1e-3;

/// Gamma of the linear working representation.
pub const LINEAR_GAMMA: f32 = 1.0;

/// Reject zero, negative and non-finite gamma values.
pub fn validate_gamma(gamma: f32) -> Result<f32> {
    if gamma.is_finite() && gamma > 0.0 {
        Ok(gamma)
    } else {
        Err(ImageError::NonPositiveGamma(gamma))
    }
}

/// Remap one sample. Negative inputs (transient overshoot) are clamped to 0
/// before the power is taken.
#[inline]
pub fn convert_sample(value: f32, old_gamma: f32, new_gamma: f32) -> f32 {
    256.0 * (value.max(0.0) / 256.0).powf(new_gamma / old_gamma)
}

/// Re-express every sample of `source` from `old_gamma` to `new_gamma`.
///
/// The result is tagged with `new_gamma`.
///
/// # Example
///
/// ```
/// use pixelsmith_core::{convert_gamma, PixelBuffer, PixelFormat};
///
/// let buf = PixelBuffer::new(vec![64.0], PixelFormat::Gray, 1, 1).unwrap();
/// let out = convert_gamma(&buf, 1.0, 2.0).unwrap();
/// assert_eq!(out.samples(), &[16.0]);
/// assert_eq!(out.gamma(), Some(2.0));
/// ```
pub fn convert_gamma(source: &PixelBuffer, old_gamma: f32, new_gamma: f32) -> Result<PixelBuffer> {
    validate_gamma(old_gamma)?;
    validate_gamma(new_gamma)?;

    if (old_gamma - new_gamma).abs() < GAMMA_EPSILON {
        return Ok(source.clone());
    }

    debug!(old_gamma, new_gamma, samples = source.samples().len(), "converting gamma");

    let samples = source
        .samples()
        .iter()
        .map(|&v| convert_sample(v, old_gamma, new_gamma))
        .collect();
    Ok(source
        .with_samples(samples, source.format())
        .with_gamma(Some(new_gamma)))
}
