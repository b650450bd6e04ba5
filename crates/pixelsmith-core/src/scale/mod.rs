//! Separable image resampling.
//!
//! Images are scaled in two 1-D passes: every row to the new width, then
//! every column of that intermediate to the new height. Both passes run on
//! an RGB copy; the result is converted back to the source's pixel format.

mod kernels;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::buffer::{PixelBuffer, PixelFormat};
use crate::error::{ImageError, Result};

use kernels::Filter;

/// Resampling algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ScalingType {
    NearestNeighbour,
    #[default]
    Bilinear,
    Lanczos3,
    /// Mitchell-Netravali cubic, tuned through [`ScalingConverter::set_b`]
    /// and [`ScalingConverter::set_c`].
    BcSplines,
}

impl ScalingType {
    pub const ALL: [ScalingType; 4] = [
        ScalingType::NearestNeighbour,
        ScalingType::Bilinear,
        ScalingType::Lanczos3,
        ScalingType::BcSplines,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScalingType::NearestNeighbour => "nearest-neighbour",
            ScalingType::Bilinear => "bilinear",
            ScalingType::Lanczos3 => "lanczos3",
            ScalingType::BcSplines => "bc-splines",
        }
    }
}

impl fmt::Display for ScalingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalingType {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "nearest-neighbour" | "nearest-neighbor" | "nearest" => {
                Ok(ScalingType::NearestNeighbour)
            }
            "bilinear" => Ok(ScalingType::Bilinear),
            "lanczos3" | "lanczos" => Ok(ScalingType::Lanczos3),
            "bc-splines" | "bc-spline" | "bicubic" | "mitchell" => Ok(ScalingType::BcSplines),
            _ => Err(ImageError::UnknownScalingType(s.to_string())),
        }
    }
}

/// Resamples [`PixelBuffer`]s to new dimensions.
///
/// Holds the B and C parameters of the cubic spline; they default to 0.5.
///
/// # Example
///
/// ```
/// use pixelsmith_core::{PixelBuffer, PixelFormat, ScalingConverter, ScalingType};
///
/// let buf = PixelBuffer::new(vec![0.0, 255.0], PixelFormat::Gray, 2, 1).unwrap();
/// let out = ScalingConverter::default()
///     .convert(&buf, ScalingType::NearestNeighbour, 4, 2)
///     .unwrap();
/// assert_eq!(out.samples(), &[0.0, 0.0, 255.0, 255.0, 0.0, 0.0, 255.0, 255.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingConverter {
    b: f32,
    c: f32,
}

impl Default for ScalingConverter {
    fn default() -> Self {
        Self { b: 0.5, c: 0.5 }
    }
}

impl ScalingConverter {
    pub fn new(b: f32, c: f32) -> Self {
        Self { b, c }
    }

    pub fn b(&self) -> f32 {
        self.b
    }

    pub fn c(&self) -> f32 {
        self.c
    }

    pub fn set_b(&mut self, b: f32) {
        self.b = b;
    }

    pub fn set_c(&mut self, c: f32) {
        self.c = c;
    }

    fn filter(&self, scaling: ScalingType) -> Filter {
        match scaling {
            ScalingType::NearestNeighbour => Filter::Nearest,
            ScalingType::Bilinear => Filter::Bilinear,
            ScalingType::Lanczos3 => Filter::Lanczos3,
            ScalingType::BcSplines => Filter::BcSpline {
                b: self.b,
                c: self.c,
            },
        }
    }

    /// Resample `source` to `new_width × new_height`.
    ///
    /// A pass whose target size equals the current size copies its input,
    /// so scaling to the same dimensions returns an equal buffer.
    pub fn convert(
        &self,
        source: &PixelBuffer,
        scaling: ScalingType,
        new_width: usize,
        new_height: usize,
    ) -> Result<PixelBuffer> {
        if new_width == 0 || new_height == 0 {
            return Err(ImageError::InvalidDimensions {
                width: new_width,
                height: new_height,
            });
        }
        if source.width() == new_width && source.height() == new_height {
            return Ok(source.clone());
        }

        debug!(
            algorithm = %scaling,
            from_width = source.width(),
            from_height = source.height(),
            to_width = new_width,
            to_height = new_height,
            "scaling"
        );

        let filter = self.filter(scaling);
        let rgb = source.to_format(PixelFormat::Rgb);
        let channels = rgb.channels();
        let (width, height) = (rgb.width(), rgb.height());

        // Rows
        let mut wide = Vec::with_capacity(new_width * height * channels);
        for row in rgb.samples().chunks_exact(width * channels) {
            wide.extend(filter.resample(row, channels, new_width));
        }

        // Columns, through a column-major scratch line
        let mut out = vec![0.0; new_width * new_height * channels];
        let mut column = Vec::with_capacity(height * channels);
        for x in 0..new_width {
            column.clear();
            for y in 0..height {
                let start = (y * new_width + x) * channels;
                column.extend_from_slice(&wide[start..start + channels]);
            }
            let scaled = filter.resample(&column, channels, new_height);
            for (y, px) in scaled.chunks_exact(channels).enumerate() {
                let start = (y * new_width + x) * channels;
                out[start..start + channels].copy_from_slice(px);
            }
        }

        let resized = PixelBuffer::new(out, PixelFormat::Rgb, new_width, new_height)?
            .with_gamma(source.gamma());
        Ok(resized.to_format(source.format()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: usize, height: usize) -> PixelBuffer {
        let samples = (0..width * height)
            .flat_map(|i| {
                let v = if (i % width + i / width) % 2 == 0 { 255.0 } else { 0.0 };
                [v, v / 2.0, 255.0 - v]
            })
            .collect();
        PixelBuffer::new(samples, PixelFormat::Rgb, width, height).unwrap()
    }

    #[test]
    fn test_same_size_is_identity_for_every_algorithm() {
        let buf = checker(5, 3).with_gamma(Some(2.2));
        for scaling in ScalingType::ALL {
            let out = ScalingConverter::default().convert(&buf, scaling, 5, 3).unwrap();
            assert_eq!(out, buf, "{scaling}");
        }
    }

    #[test]
    fn test_single_axis_change_keeps_other_axis() {
        let buf = checker(4, 3);
        let out = ScalingConverter::default()
            .convert(&buf, ScalingType::BcSplines, 4, 6)
            .unwrap();
        assert_eq!(out.width(), 4);
        assert_eq!(out.height(), 6);
        // first row maps exactly onto source position 0, untouched by the
        // width pass
        let first = out.samples()[0];
        assert!(first > 100.0, "first = {first}");
    }

    #[test]
    fn test_rejects_zero_target() {
        let err = ScalingConverter::default()
            .convert(&checker(2, 2), ScalingType::Bilinear, 0, 3)
            .unwrap_err();
        assert!(matches!(err, ImageError::InvalidDimensions { width: 0, height: 3 }));
    }

    #[test]
    fn test_gray_stays_gray() {
        let buf = PixelBuffer::new(vec![0.0, 100.0, 200.0, 50.0], PixelFormat::Gray, 2, 2)
            .unwrap()
            .with_gamma(Some(1.0));
        let out = ScalingConverter::default()
            .convert(&buf, ScalingType::Lanczos3, 5, 7)
            .unwrap();
        assert_eq!(out.format(), PixelFormat::Gray);
        assert_eq!(out.samples().len(), 35);
        assert_eq!(out.gamma(), Some(1.0));
    }

    #[test]
    fn test_shrink_to_one_pixel_samples_origin() {
        let buf = checker(6, 6);
        for scaling in ScalingType::ALL {
            let out = ScalingConverter::default().convert(&buf, scaling, 1, 1).unwrap();
            assert_eq!(out.samples().len(), 3);
            assert!((out.samples()[0] - 255.0).abs() < 1.0 || scaling == ScalingType::BcSplines);
        }
    }

    #[test]
    fn test_bilinear_corners_match_source() {
        let buf = checker(3, 3);
        let out = ScalingConverter::default()
            .convert(&buf, ScalingType::Bilinear, 7, 5)
            .unwrap();
        let px = |x: usize, y: usize| &out.samples()[(y * 7 + x) * 3..(y * 7 + x) * 3 + 3];
        assert_eq!(px(0, 0), &[255.0, 127.5, 0.0]);
        assert_eq!(px(6, 4), &[255.0, 127.5, 0.0]);
    }

    #[test]
    fn test_spline_parameters() {
        let mut scaler = ScalingConverter::default();
        scaler.set_b(1.0 / 3.0);
        scaler.set_c(1.0 / 3.0);
        assert_eq!(scaler, ScalingConverter::new(1.0 / 3.0, 1.0 / 3.0));
        assert_eq!(scaler.b(), 1.0 / 3.0);
    }

    #[test]
    fn test_names_round_trip() {
        for scaling in ScalingType::ALL {
            assert_eq!(scaling.to_string().parse::<ScalingType>().unwrap(), scaling);
        }
        assert!("cubic-bezier".parse::<ScalingType>().is_err());
    }
}
