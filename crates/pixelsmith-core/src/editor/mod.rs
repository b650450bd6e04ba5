//! Stateful editing of one image.
//!
//! [`ImageEditor`] owns the current [`PixelBuffer`] together with the color
//! space its channels are expressed in and the gamma they are encoded
//! with. Setters re-render the stored buffer; getters derive new buffers
//! without touching it.
//!
//! # Example
//!
//! ```
//! use pixelsmith_core::{
//!     ColorSpace, DitheringType, EditorConfig, ImageEditor, PixelBuffer, PixelFormat,
//! };
//!
//! let buf = PixelBuffer::new(vec![200.0, 40.0, 90.0], PixelFormat::Rgb, 1, 1).unwrap();
//! let mut editor = ImageEditor::new(buf, EditorConfig::default()).unwrap();
//!
//! editor.set_color_space(ColorSpace::Hsv).unwrap();
//! let preview = editor
//!     .get_rgb_data(1.0, DitheringType::None, 8, None)
//!     .unwrap();
//!
//! for (a, b) in preview.samples().iter().zip([200.0, 40.0, 90.0]) {
//!     assert!((a - b).abs() < 0.01);
//! }
//! ```

mod gray;
mod rgb;

use crate::buffer::{PixelBuffer, PixelFormat};
use crate::color::{ChannelMask, ColorSpace};
use crate::dither::{DitheringConverter, DitheringType};
use crate::error::{ImageError, Result};
use crate::gamma::{validate_gamma, LINEAR_GAMMA};
use crate::scale::{ScalingConverter, ScalingType};

pub use gray::GrayEditor;
pub use rgb::RgbEditor;

/// Initial editor state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorConfig {
    /// Color space the buffer's channels are expressed in.
    pub color_space: ColorSpace,
    /// Gamma the buffer's samples are encoded with.
    pub gamma: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            color_space: ColorSpace::Rgb,
            gamma: LINEAR_GAMMA,
        }
    }
}

/// An editor for either pixel format.
#[derive(Debug, Clone)]
pub enum ImageEditor {
    Gray(GrayEditor),
    Rgb(RgbEditor),
}

impl ImageEditor {
    /// Wrap `buffer`, picking the variant from its pixel format.
    ///
    /// Gray buffers are only accepted with [`ColorSpace::Rgb`].
    pub fn new(buffer: PixelBuffer, config: EditorConfig) -> Result<Self> {
        let gamma = validate_gamma(config.gamma)?;
        match buffer.format() {
            PixelFormat::Gray if config.color_space != ColorSpace::Rgb => {
                Err(ImageError::ColorSpaceOnGray(config.color_space))
            }
            PixelFormat::Gray => Ok(ImageEditor::Gray(GrayEditor::new(buffer, gamma))),
            PixelFormat::Rgb => Ok(ImageEditor::Rgb(RgbEditor::new(
                buffer,
                config.color_space,
                gamma,
            ))),
        }
    }

    /// Replace the converter used for dithering, e.g. with a seeded one.
    #[must_use]
    pub fn with_dithering(mut self, dithering: DitheringConverter) -> Self {
        match &mut self {
            ImageEditor::Gray(editor) => editor.set_dithering(dithering),
            ImageEditor::Rgb(editor) => editor.set_dithering(dithering),
        }
        self
    }

    /// The stored buffer, in the active color space and gamma.
    pub fn get_data(&self) -> &PixelBuffer {
        match self {
            ImageEditor::Gray(editor) => editor.get_data(),
            ImageEditor::Rgb(editor) => editor.get_data(),
        }
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.get_data().format()
    }

    pub fn color_space(&self) -> ColorSpace {
        match self {
            ImageEditor::Gray(_) => ColorSpace::Rgb,
            ImageEditor::Rgb(editor) => editor.color_space(),
        }
    }

    pub fn gamma(&self) -> f32 {
        match self {
            ImageEditor::Gray(editor) => editor.gamma(),
            ImageEditor::Rgb(editor) => editor.gamma(),
        }
    }

    /// Quantize the stored buffer.
    pub fn get_dithered_data(&self, dithering: DitheringType, depth: u8) -> Result<PixelBuffer> {
        match self {
            ImageEditor::Gray(editor) => editor.get_dithered_data(dithering, depth),
            ImageEditor::Rgb(editor) => editor.get_dithered_data(dithering, depth),
        }
    }

    /// Render for display or saving: convert to RGB (honoring `mask`),
    /// re-gamma to `gamma`, then dither.
    ///
    /// Gray editors skip the color step, ignore `mask` and return a gray
    /// buffer.
    pub fn get_rgb_data(
        &self,
        gamma: f32,
        dithering: DitheringType,
        depth: u8,
        mask: Option<ChannelMask>,
    ) -> Result<PixelBuffer> {
        match self {
            ImageEditor::Gray(editor) => editor.get_rgb_data(gamma, dithering, depth),
            ImageEditor::Rgb(editor) => editor.get_rgb_data(gamma, dithering, depth, mask),
        }
    }

    /// Re-express the stored buffer in `color_space`.
    ///
    /// Gray editors reject every space but RGB with
    /// [`ImageError::ColorSpaceOnGray`].
    pub fn set_color_space(&mut self, color_space: ColorSpace) -> Result<()> {
        match self {
            ImageEditor::Gray(editor) => editor.set_color_space(color_space),
            ImageEditor::Rgb(editor) => editor.set_color_space(color_space),
        }
    }

    /// Re-encode the stored buffer with `gamma`.
    pub fn set_gamma(&mut self, gamma: f32) -> Result<()> {
        match self {
            ImageEditor::Gray(editor) => editor.set_gamma(gamma),
            ImageEditor::Rgb(editor) => editor.set_gamma(gamma),
        }
    }

    /// Resample the stored buffer to `width × height`.
    pub fn resize(
        &mut self,
        scaler: &ScalingConverter,
        scaling: ScalingType,
        width: usize,
        height: usize,
    ) -> Result<()> {
        match self {
            ImageEditor::Gray(editor) => editor.resize(scaler, scaling, width, height),
            ImageEditor::Rgb(editor) => editor.resize(scaler, scaling, width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_image() -> PixelBuffer {
        let samples = vec![
            255.0, 0.0, 0.0, 0.0, 255.0, 0.0, //
            0.0, 0.0, 255.0, 128.0, 128.0, 128.0,
        ];
        PixelBuffer::new(samples, PixelFormat::Rgb, 2, 2).unwrap()
    }

    fn gray_image() -> PixelBuffer {
        PixelBuffer::new(vec![0.0, 64.0, 128.0, 255.0], PixelFormat::Gray, 2, 2).unwrap()
    }

    fn assert_close(a: &[f32], b: &[f32], tolerance: f32) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() <= tolerance, "{x} vs {y}");
        }
    }

    #[test]
    fn test_variant_follows_pixel_format() {
        let gray = ImageEditor::new(gray_image(), EditorConfig::default()).unwrap();
        assert!(matches!(gray, ImageEditor::Gray(_)));
        assert_eq!(gray.pixel_format(), PixelFormat::Gray);

        let rgb = ImageEditor::new(rgb_image(), EditorConfig::default()).unwrap();
        assert!(matches!(rgb, ImageEditor::Rgb(_)));
        assert_eq!(rgb.get_data().gamma(), Some(1.0));
    }

    #[test]
    fn test_gray_rejects_color_space() {
        let config = EditorConfig {
            color_space: ColorSpace::Hsl,
            ..EditorConfig::default()
        };
        assert!(matches!(
            ImageEditor::new(gray_image(), config),
            Err(ImageError::ColorSpaceOnGray(ColorSpace::Hsl))
        ));

        let mut editor = ImageEditor::new(gray_image(), EditorConfig::default()).unwrap();
        assert!(matches!(
            editor.set_color_space(ColorSpace::YCoCg),
            Err(ImageError::ColorSpaceOnGray(ColorSpace::YCoCg))
        ));
        assert!(editor.set_color_space(ColorSpace::Rgb).is_ok());
        assert_eq!(editor.color_space(), ColorSpace::Rgb);
    }

    #[test]
    fn test_rejects_bad_gamma() {
        let config = EditorConfig {
            gamma: 0.0,
            ..EditorConfig::default()
        };
        assert!(matches!(
            ImageEditor::new(rgb_image(), config),
            Err(ImageError::NonPositiveGamma(_))
        ));
    }

    #[test]
    fn test_color_space_round_trip_through_editor() {
        let mut editor = ImageEditor::new(rgb_image(), EditorConfig::default()).unwrap();
        for space in ColorSpace::ALL {
            editor.set_color_space(space).unwrap();
            assert_eq!(editor.color_space(), space);
        }
        editor.set_color_space(ColorSpace::Rgb).unwrap();
        assert_close(editor.get_data().samples(), rgb_image().samples(), 0.05);
    }

    #[test]
    fn test_get_rgb_data_applies_mask_in_active_space() {
        let mut editor = ImageEditor::new(rgb_image(), EditorConfig::default()).unwrap();
        editor.set_color_space(ColorSpace::Cmy).unwrap();
        // Disable cyan: the complement of a zeroed channel is full red
        let preview = editor
            .get_rgb_data(1.0, DitheringType::None, 8, Some(ChannelMask::new([false, true, true])))
            .unwrap();
        for px in preview.samples().chunks_exact(3) {
            assert_eq!(px[0], 255.0);
        }
        // The stored buffer is untouched
        assert_eq!(editor.color_space(), ColorSpace::Cmy);
    }

    #[test]
    fn test_set_gamma_round_trips_through_rgb() {
        let mut editor = ImageEditor::new(rgb_image(), EditorConfig::default()).unwrap();
        editor.set_color_space(ColorSpace::Hsl).unwrap();
        editor.set_gamma(2.2).unwrap();
        assert_eq!(editor.gamma(), 2.2);

        // Rendering at the original gamma restores the original colors
        let preview = editor
            .get_rgb_data(1.0, DitheringType::None, 8, None)
            .unwrap();
        assert_close(preview.samples(), rgb_image().samples(), 0.1);
    }

    #[test]
    fn test_gray_preview_stays_gray_and_quantizes() {
        let editor = ImageEditor::new(gray_image(), EditorConfig::default()).unwrap();
        let preview = editor
            .get_rgb_data(1.0, DitheringType::None, 1, Some(ChannelMask::new([false; 3])))
            .unwrap();
        assert_eq!(preview.format(), PixelFormat::Gray);
        assert_eq!(preview.samples(), &[0.0, 0.0, 255.0, 255.0]);
    }

    #[test]
    fn test_get_dithered_data_keeps_state() {
        let editor = ImageEditor::new(gray_image(), EditorConfig::default()).unwrap();
        let out = editor.get_dithered_data(DitheringType::Ordered, 2).unwrap();
        assert_eq!(out.width(), 2);
        assert_eq!(editor.get_data().samples(), gray_image().samples());
    }

    #[test]
    fn test_resize_keeps_color_space() {
        let mut editor = ImageEditor::new(rgb_image(), EditorConfig::default()).unwrap();
        editor.set_color_space(ColorSpace::YCbCr709).unwrap();
        editor
            .resize(&ScalingConverter::default(), ScalingType::Bilinear, 4, 3)
            .unwrap();
        assert_eq!(editor.color_space(), ColorSpace::YCbCr709);
        assert_eq!(editor.get_data().width(), 4);
        assert_eq!(editor.get_data().height(), 3);
        assert_eq!(editor.pixel_format(), PixelFormat::Rgb);
    }

    #[test]
    fn test_seeded_dithering_is_reproducible() {
        let render = || {
            ImageEditor::new(rgb_image(), EditorConfig::default())
                .unwrap()
                .with_dithering(DitheringConverter::with_seed(3))
                .get_rgb_data(1.0, DitheringType::Random, 2, None)
                .unwrap()
        };
        assert_eq!(render(), render());
    }
}
