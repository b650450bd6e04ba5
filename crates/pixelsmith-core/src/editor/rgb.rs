use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::color::{ChannelMask, ColorSpace, ColorSpaceConverter};
use crate::dither::{DitheringConverter, DitheringType};
use crate::error::Result;
use crate::gamma::convert_gamma;
use crate::scale::{ScalingConverter, ScalingType};

/// Editor for three-channel images stored in any [`ColorSpace`].
///
/// Gamma and resampling always operate on RGB; the stored buffer is
/// converted out of and back into the active color space around them.
#[derive(Debug, Clone)]
pub struct RgbEditor {
    buffer: PixelBuffer,
    color_space: ColorSpace,
    gamma: f32,
    dithering: DitheringConverter,
}

impl RgbEditor {
    pub(super) fn new(buffer: PixelBuffer, color_space: ColorSpace, gamma: f32) -> Self {
        Self {
            buffer: buffer.with_gamma(Some(gamma)),
            color_space,
            gamma,
            dithering: DitheringConverter::new(),
        }
    }

    pub(super) fn set_dithering(&mut self, dithering: DitheringConverter) {
        self.dithering = dithering;
    }

    pub fn get_data(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    /// Quantize the stored channels as they are, without leaving the
    /// active color space.
    pub fn get_dithered_data(&self, dithering: DitheringType, depth: u8) -> Result<PixelBuffer> {
        self.dithering.convert(&self.buffer, dithering, depth)
    }

    /// Preview pipeline: active space to RGB (with `mask`), re-gamma to
    /// `gamma`, dither.
    pub fn get_rgb_data(
        &self,
        gamma: f32,
        dithering: DitheringType,
        depth: u8,
        mask: Option<ChannelMask>,
    ) -> Result<PixelBuffer> {
        let rgb = ColorSpaceConverter.to_rgb(&self.buffer, self.color_space, mask)?;
        let regamma = convert_gamma(&rgb, self.gamma, gamma)?;
        self.dithering.convert(&regamma, dithering, depth)
    }

    pub fn set_color_space(&mut self, color_space: ColorSpace) -> Result<()> {
        if color_space == self.color_space {
            return Ok(());
        }
        debug!(from = %self.color_space, to = %color_space, "switching color space");
        self.buffer = ColorSpaceConverter.convert(&self.buffer, self.color_space, color_space)?;
        self.color_space = color_space;
        Ok(())
    }

    pub fn set_gamma(&mut self, gamma: f32) -> Result<()> {
        let rgb = ColorSpaceConverter.to_rgb(&self.buffer, self.color_space, None)?;
        let regamma = convert_gamma(&rgb, self.gamma, gamma)?;
        self.buffer = ColorSpaceConverter.from_rgb(&regamma, self.color_space);
        self.gamma = gamma;
        Ok(())
    }

    pub fn resize(
        &mut self,
        scaler: &ScalingConverter,
        scaling: ScalingType,
        width: usize,
        height: usize,
    ) -> Result<()> {
        let rgb = ColorSpaceConverter.to_rgb(&self.buffer, self.color_space, None)?;
        let scaled = scaler.convert(&rgb, scaling, width, height)?;
        self.buffer = ColorSpaceConverter.from_rgb(&scaled, self.color_space);
        Ok(())
    }
}
