use crate::buffer::PixelBuffer;
use crate::color::ColorSpace;
use crate::dither::{DitheringConverter, DitheringType};
use crate::error::{ImageError, Result};
use crate::gamma::convert_gamma;
use crate::scale::{ScalingConverter, ScalingType};

/// Editor for single-channel images. Gray buffers only live in RGB space,
/// so only gamma, dithering and resizing are available.
#[derive(Debug, Clone)]
pub struct GrayEditor {
    buffer: PixelBuffer,
    gamma: f32,
    dithering: DitheringConverter,
}

impl GrayEditor {
    pub(super) fn new(buffer: PixelBuffer, gamma: f32) -> Self {
        Self {
            buffer: buffer.with_gamma(Some(gamma)),
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

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn get_dithered_data(&self, dithering: DitheringType, depth: u8) -> Result<PixelBuffer> {
        self.dithering.convert(&self.buffer, dithering, depth)
    }

    /// Render at `gamma`, then dither. The output stays gray.
    pub fn get_rgb_data(
        &self,
        gamma: f32,
        dithering: DitheringType,
        depth: u8,
    ) -> Result<PixelBuffer> {
        let regamma = convert_gamma(&self.buffer, self.gamma, gamma)?;
        self.dithering.convert(&regamma, dithering, depth)
    }

    pub fn set_color_space(&mut self, color_space: ColorSpace) -> Result<()> {
        match color_space {
            ColorSpace::Rgb => Ok(()),
            other => Err(ImageError::ColorSpaceOnGray(other)),
        }
    }

    pub fn set_gamma(&mut self, gamma: f32) -> Result<()> {
        self.buffer = convert_gamma(&self.buffer, self.gamma, gamma)?;
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
        self.buffer = scaler.convert(&self.buffer, scaling, width, height)?;
        Ok(())
    }
}
