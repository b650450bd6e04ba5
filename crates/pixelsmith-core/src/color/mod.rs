//! Color spaces and conversion to and from RGB.
//!
//! Every color space stores three channels on a 0..255-ish scale so that
//! a converted [`PixelBuffer`](crate::PixelBuffer) can flow through gamma,
//! dithering and the codecs unchanged:
//!
//! | Space | Channels | Neutral when masked |
//! |-------|----------|---------------------|
//! | RGB | R, G, B | 0 |
//! | HSL / HSV | hue (0..255 for 0..360°), saturation, lightness/value | 0 |
//! | YCbCr 601 / 709 | full-range luma, chroma centered on 128 | 0, 128, 128 |
//! | YCoCg | luma, chroma centered on 0 | 0 |
//! | CMY | 255 minus each RGB channel | 0 |
//!
//! # Example
//!
//! ```
//! use pixelsmith_core::{ColorSpace, ColorSpaceConverter, PixelBuffer, PixelFormat};
//!
//! let white = PixelBuffer::new(vec![255.0; 3], PixelFormat::Rgb, 1, 1).unwrap();
//! let cmy = ColorSpaceConverter.from_rgb(&white, ColorSpace::Cmy);
//! assert_eq!(cmy.samples(), &[0.0, 0.0, 0.0]);
//! ```

mod convert;
mod hsx;
mod luma_chroma;

use std::fmt;
use std::str::FromStr;

use crate::error::ImageError;

pub use convert::ColorSpaceConverter;
pub use luma_chroma::LumaCoefficients;

/// Color model a buffer's three channels are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorSpace {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "rgb"))]
    Rgb,
    #[cfg_attr(feature = "serde", serde(rename = "hsl"))]
    Hsl,
    #[cfg_attr(feature = "serde", serde(rename = "hsv"))]
    Hsv,
    /// BT.601 luma weights (kr=0.299, kb=0.114)
    #[cfg_attr(feature = "serde", serde(rename = "ycbcr601"))]
    YCbCr601,
    /// BT.709 luma weights (kr=0.2126, kb=0.0722)
    #[cfg_attr(feature = "serde", serde(rename = "ycbcr709"))]
    YCbCr709,
    #[cfg_attr(feature = "serde", serde(rename = "ycocg"))]
    YCoCg,
    #[cfg_attr(feature = "serde", serde(rename = "cmy"))]
    Cmy,
}

impl ColorSpace {
    /// All supported color spaces.
    pub const ALL: [ColorSpace; 7] = [
        ColorSpace::Rgb,
        ColorSpace::Hsl,
        ColorSpace::Hsv,
        ColorSpace::YCbCr601,
        ColorSpace::YCbCr709,
        ColorSpace::YCoCg,
        ColorSpace::Cmy,
    ];

    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "rgb",
            ColorSpace::Hsl => "hsl",
            ColorSpace::Hsv => "hsv",
            ColorSpace::YCbCr601 => "ycbcr601",
            ColorSpace::YCbCr709 => "ycbcr709",
            ColorSpace::YCoCg => "ycocg",
            ColorSpace::Cmy => "cmy",
        }
    }

    /// Channel values that stand for "no contribution" when a channel is
    /// disabled by a [`ChannelMask`].
    pub fn neutral(self) -> [f32; 3] {
        match self {
            ColorSpace::YCbCr601 | ColorSpace::YCbCr709 => [0.0, 128.0, 128.0],
            _ => [0.0; 3],
        }
    }

    /// Convert one RGB pixel into this space.
    pub fn from_rgb_pixel(self, rgb: [f32; 3]) -> [f32; 3] {
        match self {
            ColorSpace::Rgb => rgb,
            ColorSpace::Hsl => hsx::hsl_from_rgb(rgb),
            ColorSpace::Hsv => hsx::hsv_from_rgb(rgb),
            ColorSpace::YCbCr601 => LumaCoefficients::BT601.ycbcr_from_rgb(rgb),
            ColorSpace::YCbCr709 => LumaCoefficients::BT709.ycbcr_from_rgb(rgb),
            ColorSpace::YCoCg => luma_chroma::ycocg_from_rgb(rgb),
            ColorSpace::Cmy => complement(rgb),
        }
    }

    /// Convert one pixel of this space back to RGB.
    pub fn to_rgb_pixel(self, pixel: [f32; 3]) -> [f32; 3] {
        match self {
            ColorSpace::Rgb => pixel,
            ColorSpace::Hsl => hsx::hsl_to_rgb(pixel),
            ColorSpace::Hsv => hsx::hsv_to_rgb(pixel),
            ColorSpace::YCbCr601 => LumaCoefficients::BT601.ycbcr_to_rgb(pixel),
            ColorSpace::YCbCr709 => LumaCoefficients::BT709.ycbcr_to_rgb(pixel),
            ColorSpace::YCoCg => luma_chroma::ycocg_to_rgb(pixel),
            ColorSpace::Cmy => complement(pixel),
        }
    }
}

/// CMY is the per-channel complement of RGB and its own inverse.
#[inline]
fn complement(pixel: [f32; 3]) -> [f32; 3] {
    [255.0 - pixel[0], 255.0 - pixel[1], 255.0 - pixel[2]]
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = ImageError;

    /// Parse a color space name, case-insensitively. `ycbcr` alone means
    /// BT.601.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_', '.'], "");
        match normalized.as_str() {
            "rgb" => Ok(ColorSpace::Rgb),
            "hsl" => Ok(ColorSpace::Hsl),
            "hsv" => Ok(ColorSpace::Hsv),
            "ycbcr" | "ycbcr601" => Ok(ColorSpace::YCbCr601),
            "ycbcr709" => Ok(ColorSpace::YCbCr709),
            "ycocg" => Ok(ColorSpace::YCoCg),
            "cmy" => Ok(ColorSpace::Cmy),
            _ => Err(ImageError::UnknownColorSpace(s.to_string())),
        }
    }
}

/// Per-channel enable flags applied before converting a buffer to RGB.
///
/// A disabled channel is replaced by the color space's
/// [`neutral`](ColorSpace::neutral) value.
///
/// # Example
///
/// ```
/// use pixelsmith_core::ChannelMask;
///
/// let mask: ChannelMask = "1,0,1".parse().unwrap();
/// assert_eq!(mask.flags(), [true, false, true]);
///
/// let too_short = ChannelMask::try_from(&[true, false][..]);
/// assert!(too_short.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMask([bool; 3]);

impl ChannelMask {
    /// Every channel enabled.
    pub const ALL: ChannelMask = ChannelMask([true; 3]);

    pub fn new(flags: [bool; 3]) -> Self {
        Self(flags)
    }

    #[inline]
    pub fn flags(self) -> [bool; 3] {
        self.0
    }

    #[inline]
    pub fn is_all(self) -> bool {
        self.0 == [true; 3]
    }
}

impl Default for ChannelMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl TryFrom<&[bool]> for ChannelMask {
    type Error = ImageError;

    fn try_from(flags: &[bool]) -> Result<Self, Self::Error> {
        match flags {
            [a, b, c] => Ok(Self([*a, *b, *c])),
            _ => Err(ImageError::InvalidChannelMask(flags.len())),
        }
    }
}

impl FromStr for ChannelMask {
    type Err = ImageError;

    /// Parse a comma-separated list of `1`/`0`/`true`/`false` flags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let flags = s
            .split(',')
            .map(|token| match token.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "on" => Ok(true),
                "0" | "false" | "off" => Ok(false),
                _ => Err(ImageError::MalformedChannelMask(s.to_string())),
            })
            .collect::<Result<Vec<bool>, _>>()?;
        ChannelMask::try_from(flags.as_slice())
    }
}
