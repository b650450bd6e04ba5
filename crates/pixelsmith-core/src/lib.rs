#![allow(clippy::needless_range_loop, clippy::manual_range_contains)]

//! pixelsmith-core: raster codecs and pixel transforms
//!
//! This library decodes and encodes PNG and binary PNM files, converts
//! between RGB and six other color models, re-encodes gamma, reduces bit
//! depth with optional dithering and resamples images. Everything operates
//! on the immutable [`PixelBuffer`]; every transform returns a new buffer.
//!
//! # Quick Start
//!
//! ```
//! use pixelsmith_core::{
//!     decode_pnm, encode_png, DitheringConverter, DitheringType, ScalingConverter,
//!     ScalingType,
//! };
//!
//! let mut ppm = b"P6\n2 2\n255\n".to_vec();
//! ppm.extend([255, 0, 0].repeat(4));
//!
//! let image = decode_pnm(&ppm).unwrap();
//! let large = ScalingConverter::default()
//!     .convert(&image, ScalingType::Bilinear, 8, 8)
//!     .unwrap();
//! let reduced = DitheringConverter::new()
//!     .convert(&large, DitheringType::FloydSteinberg, 2)
//!     .unwrap();
//! let png = encode_png(&reduced).unwrap();
//!
//! assert!(png.starts_with(&pixelsmith_core::PNG_SIGNATURE));
//! ```
//!
//! # Editing
//!
//! [`ImageEditor`] keeps one image together with its active color space and
//! gamma, and renders previews through the fixed pipeline
//!
//! ```text
//! stored buffer (active color space, working gamma)
//!     |
//!     v
//! RGB                     (channel mask applied first)
//!     |
//!     v
//! output gamma            (power-law remap)
//!     |
//!     v
//! dithered                (bit depth 1..=8)
//! ```
//!
//! # Sample Convention
//!
//! Samples are `f32` on a nominal 0..=255 scale. Transforms may overshoot
//! that range; the codecs clamp and round when producing bytes.

pub mod buffer;
pub mod codec;
pub mod color;
pub mod dither;
pub mod editor;
pub mod error;
pub mod gamma;
pub mod generate;
pub mod png;
pub mod pnm;
pub mod scale;


pub use buffer::{PixelBuffer, PixelFormat};
pub use codec::{decode_any, ImageCodec, ImageFormat, PngCodec, PnmCodec};
pub use color::{ChannelMask, ColorSpace, ColorSpaceConverter, LumaCoefficients};
pub use dither::{dequantize, quantize, DitheringConverter, DitheringType};
pub use editor::{EditorConfig, GrayEditor, ImageEditor, RgbEditor};
pub use error::{ImageError, PngError, PnmError, Result};
pub use gamma::convert_gamma;
pub use generate::gradient;
pub use crate::png::{decode_png, encode_png, PNG_SIGNATURE};
pub use pnm::{decode_pnm, encode_pnm};
pub use scale::{ScalingConverter, ScalingType};
