//! Test images.

use pixelsmith_core::{encode_png, PixelBuffer, PixelFormat};

/// 2×2 solid red binary PPM
pub fn solid_red_ppm() -> Vec<u8> {
    let mut bytes = b"P6\n2 2\n255\n".to_vec();
    bytes.extend([0xFF, 0x00, 0x00].repeat(4));
    bytes
}

/// 4×1 gray PGM with maxval 15
pub fn low_maxval_pgm() -> Vec<u8> {
    let mut bytes = b"P5\n4 1\n15\n".to_vec();
    bytes.extend([0, 5, 10, 15]);
    bytes
}

/// 8×8 RGB buffer with distinct channel ramps
pub fn color_ramp() -> PixelBuffer {
    let samples = (0..64usize)
        .flat_map(|i| {
            let (x, y) = (i % 8, i / 8);
            [(x * 32) as f32, (y * 32) as f32, ((x + y) * 16) as f32]
        })
        .collect();
    PixelBuffer::new(samples, PixelFormat::Rgb, 8, 8).expect("valid ramp")
}

/// PNG of [`color_ramp`] tagged with `gamma`
pub fn color_ramp_png(gamma: Option<f32>) -> Vec<u8> {
    encode_png(&color_ramp().with_gamma(gamma)).expect("encodable ramp")
}

/// Minimal YAML configuration
pub const DITHER_CONFIG: &str = r#"
dithering:
  algorithm: atkinson
  depth: 1
scaling:
  algorithm: nearest-neighbour
"#;
