//! Assertion helpers for tests.

use pretty_assertions::assert_eq;

use pixelsmith_core::{decode_any, ImageFormat, PixelBuffer, PNG_SIGNATURE};

/// Assert `bytes` is a PNG and decode it
pub fn assert_png(bytes: &[u8]) -> PixelBuffer {
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    let (format, buffer) = decode_any(bytes).expect("PNG should decode");
    assert_eq!(format, ImageFormat::Png);
    buffer
}

/// Assert `bytes` is a PNM with the given magic and decode it
pub fn assert_pnm(bytes: &[u8], magic: &str) -> PixelBuffer {
    assert!(
        bytes.starts_with(magic.as_bytes()),
        "Expected {magic} header, got {:?}",
        String::from_utf8_lossy(&bytes[..16.min(bytes.len())])
    );
    let (format, buffer) = decode_any(bytes).expect("PNM should decode");
    assert_eq!(format, ImageFormat::Pnm);
    buffer
}

/// Assert every sample is one of the `2^depth` output levels
pub fn assert_levels(buffer: &PixelBuffer, depth: u8) {
    let top = ((1u32 << depth) - 1) as f32;
    for &v in buffer.samples() {
        let k = (v * top / 255.0).round();
        assert!(
            (k * 255.0 / top - v).abs() <= 0.5,
            "Sample {v} is not a {depth}-bit level"
        );
    }
}

/// Assert two sample slices agree within `tolerance`
pub fn assert_samples_close(actual: &[f32], expected: &[f32], tolerance: f32) {
    assert_eq!(actual.len(), expected.len(), "Sample counts differ");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tolerance,
            "Sample {i}: {a} differs from {e} by more than {tolerance}"
        );
    }
}
