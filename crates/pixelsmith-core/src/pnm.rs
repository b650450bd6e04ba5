//! Binary PGM (P5) and PPM (P6) codec.
//!
//! The header is `P5` or `P6`, then whitespace-separated width, height and
//! maxval, then exactly one whitespace byte before the raw samples. Samples
//! are rescaled from `0..=maxval` to `0..=255` on decode; files are always
//! written with a maxval of 255.

use std::sync::OnceLock;

use regex::bytes::Regex;
use tracing::debug;

use crate::buffer::{PixelBuffer, PixelFormat};
use crate::error::{PnmError, Result};

const HEADER_PATTERN: &str = r"(?-u)\A(P[56])\s+(\d+)\s+(\d+)\s+(\d+)\s";

fn header_regex() -> Option<&'static Regex> {
    static HEADER: OnceLock<Option<Regex>> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(HEADER_PATTERN).ok()).as_ref()
}

fn parse_number<T: std::str::FromStr>(digits: &[u8]) -> std::result::Result<T, PnmError> {
    std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(PnmError::HeaderMismatch)
}

/// Decode a P5 or P6 file.
///
/// P5 decodes to [`PixelFormat::Gray`], P6 to [`PixelFormat::Rgb`]. The
/// buffer carries no gamma.
pub fn decode_pnm(bytes: &[u8]) -> Result<PixelBuffer> {
    let captures = header_regex()
        .and_then(|re| re.captures(bytes))
        .ok_or(PnmError::HeaderMismatch)?;

    let format = match &captures[1] {
        b"P5" => PixelFormat::Gray,
        _ => PixelFormat::Rgb,
    };
    let width: usize = parse_number(&captures[2])?;
    let height: usize = parse_number(&captures[3])?;
    let maxval: u32 = parse_number(&captures[4])?;
    if !(1..=255).contains(&maxval) {
        return Err(PnmError::InvalidMaxval(maxval).into());
    }
    let maxval = maxval as u8;

    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(format.channels()))
        .ok_or(PnmError::HeaderMismatch)?;
    let data = &bytes[captures[0].len()..];
    if data.len() != expected {
        return Err(PnmError::DataLength {
            expected,
            actual: data.len(),
        }
        .into());
    }

    if let Some(&value) = data.iter().find(|&&v| v > maxval) {
        return Err(PnmError::SampleExceedsMaxval { value, maxval }.into());
    }

    debug!(width, height, %format, maxval, "decoded PNM");

    let scale = 255.0 / maxval as f32;
    let samples = data.iter().map(|&v| v as f32 * scale).collect();
    PixelBuffer::new(samples, format, width, height)
}

/// Encode `buffer` as P5 (gray) or P6 (rgb) with maxval 255.
pub fn encode_pnm(buffer: &PixelBuffer) -> Vec<u8> {
    let magic = match buffer.format() {
        PixelFormat::Gray => "P5",
        PixelFormat::Rgb => "P6",
    };
    let header = format!("{magic}\n{} {}\n255\n", buffer.width(), buffer.height());

    let mut out = Vec::with_capacity(header.len() + buffer.samples().len());
    out.extend_from_slice(header.as_bytes());
    out.extend(buffer.to_bytes());
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ImageError;

    fn ppm(header: &str, data: &[u8]) -> Vec<u8> {
        let mut bytes = header.as_bytes().to_vec();
        bytes.extend_from_slice(data);
        bytes
    }

    #[test]
    fn test_header_pattern_compiles() {
        let re = header_regex().expect("header pattern is valid");
        assert!(re.is_match(b"P6 1 1 255\n"));
        assert!(!re.is_match(b"P3 1 1 255\n"));
    }

    #[test]
    fn test_decode_gray() {
        let buf = decode_pnm(&ppm("P5 3 1 255\n", &[0, 128, 255])).unwrap();
        assert_eq!(buf.format(), PixelFormat::Gray);
        assert_eq!((buf.width(), buf.height()), (3, 1));
        assert_eq!(buf.samples(), &[0.0, 128.0, 255.0]);
        assert_eq!(buf.gamma(), None);
    }

    #[test]
    fn test_width_precedes_height() {
        let buf = decode_pnm(&ppm("P6\n3\n1\n255\n", &[0; 9])).unwrap();
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 1);
    }

    #[test]
    fn test_rescales_small_maxval() {
        let buf = decode_pnm(&ppm("P5\n2 1\n15\n", &[0, 15])).unwrap();
        assert_eq!(buf.samples(), &[0.0, 255.0]);
        let buf = decode_pnm(&ppm("P5\n1 1\n3\n", &[1])).unwrap();
        assert_eq!(buf.samples(), &[85.0]);
    }

    #[test]
    fn test_single_whitespace_before_data() {
        // The data starts with a byte that looks like whitespace
        let buf = decode_pnm(&ppm("P5\n2 1\n255\n", b"\n\t")).unwrap();
        assert_eq!(buf.samples(), &[10.0, 9.0]);
    }

    #[test]
    fn test_rejects_sample_above_maxval() {
        let err = decode_pnm(&ppm("P5\n2 1\n100\n", &[50, 200])).unwrap_err();
        assert!(matches!(
            err,
            ImageError::Pnm(PnmError::SampleExceedsMaxval {
                value: 200,
                maxval: 100
            })
        ));
    }

    #[test]
    fn test_rejects_bad_headers() {
        for header in ["P3\n1 1\n255\n", "P6 1 1\n", "P6\n-1 1\n255\n", "garbage"] {
            let err = decode_pnm(&ppm(header, &[0, 0, 0])).unwrap_err();
            assert!(
                matches!(err, ImageError::Pnm(PnmError::HeaderMismatch)),
                "{header:?}: {err}"
            );
        }
    }

    #[test]
    fn test_rejects_sixteen_bit_maxval() {
        let err = decode_pnm(&ppm("P5\n1 1\n65535\n", &[0, 0])).unwrap_err();
        assert!(matches!(err, ImageError::Pnm(PnmError::InvalidMaxval(65535))));
        let err = decode_pnm(&ppm("P5\n1 1\n0\n", &[0])).unwrap_err();
        assert!(matches!(err, ImageError::Pnm(PnmError::InvalidMaxval(0))));
    }

    #[test]
    fn test_rejects_wrong_data_length() {
        let err = decode_pnm(&ppm("P6\n2 1\n255\n", &[0; 5])).unwrap_err();
        assert!(matches!(
            err,
            ImageError::Pnm(PnmError::DataLength {
                expected: 6,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_zero_width_is_invalid() {
        let err = decode_pnm(&ppm("P5\n0 1\n255\n", &[])).unwrap_err();
        assert!(matches!(err, ImageError::InvalidDimensions { width: 0, height: 1 }));
    }

    #[test]
    fn test_encode_header_and_clamping() {
        let buf = PixelBuffer::new(vec![-3.0, 12.4, 300.0], PixelFormat::Rgb, 1, 1).unwrap();
        assert_eq!(encode_pnm(&buf), ppm("P6\n1 1\n255\n", &[0, 12, 255]));
    }

    #[test]
    fn test_roundtrip_is_exact() {
        let samples = (0..=255).map(|v| v as f32).collect();
        let buf = PixelBuffer::new(samples, PixelFormat::Gray, 32, 8).unwrap();
        assert_eq!(decode_pnm(&encode_pnm(&buf)).unwrap(), buf);
    }
}
