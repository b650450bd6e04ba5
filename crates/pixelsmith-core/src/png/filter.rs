//! Scanline filter reconstruction.

use crate::error::PngError;

/// Undo per-scanline filtering.
///
/// `data` holds `height` rows, each a filter-type byte followed by `stride`
/// filtered bytes. `bpp` is the distance in bytes to the corresponding
/// byte of the previous pixel.
pub(super) fn unfilter(
    data: &[u8],
    height: usize,
    stride: usize,
    bpp: usize,
) -> Result<Vec<u8>, PngError> {
    let expected = stride.checked_add(1).and_then(|row| row.checked_mul(height));
    if expected != Some(data.len()) {
        return Err(PngError::DataLength {
            expected: expected.unwrap_or(usize::MAX),
            actual: data.len(),
        });
    }
    let mut out = vec![0u8; height * stride];
    let zero_row = vec![0u8; stride];

    for y in 0..height {
        let row_start = y * (stride + 1);
        let filter = data[row_start];
        let filtered = &data[row_start + 1..row_start + 1 + stride];

        let (done, rest) = out.split_at_mut(y * stride);
        let prev = if y == 0 { &zero_row[..] } else { &done[(y - 1) * stride..] };
        let cur = &mut rest[..stride];

        for i in 0..stride {
            let a = if i >= bpp { cur[i - bpp] } else { 0 };
            let b = prev[i];
            let c = if i >= bpp { prev[i - bpp] } else { 0 };
            let predictor = match filter {
                0 => 0,
                1 => a,
                2 => b,
                3 => ((a as u16 + b as u16) / 2) as u8,
                4 => paeth(a, b, c),
                other => return Err(PngError::UnknownFilter(other)),
            };
            cur[i] = filtered[i].wrapping_add(predictor);
        }
    }

    Ok(out)
}

/// Paeth predictor: whichever of left, up or upper-left is closest to
/// `a + b - c`, ties resolved in that order.
fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}
