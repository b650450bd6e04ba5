//! Ordered dithering with an 8×8 Bayer threshold matrix.

/// Recursive Bayer matrix, values 0..63.
const BAYER_8X8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Quantization offset for pixel `(row, col)`: `(v + 1) / 64 - 0.5`.
#[inline]
pub(super) fn threshold_offset(row: usize, col: usize) -> f32 {
    (BAYER_8X8[row % 8][col % 8] as f32 + 1.0) / 64.0 - 0.5
}
