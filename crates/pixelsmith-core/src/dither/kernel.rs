//! Error diffusion kernel definitions.
//!
//! Each kernel specifies how quantization error is distributed to
//! neighboring pixels that have not been processed yet.

/// An error diffusion kernel.
///
/// Each entry is an offset `(dx, dy)` and a weight. A neighbor receives
/// `error * weight / divisor`. The total error propagated is
/// `sum(weights) / divisor`: Floyd-Steinberg propagates all of it, Atkinson
/// only 6/8.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries. `dy` is never negative.
    pub entries: &'static [(i32, i32, u8)],

    /// Divisor for normalizing weights.
    pub divisor: u8,
}

impl Kernel {
    /// Fraction of the quantization error that reaches neighbors.
    #[cfg(test)]
    fn propagation(&self) -> f32 {
        let total: u32 = self.entries.iter().map(|&(_, _, w)| w as u32).sum();
        total as f32 / self.divisor as f32
    }
}

/// Atkinson dithering kernel.
///
/// Distributes error to 6 neighbors, 1/8 each. The remaining 2/8 is
/// discarded, which gives the characteristic high-contrast look.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
};

/// Floyd-Steinberg dithering kernel.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};
