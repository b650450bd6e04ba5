//! One-dimensional resampling of interleaved sample lines.

use std::f32::consts::PI;

/// Support radius of the Lanczos window.
const LANCZOS_RADIUS: i64 = 3;

/// Source coordinate sampled by output index `i` when stretching `old` samples
/// to `new`. Endpoints map to endpoints; a single output samples position 0.
#[inline]
pub(super) fn source_position(i: usize, old: usize, new: usize) -> f32 {
    if new <= 1 {
        return 0.0;
    }
    i as f32 * (old - 1) as f32 / (new - 1) as f32
}

/// `a · sin(πx) · sin(πx/a) / (π²x²)`, 1 at the origin and 0 outside `(-a, a)`.
pub(super) fn lanczos3(x: f32) -> f32 {
    let a = LANCZOS_RADIUS as f32;
    if x == 0.0 {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }
    let px = PI * x;
    a * px.sin() * (px / a).sin() / (px * px)
}

/// Mitchell-Netravali cubic with parameters `b` and `c`.
pub(super) fn bc_spline(x: f32, b: f32, c: f32) -> f32 {
    let x = x.abs();
    let x2 = x * x;
    let x3 = x2 * x;
    if x < 1.0 {
        ((12.0 - 9.0 * b - 6.0 * c) * x3 + (-18.0 + 12.0 * b + 6.0 * c) * x2 + (6.0 - 2.0 * b))
            / 6.0
    } else if x < 2.0 {
        ((-b - 6.0 * c) * x3
            + (6.0 * b + 30.0 * c) * x2
            + (-12.0 * b - 48.0 * c) * x
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

/// Per-line resampling rule.
#[derive(Debug, Clone, Copy)]
pub(super) enum Filter {
    Nearest,
    Bilinear,
    Lanczos3,
    BcSpline { b: f32, c: f32 },
}

impl Filter {
    /// Resample one line of `old` pixels with `channels` interleaved
    /// samples each into `new` pixels.
    pub(super) fn resample(self, line: &[f32], channels: usize, new: usize) -> Vec<f32> {
        let old = line.len() / channels;
        if old == new {
            return line.to_vec();
        }

        let at = |index: usize, c: usize| line[index * channels + c];
        let mut out = Vec::with_capacity(new * channels);

        for i in 0..new {
            let pos = source_position(i, old, new);
            let base = pos.floor() as i64;
            for c in 0..channels {
                let value = match self {
                    Filter::Nearest => at((pos.round() as usize).min(old - 1), c),
                    Filter::Bilinear => {
                        let lo = (base as usize).min(old - 1);
                        let hi = (pos.ceil() as usize).min(old - 1);
                        let f = pos - lo as f32;
                        (1.0 - f) * at(lo, c) + f * at(hi, c)
                    }
                    Filter::Lanczos3 => {
                        let mut sum = 0.0;
                        let mut weights = 0.0;
                        for j in base - LANCZOS_RADIUS + 1..=base + LANCZOS_RADIUS {
                            if j < 0 || j as usize >= old {
                                continue;
                            }
                            let w = lanczos3(pos - j as f32);
                            sum += w * at(j as usize, c);
                            weights += w;
                        }
                        let value = if weights.abs() > f32::EPSILON { sum / weights } else { sum };
                        value.clamp(0.0, 255.0)
                    }
                    Filter::BcSpline { b, c: cc } => {
                        let mut sum = 0.0;
                        for j in base - 1..=base + 2 {
                            let index = j.clamp(0, old as i64 - 1) as usize;
                            sum += bc_spline(pos - j as f32, b, cc) * at(index, c);
                        }
                        sum.clamp(0.0, 255.0)
                    }
                };
                out.push(value);
            }
        }
        out
    }
}
