//! HSL and HSV, the hexagonal hue models.
//!
//! Hue is stored on a 0..255 scale (255 = 360°) so it fits the same sample
//! range as every other channel. Saturation, lightness and value are scaled
//! from 0..1 to 0..255.

/// 255/360: degrees to stored hue.
const HUE_SCALE: f32 = 255.0 / 360.0;

/// Hue in degrees (0..360) plus chroma extrema, shared by HSL and HSV.
#[inline]
fn hue_and_extrema(rgb: [f32; 3]) -> (f32, f32, f32) {
    let [r, g, b] = rgb.map(|v| v / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (hue, max, min)
}

/// Rebuild 0..1 RGB from hue (degrees), chroma and the lightness offset.
#[inline]
fn from_hue_chroma(hue: f32, chroma: f32, offset: f32) -> [f32; 3] {
    let sector = (hue / 60.0).rem_euclid(6.0);
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    [
        (r + offset) * 255.0,
        (g + offset) * 255.0,
        (b + offset) * 255.0,
    ]
}

pub(super) fn hsl_from_rgb(rgb: [f32; 3]) -> [f32; 3] {
    let (hue, max, min) = hue_and_extrema(rgb);
    let delta = max - min;
    let lightness = (max + min) / 2.0;
    let saturation = if delta == 0.0 {
        0.0
    } else {
        delta / (1.0 - (2.0 * lightness - 1.0).abs())
    };
    [hue * HUE_SCALE, saturation * 255.0, lightness * 255.0]
}

pub(super) fn hsl_to_rgb(hsl: [f32; 3]) -> [f32; 3] {
    let hue = hsl[0] / HUE_SCALE;
    let saturation = hsl[1] / 255.0;
    let lightness = hsl[2] / 255.0;

    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    from_hue_chroma(hue, chroma, lightness - chroma / 2.0)
}

pub(super) fn hsv_from_rgb(rgb: [f32; 3]) -> [f32; 3] {
    let (hue, max, min) = hue_and_extrema(rgb);
    let saturation = if max == 0.0 { 0.0 } else { (max - min) / max };
    [hue * HUE_SCALE, saturation * 255.0, max * 255.0]
}

pub(super) fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let hue = hsv[0] / HUE_SCALE;
    let saturation = hsv[1] / 255.0;
    let value = hsv[2] / 255.0;

    let chroma = value * saturation;
    from_hue_chroma(hue, chroma, value - chroma)
}
