//! Luma/chroma models: parameterized YCbCr and YCoCg.

/// Chroma midpoint for YCbCr on the 0..255 scale.
const CHROMA_OFFSET: f32 = 128.0;

/// Luma weights of a YCbCr variant. `kg` is implied by `kr + kg + kb = 1`.
///
/// ```text
/// Y  = kr·R + kg·G + kb·B
/// Cb = 128 + (B − Y) / (2·(1 − kb))
/// Cr = 128 + (R − Y) / (2·(1 − kr))
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumaCoefficients {
    pub kr: f32,
    pub kb: f32,
}

impl LumaCoefficients {
    /// ITU-R BT.601
    pub const BT601: LumaCoefficients = LumaCoefficients {
        kr: 0.299,
        kb: 0.114,
    };

    /// ITU-R BT.709
    pub const BT709: LumaCoefficients = LumaCoefficients {
        kr: 0.2126,
        kb: 0.0722,
    };

    #[inline]
    pub fn kg(self) -> f32 {
        1.0 - self.kr - self.kb
    }

    pub fn ycbcr_from_rgb(self, rgb: [f32; 3]) -> [f32; 3] {
        let [r, g, b] = rgb;
        let y = self.kr * r + self.kg() * g + self.kb * b;
        let cb = CHROMA_OFFSET + (b - y) / (2.0 * (1.0 - self.kb));
        let cr = CHROMA_OFFSET + (r - y) / (2.0 * (1.0 - self.kr));
        [y, cb, cr]
    }

    pub fn ycbcr_to_rgb(self, ycbcr: [f32; 3]) -> [f32; 3] {
        let [y, cb, cr] = ycbcr;
        let r = y + 2.0 * (1.0 - self.kr) * (cr - CHROMA_OFFSET);
        let b = y + 2.0 * (1.0 - self.kb) * (cb - CHROMA_OFFSET);
        let g = (y - self.kr * r - self.kb * b) / self.kg();
        [r, g, b]
    }
}

pub(super) fn ycocg_from_rgb(rgb: [f32; 3]) -> [f32; 3] {
    let [r, g, b] = rgb;
    [
        0.25 * r + 0.5 * g + 0.25 * b,
        0.5 * r - 0.5 * b,
        -0.25 * r + 0.5 * g - 0.25 * b,
    ]
}

pub(super) fn ycocg_to_rgb(ycocg: [f32; 3]) -> [f32; 3] {
    let [y, co, cg] = ycocg;
    [y + co - cg, y + cg, y - co - cg]
}
