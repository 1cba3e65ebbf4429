//! Source-over alpha blending on unpremultiplied RGBA8.
//!
//! With all channels normalized to [0, 1]:
//!
//! ```text
//! outA = topA + botA * (1 - topA)
//! outC = (topC * topA + botC * botA * (1 - topA)) / outA
//! ```
//!
//! Results are scaled back to 8 bits by truncation. Where `outA == 0` the
//! top pixel is returned unchanged.

use crate::pixel::{clamp_u8, Pixel};

/// Blend `top` over `bottom`.
///
/// The three degenerate cases (opaque top, transparent bottom, transparent
/// top) return one of the inputs verbatim, which is what the formula yields
/// for them; evaluating it in floating point could drift by one step on
/// truncation.
#[inline]
pub fn source_over(top: Pixel, bottom: Pixel) -> Pixel {
    if top.a == 255 || bottom.a == 0 {
        return top;
    }
    if top.a == 0 {
        return bottom;
    }

    let ta = top.a as f32 / 255.0;
    let ba = bottom.a as f32 / 255.0;
    let bw = ba * (1.0 - ta);
    let out_a = ta + bw;

    let mix = |tc: u8, bc: u8| -> u8 {
        let c = (tc as f32 / 255.0 * ta + bc as f32 / 255.0 * bw) / out_a;
        clamp_u8(c * 255.0)
    };

    Pixel {
        r: mix(top.r, bottom.r),
        g: mix(top.g, bottom.g),
        b: mix(top.b, bottom.b),
        a: clamp_u8(out_a * 255.0),
    }
}
