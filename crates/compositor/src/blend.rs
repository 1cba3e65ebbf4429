//! Per-layer merge into the accumulation buffer.

use ps_common::{source_over, Layer, Pixel};
use tracing::trace;

/// Blend `layer` underneath the RGBA8 `output` canvas.
///
/// The output's current content is the upper operand of source-over and the
/// layer's pixel the lower one. Only the rectangle covered by both the canvas
/// and the layer is visited. Positions whose output alpha is already 255 are
/// skipped: source-over returns an opaque top unchanged, so no lower layer
/// can affect them.
///
/// `output` must hold exactly `canvas_width * canvas_height * 4` bytes;
/// [`Compositor::composite`](crate::Compositor::composite) checks this
/// before calling in.
///
/// Returns the number of positions that were blended.
pub(crate) fn blend_under(output: &mut [u8], canvas_width: u32, canvas_height: u32, layer: &Layer) -> usize {
    let w = canvas_width.min(layer.width()) as usize;
    let h = canvas_height.min(layer.height()) as usize;
    let stride = canvas_width as usize * 4;

    let mut blended = 0;
    for y in 0..h {
        let src = &layer.row(y as u32)[..w];
        let dst = &mut output[y * stride..y * stride + w * 4];
        for (px, out) in src.iter().zip(dst.chunks_exact_mut(4)) {
            if out[3] == 255 {
                continue;
            }
            let merged = source_over(Pixel::from_slice(out), *px);
            out.copy_from_slice(&merged.to_array());
            blended += 1;
        }
    }

    trace!(
        layer = ?layer.id(),
        covered_w = w,
        covered_h = h,
        blended,
        "Blended layer under output"
    );
    blended
}
