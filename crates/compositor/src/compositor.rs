//! Main compositor: merges an ordered stack of layers into one output buffer.
//!
//! The [`Compositor`] takes a [`LayerSource`] to resolve ids, a bottom-to-top
//! order list, and a caller-owned RGBA8 output buffer. The order is passed on
//! every call and never cached.

use ps_common::{check_rgba_len, LayerId, LayerSource};
use tracing::debug;

use crate::blend::blend_under;
use crate::CompositorError;

/// CPU compositor for a fixed canvas size.
///
/// The compositor does **not** own any layers. It borrows a layer source
/// and writes into a buffer owned by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Compositor {
    /// Canvas width in pixels.
    output_width: u32,
    /// Canvas height in pixels.
    output_height: u32,
}

impl Compositor {
    /// Create a new compositor targeting the given canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            output_width: width,
            output_height: height,
        }
    }

    /// Returns the canvas width.
    pub fn output_width(&self) -> u32 {
        self.output_width
    }

    /// Returns the canvas height.
    pub fn output_height(&self) -> u32 {
        self.output_height
    }

    /// Byte length the output buffer must have.
    pub fn output_len(&self) -> usize {
        self.output_width as usize * self.output_height as usize * 4
    }

    /// Composite the layers named in `order` into `output`.
    ///
    /// # Arguments
    ///
    /// * `layers` - Source used to resolve ids
    /// * `order` - Layer ids, bottom layer first, top layer last
    /// * `output` - Destination RGBA8 buffer of exactly `width * height * 4` bytes
    ///
    /// The output is cleared to transparent black and the stack is then
    /// walked from the top down, each layer blended under the accumulated
    /// result. Ids that `layers` does not know are skipped.
    pub fn composite(
        &self,
        layers: &dyn LayerSource,
        order: &[LayerId],
        output: &mut [u8],
    ) -> Result<(), CompositorError> {
        check_rgba_len(
            self.output_width as i64,
            self.output_height as i64,
            output.len(),
        )?;

        output.fill(0);

        debug!(
            layer_count = order.len(),
            output_w = self.output_width,
            output_h = self.output_height,
            "Starting compositing"
        );

        for (depth, id) in order.iter().rev().enumerate() {
            let Some(layer) = layers.layer(*id) else {
                debug!(layer = %id, depth, "Skipping unknown layer");
                continue;
            };
            blend_under(output, self.output_width, self.output_height, layer);
        }

        debug!("Compositing complete");

        Ok(())
    }

    /// Composite into a freshly allocated buffer.
    pub fn render(
        &self,
        layers: &dyn LayerSource,
        order: &[LayerId],
    ) -> Result<Vec<u8>, CompositorError> {
        let mut output = vec![0u8; self.output_len()];
        self.composite(layers, order, &mut output)?;
        Ok(output)
    }
}
