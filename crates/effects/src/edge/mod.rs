//! Edge detection effects.
//!
//! - [`SobelEffect`]: Gradient magnitude normalized to the strongest edge
//! - [`LaplacianEffect`]: Amplified 3x3 Laplacian
//! - [`LaplacianOfGaussianEffect`]: BT.709 grayscale, Gaussian blur, then Laplacian
//!
//! All three work on an average-grayscale intensity plane and only write
//! interior pixels; the 1-pixel border keeps its previous contents.

pub mod laplacian;
pub mod log;
pub mod sobel;

pub use laplacian::{laplacian, LaplacianEffect};
pub use log::{laplacian_of_gaussian, LaplacianOfGaussianEffect};
pub use sobel::{sobel, SobelEffect};

use ps_common::Layer;

/// 3x3 kernel indexed `[row][col]`.
pub type Kernel3 = [[i32; 3]; 3];

pub const SOBEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
pub const SOBEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];
pub const LAPLACIAN: Kernel3 = [[-1, -1, -1], [-1, 8, -1], [-1, -1, -1]];

/// Average-grayscale intensity `(r + g + b) / 3` of every pixel.
pub fn intensity_plane(layer: &Layer) -> Vec<i32> {
    layer
        .pixels()
        .iter()
        .map(|p| (p.r as i32 + p.g as i32 + p.b as i32) / 3)
        .collect()
}

/// Convolve `plane` with `kernel` at interior positions.
///
/// Border positions are left at 0 in the result; callers skip them.
pub fn convolve_interior(plane: &[i32], width: usize, height: usize, kernel: &Kernel3) -> Vec<i32> {
    let mut out = vec![0; plane.len()];
    if width < 3 || height < 3 {
        return out;
    }
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut acc = 0;
            for (ky, krow) in kernel.iter().enumerate() {
                let row = (y + ky - 1) * width;
                for (kx, w) in krow.iter().enumerate() {
                    acc += plane[row + x + kx - 1] * w;
                }
            }
            out[y * width + x] = acc;
        }
    }
    out
}

/// Row-major indices of the interior pixels of a `width x height` grid.
pub(crate) fn interior(width: usize, height: usize) -> impl Iterator<Item = usize> {
    let (xs, ys) = if width < 3 || height < 3 {
        (0..0, 0..0)
    } else {
        (1..width - 1, 1..height - 1)
    };
    ys.flat_map(move |y| xs.clone().map(move |x| y * width + x))
}
