//! Layer pixel grid: the unit of storage and of filter application.

use crate::error::{check_rgba_len, BufferError};
use crate::pixel::Pixel;
use crate::types::{LayerId, Resolution};

/// A rectangular grid of pixels, row-major, `(x, y)` with `y = 0` at the top.
///
/// Storage is one contiguous buffer; width and height are kept alongside it
/// and `pixels.len() == width * height` always holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layer {
    /// Store key, or `None` for a scratch layer that is not stored.
    id: Option<LayerId>,
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Layer {
    /// Transparent layer of the given size, not bound to a store id.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Pixel::TRANSPARENT)
    }

    /// Layer filled with a single color, not bound to a store id.
    pub fn filled(width: u32, height: u32, color: Pixel) -> Self {
        Self {
            id: None,
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Copy a row-major RGBA8 buffer into a new layer.
    ///
    /// # Errors
    /// Returns [`BufferError`] for non-positive dimensions or when
    /// `bytes.len() != width * height * 4`.
    pub fn from_rgba(
        id: Option<LayerId>,
        bytes: &[u8],
        width: i64,
        height: i64,
    ) -> Result<Self, BufferError> {
        check_rgba_len(width, height, bytes.len())?;
        let pixels = bytes.chunks_exact(4).map(Pixel::from_slice).collect();
        Ok(Self {
            id,
            width: width as u32,
            height: height as u32,
            pixels,
        })
    }

    pub fn id(&self) -> Option<LayerId> {
        self.id
    }

    pub fn set_id(&mut self, id: Option<LayerId>) {
        self.id = id;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Whether `(x, y)` addresses a pixel of this layer.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Overwrite the pixel at `(x, y)`. Returns `false` outside the grid.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> bool {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = pixel;
            true
        } else {
            false
        }
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// One row of the grid.
    pub fn row(&self, y: u32) -> &[Pixel] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Replace the grid with a new one of a different shape; the id is kept.
    ///
    /// # Panics
    /// Panics if `pixels.len() != width * height`.
    pub fn replace_grid(&mut self, width: u32, height: u32, pixels: Vec<Pixel>) {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel count must match width * height"
        );
        self.width = width;
        self.height = height;
        self.pixels = pixels;
    }

    /// Apply `f` to every pixel in place.
    pub fn map_pixels(&mut self, mut f: impl FnMut(Pixel) -> Pixel) {
        for p in &mut self.pixels {
            *p = f(*p);
        }
    }

    /// Copy the grid out as a row-major RGBA8 buffer.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            out.extend_from_slice(&p.to_array());
        }
        out
    }
}

/// Read access to layers by id.
///
/// The compositor only needs lookups, so it takes this instead of a concrete
/// store type.
pub trait LayerSource {
    fn layer(&self, id: LayerId) -> Option<&Layer>;
}
