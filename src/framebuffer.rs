//! RGBA pixel buffer holding a rasterized figure.
//!
//! The drawing backend rasterizes into a packed RGB buffer. [`Framebuffer`] takes
//! that buffer over, stores it as SIMD-aligned RGBA rows and feeds the PNG
//! encoder.

use crate::error::{Error, Result};

/// Alignment for SIMD operations (64 bytes for AVX-512).
const SIMD_ALIGNMENT: usize = 64;

/// SIMD-aligned framebuffer for efficient pixel operations.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGBA pixels in row-major order.
    pixels: Vec<u8>,
    /// Stride in bytes (may include padding for alignment).
    stride: usize,
}

impl Framebuffer {
    /// Create a new, fully transparent framebuffer.
    fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let row_bytes = (width as usize) * 4;
        let stride = (row_bytes + SIMD_ALIGNMENT - 1) & !(SIMD_ALIGNMENT - 1);

        Ok(Self { width, height, pixels: vec![0; stride * (height as usize)], stride })
    }

    /// Build an opaque framebuffer from packed RGB bytes (3 bytes per pixel).
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or `rgb` has the wrong length.
    ///
    /// # Example
    ///
    /// ```
    /// use gridplot::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::from_rgb(2, 1, &[255, 0, 0, 0, 0, 255]).unwrap();
    /// assert_eq!((fb.width(), fb.height()), (2, 1));
    /// assert_eq!(fb.to_compact_pixels(), vec![255, 0, 0, 255, 0, 0, 255, 255]);
    /// ```
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Result<Self> {
        let mut fb = Self::new(width, height)?;
        let row_in = (width as usize) * 3;
        if rgb.len() != row_in * (height as usize) {
            return Err(Error::InvalidDimensions { width, height });
        }

        for (y, src) in rgb.chunks_exact(row_in).enumerate() {
            let start = y * fb.stride;
            let dst = &mut fb.pixels[start..start + (width as usize) * 4];
            for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(3)) {
                d[..3].copy_from_slice(s);
                d[3] = 255;
            }
        }

        Ok(fb)
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get pixel data as a compact buffer without stride padding.
    ///
    /// PNG expects tightly-packed rows.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        let row_bytes = (self.width as usize) * 4;

        if self.stride == row_bytes {
            return self.pixels[..row_bytes * (self.height as usize)].to_vec();
        }

        let mut compact = Vec::with_capacity(row_bytes * (self.height as usize));
        for y in 0..self.height {
            let start = (y as usize) * self.stride;
            compact.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        compact
    }
}
