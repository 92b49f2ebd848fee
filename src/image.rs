use crate::Color;

use rgb::RGBA8;

use alloc::{vec, vec::Vec};

use ImageError::*;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ImageError {
    DimensionMismatch,
    OutOfBounds,
    /// the backend keeps no pixels
    Unsupported,
}

pub type ImageResult<T> = Result<T, ImageError>;

/// Row-major RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<RGBA8>,
}

impl Image {
    /// Transparent image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![RGBA8::new(0, 0, 0, 0); width * height],
        }
    }

    pub fn from_pixels(width: usize, height: usize, pixels: Vec<RGBA8>) -> ImageResult<Self> {
        match pixels.len() == width * height {
            true => Ok(Self { width, height, pixels }),
            false => Err(DimensionMismatch),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[RGBA8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [RGBA8] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<RGBA8> {
        self.pixels
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        match x < self.width && y < self.height {
            true => Some(y * self.width + x),
            false => None,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i].into())
    }

    pub fn set(&mut self, x: usize, y: usize, color: Color) -> ImageResult<()> {
        let i = self.index(x, y).ok_or(OutOfBounds)?;
        self.pixels[i] = color.into();
        Ok(())
    }

    /// Copies the `w × h` region at `(x, y)`; the region is clipped to
    /// the image.
    pub fn region(&self, x: usize, y: usize, w: usize, h: usize) -> Image {
        let w = w.min(self.width.saturating_sub(x));
        let h = match w {
            0 => 0,
            _ => h.min(self.height.saturating_sub(y)),
        };
        let mut pixels = Vec::with_capacity(w * h);
        for row in y..y + h {
            let start = row * self.width + x;
            pixels.extend_from_slice(&self.pixels[start..][..w]);
        }
        Image {
            width: w,
            height: h,
            pixels,
        }
    }

    /// Pastes `src` with its top left corner at `(x, y)`, clipping what
    /// falls outside.
    pub fn paste(&mut self, src: &Image, x: usize, y: usize) {
        let w = src.width.min(self.width.saturating_sub(x));
        let h = match w {
            0 => 0,
            _ => src.height.min(self.height.saturating_sub(y)),
        };
        for row in 0..h {
            let dst = (y + row) * self.width + x;
            let from = row * src.width;
            self.pixels[dst..][..w].copy_from_slice(&src.pixels[from..][..w]);
        }
    }

    /// Replaces this image's alpha channel with `mask`'s.
    pub fn mask(&mut self, mask: &Image) -> ImageResult<()> {
        if mask.width != self.width || mask.height != self.height {
            return Err(DimensionMismatch);
        }

        for (dst, src) in self.pixels.iter_mut().zip(mask.pixels.iter()) {
            dst.a = src.a;
        }

        Ok(())
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.into());
    }
}
