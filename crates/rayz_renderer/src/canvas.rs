//! Pixel buffer shared by render workers.

use std::sync::{Mutex, PoisonError};

use rayz_core::Color;

use crate::{RenderError, RenderResult};

/// A width × height grid of colors, row-major from the top-left.
///
/// Writes take `&self` so several workers can fill disjoint pixels at once.
#[derive(Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Mutex<Vec<Color>>,
}

impl Canvas {
    /// A black canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: Mutex::new(vec![Color::ZERO; (width as usize) * (height as usize)]),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> RenderResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(RenderError::PixelOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    pub fn write_pixel(&self, x: u32, y: u32, color: Color) -> RenderResult<()> {
        let index = self.index(x, y)?;
        let mut pixels = self.pixels.lock().unwrap_or_else(PoisonError::into_inner);
        pixels[index] = color;
        Ok(())
    }

    pub fn pixel_at(&self, x: u32, y: u32) -> RenderResult<Color> {
        let index = self.index(x, y)?;
        let pixels = self.pixels.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(pixels[index])
    }

    /// Snapshot of every pixel in row-major order.
    pub fn pixels(&self) -> Vec<Color> {
        self.pixels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 8-bit RGBA bytes, clamped to [0, 1] and rounded, with opaque alpha.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let pixels = self.pixels.lock().unwrap_or_else(PoisonError::into_inner);
        let mut bytes = Vec::with_capacity(pixels.len() * 4);
        for color in pixels.iter() {
            let c = color.clamp(Color::ZERO, Color::ONE) * 255.0;
            bytes.extend_from_slice(&[
                c.x.round() as u8,
                c.y.round() as u8,
                c.z.round() as u8,
                255,
            ]);
        }
        bytes
    }
}
