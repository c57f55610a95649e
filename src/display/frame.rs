//! 128×32 monochrome frame buffer.
//!
//! Pixels are packed one bit each, row-major, MSB = leftmost pixel.  The
//! buffer implements the `embedded-graphics` [`DrawTarget`] so text and
//! primitives can be drawn into it directly; the OLED adapter copies it
//! to the controller on push.

use core::convert::Infallible;

use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Size};

pub const WIDTH: u32 = 128;
pub const HEIGHT: u32 = 32;

const BYTES_PER_ROW: usize = WIDTH as usize / 8;
const BUFFER_LEN: usize = BYTES_PER_ROW * HEIGHT as usize;

#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bits: [u8; BUFFER_LEN],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("lit", &self.lit_pixels())
            .finish()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            bits: [0; BUFFER_LEN],
        }
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    /// Set one pixel; coordinates outside the panel are ignored.
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        let Some((idx, mask)) = Self::locate(x, y) else {
            return;
        };
        if on {
            self.bits[idx] |= mask;
        } else {
            self.bits[idx] &= !mask;
        }
    }

    /// Pixel state; `false` outside the panel.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        Self::locate(x, y).is_some_and(|(idx, mask)| self.bits[idx] & mask != 0)
    }

    pub fn lit_pixels(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn is_blank(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Lit pixels in any `y` range, e.g. one text row.
    pub fn lit_in_rows(&self, rows: core::ops::Range<u32>) -> usize {
        rows.flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| self.pixel(x, y))
            .count()
    }

    /// Coordinates of every lit pixel, row by row.
    pub fn lit(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..HEIGHT)
            .flat_map(|y| (0..WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| self.pixel(x, y))
    }

    fn locate(x: u32, y: u32) -> Option<(usize, u8)> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        let idx = y as usize * BYTES_PER_ROW + x as usize / 8;
        Some((idx, 0x80 >> (x % 8)))
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH, HEIGHT)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            self.set(point.x as u32, point.y as u32, color.is_on());
        }
        Ok(())
    }
}
