//! Off-screen pixel buffer used as the backing store of every layout context.
//!
//! A [`Surface`] is a plain `Vec` of optional RGB565 pixels. `None` means
//! "nothing drawn here", so compositing one surface onto another only copies
//! what was actually painted. It implements [`DrawTarget`], which means every
//! `embedded-graphics` primitive, text style and font draws into it directly,
//! with out-of-bounds pixels clipped.
//!
//! # Flow
//!
//! ```text
//! widget scratch ──blit──▶ group scratch ──blit──▶ bar surface ──flush──▶ display
//! ```

use core::convert::Infallible;
use core::ops::Range;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Transparent-by-default RGB565 pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    size: Size,
    pixels: Vec<Option<Rgb565>>,
}

impl Surface {
    /// Allocate a fully transparent surface.
    pub fn new(size: Size) -> Self {
        let len = size.width as usize * size.height as usize;
        Self { size, pixels: vec![None; len] }
    }

    #[inline]
    pub const fn width(&self) -> u32 { self.size.width }

    #[inline]
    pub const fn height(&self) -> u32 { self.size.height }

    /// Index of `point` in the pixel buffer, or `None` when it lies outside.
    fn index(
        &self,
        point: Point,
    ) -> Option<usize> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        (x < self.size.width && y < self.size.height).then(|| y as usize * self.size.width as usize + x as usize)
    }

    /// Color at `point`, `None` if transparent or out of bounds.
    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<Rgb565> {
        self.index(point).and_then(|i| self.pixels[i])
    }

    /// Make every pixel transparent again.
    pub fn reset(&mut self) { self.pixels.fill(None); }

    /// Number of painted pixels.
    pub fn painted(&self) -> usize { self.pixels.iter().filter(|p| p.is_some()).count() }

    /// Copy the painted pixels of `columns` in `src` onto this surface.
    ///
    /// Column `columns.start` of `src` lands at `at.x`, row 0 at `at.y`.
    /// Transparent source pixels leave the destination untouched and anything
    /// falling outside this surface is clipped.
    pub fn blit(
        &mut self,
        src: &Surface,
        columns: Range<u32>,
        at: Point,
    ) {
        let end = columns.end.min(src.width());
        for sy in 0..src.height() {
            for sx in columns.start..end {
                let Some(color) = src.pixels[sy as usize * src.width() as usize + sx as usize] else {
                    continue;
                };
                let dest = at + Point::new((sx - columns.start) as i32, sy as i32);
                if let Some(i) = self.index(dest) {
                    self.pixels[i] = Some(color);
                }
            }
        }
    }

    /// Write every painted pixel onto `target`, offset by `origin`.
    pub fn flush<D>(
        &self,
        target: &mut D,
        origin: Point,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let width = self.size.width as usize;
        target.draw_iter(self.pixels.iter().enumerate().filter_map(|(i, p)| {
            p.map(|color| {
                let point = Point::new((i % width) as i32, (i / width) as i32);
                Pixel(origin + point, color)
            })
        }))
    }
}

impl OriginDimensions for Surface {
    fn size(&self) -> Size { self.size }
}

impl DrawTarget for Surface {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = Some(color);
            }
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.pixels.fill(Some(color));
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
