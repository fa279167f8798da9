//! Low-level chart primitives shared across widgets.
//!
//! Both charts here are built on one piece of arithmetic, [`stack_segments`]:
//! split a column of `height` pixels into consecutive segments, one per
//! percentage, top to bottom. Rounding is done on the cumulative boundary
//! rather than per segment, so rounding errors never accumulate. A stack whose
//! percentages add up to 100 always fills the column exactly and never
//! overflows it.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use heapless::Vec;

use crate::histogram::HistogramBuffer;

/// Most segments one stacked column can have.
pub const MAX_STACK_SEGMENTS: usize = 8;

/// Split `height` pixels into one segment per percentage, top to bottom.
///
/// Percentages are clamped to `0..=100` and their running total to 100. Non
/// finite values count as zero.
///
/// # Panics
/// Panics if more than [`MAX_STACK_SEGMENTS`] percentages are given.
pub fn stack_segments(
    height: u32,
    percents: &[f32],
) -> Vec<u32, MAX_STACK_SEGMENTS> {
    assert!(
        percents.len() <= MAX_STACK_SEGMENTS,
        "stack of {} segments exceeds the limit of {MAX_STACK_SEGMENTS}",
        percents.len()
    );

    let mut segments = Vec::new();
    let mut cumulative = 0.0_f32;
    let mut previous = 0_u32;

    for &pct in percents {
        let pct = if pct.is_finite() { pct.clamp(0.0, 100.0) } else { 0.0 };
        cumulative = (cumulative + pct).min(100.0);
        let boundary = ((cumulative / 100.0 * height as f32).round() as u32).min(height);
        segments.push(boundary - previous).ok();
        previous = boundary;
    }

    segments
}

/// Draw a `width`-wide stacked column, segments top to bottom in `colors` order.
///
/// # Panics
/// Panics if `colors` and `percents` differ in length.
pub fn draw_stack<D>(
    display: &mut D,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    colors: &[Rgb565],
    percents: &[f32],
) where
    D: DrawTarget<Color = Rgb565>,
{
    assert_eq!(
        colors.len(),
        percents.len(),
        "stack needs one color per percentage"
    );
    if width == 0 || height == 0 {
        return;
    }

    let mut top = y;
    for (&color, segment) in colors.iter().zip(stack_segments(height, percents)) {
        if segment > 0 {
            Rectangle::new(Point::new(x, top), Size::new(width, segment))
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(display)
                .ok();
        }
        top += segment as i32;
    }
}

/// Draw a sparkline: one 1-px stacked column per histogram slot, oldest on the left.
///
/// Always draws `hist.capacity()` columns. Slots never written stack to zero
/// height and leave their column untouched.
///
/// # Panics
/// Panics if the palette length differs from the histogram's series count.
pub fn draw_histogram<D>(
    display: &mut D,
    x: i32,
    y: i32,
    height: u32,
    hist: &HistogramBuffer,
    palette: &[Rgb565],
) where
    D: DrawTarget<Color = Rgb565>,
{
    assert_eq!(
        palette.len(),
        hist.series(),
        "histogram palette needs one color per series"
    );

    for (column, slot) in hist.iter().enumerate() {
        draw_stack(display, x + column as i32, y, 1, height, palette, slot);
    }
}

// =============================================================================
// Tests
// =============================================================================
