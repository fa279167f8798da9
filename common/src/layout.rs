//! Direction-aware drawing contexts.
//!
//! Everything on the bar is laid out along one axis. A [`LayoutContext`] is a
//! surface plus a cursor that moves forward as content is drawn. Widgets only
//! ever see a context: they paint at the cursor and never learn where on the
//! bar they will end up.
//!
//! # Placement
//!
//! A context's [`Direction`] decides where a block of a given extent lands
//! when it is composited at the current cursor:
//!
//! ```text
//!  LeftToRight   |pad|cursor|XXXX|.................................|
//!  RightToLeft   |.................................|XXXX|cursor|pad|
//!  Centered      |................|cursor|XXXX|....................|
//!                                 ^ floor((width - extent) / 2)
//! ```
//!
//! Placement and cursor arithmetic are pure functions on [`Direction`], so they
//! are tested without drawing anything.
//!
//! # Lifetimes
//!
//! Scratch contexts own their surface and free it on drop. Contexts built with
//! [`LayoutContext::on_root`] borrow the bar's persistent surface, which only a
//! [`RootFrame`] hands out, so no context can outlive the frame it draws in.

use core::fmt;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::config::SMALL_SPACE;
use crate::histogram::HistogramBuffer;
use crate::surface::Surface;
use crate::widgets::{draw_histogram, draw_stack};

// =============================================================================
// Direction
// =============================================================================

/// Flow direction of a context, and the alignment group of a widget.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    /// Anchored to the left edge, flowing right.
    LeftToRight,
    /// Anchored to the right edge, flowing left.
    RightToLeft,
    /// Centered on the bar.
    Centered,
}

impl Direction {
    /// Group processing order for a frame.
    pub const ALL: [Self; 3] = [Self::LeftToRight, Self::RightToLeft, Self::Centered];

    /// Starting cursor for a context with `padding`.
    ///
    /// Edge-anchored contexts keep `padding` clear of their edge. A centered
    /// context has no edge to keep clear of.
    #[inline]
    pub const fn origin_offset(
        self,
        padding: u32,
    ) -> u32 {
        match self {
            Self::LeftToRight | Self::RightToLeft => padding,
            Self::Centered => 0,
        }
    }

    /// Cursor after drawing `amount` more pixels.
    #[inline]
    pub const fn advance(
        self,
        cursor: u32,
        amount: u32,
    ) -> u32 {
        cursor.saturating_add(amount)
    }

    /// Left x of a block `extent` wide drawn at `cursor` on a surface `width` wide.
    ///
    /// May be negative when the block does not fit; drawing clips.
    pub fn place(
        self,
        width: u32,
        cursor: u32,
        extent: u32,
    ) -> i32 {
        let (width, cursor, extent) = (i64::from(width), i64::from(cursor), i64::from(extent));
        let x = match self {
            Self::LeftToRight => cursor,
            Self::RightToLeft => width - cursor - extent,
            Self::Centered => (width - extent).div_euclid(2) + cursor,
        };
        x.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Short lowercase name, as used in logs and errors.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftToRight => "left",
            Self::RightToLeft => "right",
            Self::Centered => "center",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Layout Context
// =============================================================================

/// Where a context's pixels live.
enum Backing<'a> {
    /// Off-screen buffer owned by the context.
    Scratch(Surface),
    /// The bar's persistent surface, borrowed for one frame.
    Root(&'a mut Surface),
}

/// A surface plus a forward-only cursor in a given direction.
pub struct LayoutContext<'a> {
    backing: Backing<'a>,
    direction: Direction,
    padding: u32,
    origin_offset: u32,
    cursor: u32,
    secondary: u32,
    font: &'static MonoFont<'static>,
}

impl<'a> LayoutContext<'a> {
    /// Fresh off-screen context of `size`, fully transparent.
    pub fn scratch(
        direction: Direction,
        padding: u32,
        size: Size,
        font: &'static MonoFont<'static>,
    ) -> Self {
        Self::with_backing(Backing::Scratch(Surface::new(size)), direction, padding, font)
    }

    /// Context drawing straight onto the bar's `root` surface.
    pub fn on_root(
        direction: Direction,
        padding: u32,
        root: &'a mut Surface,
        font: &'static MonoFont<'static>,
    ) -> Self {
        Self::with_backing(Backing::Root(root), direction, padding, font)
    }

    fn with_backing(
        backing: Backing<'a>,
        direction: Direction,
        padding: u32,
        font: &'static MonoFont<'static>,
    ) -> Self {
        let origin_offset = direction.origin_offset(padding);
        Self {
            backing,
            direction,
            padding,
            origin_offset,
            cursor: origin_offset,
            secondary: 0,
            font,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn direction(&self) -> Direction { self.direction }

    #[inline]
    pub const fn padding(&self) -> u32 { self.padding }

    #[inline]
    pub const fn origin_offset(&self) -> u32 { self.origin_offset }

    #[inline]
    pub const fn cursor(&self) -> u32 { self.cursor }

    /// Offset on the cross axis, applied to composited blocks.
    #[inline]
    pub const fn secondary(&self) -> u32 { self.secondary }

    #[inline]
    pub const fn font(&self) -> &'static MonoFont<'static> { self.font }

    /// Whether this context draws onto the bar's persistent surface.
    #[inline]
    pub const fn is_root(&self) -> bool { matches!(self.backing, Backing::Root(_)) }

    /// Pixels drawn so far, including padding on both sides.
    #[inline]
    pub const fn extent(&self) -> u32 { self.cursor.saturating_add(self.origin_offset) }

    /// Pixels drawn so far, excluding padding.
    #[inline]
    pub const fn content_width(&self) -> u32 { self.cursor - self.origin_offset }

    pub fn surface(&self) -> &Surface {
        match &self.backing {
            Backing::Scratch(surface) => surface,
            Backing::Root(surface) => &**surface,
        }
    }

    fn surface_mut(&mut self) -> &mut Surface {
        match &mut self.backing {
            Backing::Scratch(surface) => surface,
            Backing::Root(surface) => &mut **surface,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 { self.surface().width() }

    #[inline]
    pub fn height(&self) -> u32 { self.surface().height() }

    /// Height available for content between top and bottom padding.
    #[inline]
    pub fn inner_height(&self) -> u32 { self.height().saturating_sub(2 * self.padding) }

    // -------------------------------------------------------------------------
    // Cursor & Compositing
    // -------------------------------------------------------------------------

    /// Move the cursor `amount` forward and the cross axis by `secondary`.
    pub fn advance(
        &mut self,
        amount: u32,
        secondary: u32,
    ) {
        self.cursor = self.direction.advance(self.cursor, amount);
        self.secondary = self.secondary.saturating_add(secondary);
    }

    /// Draw the rendered part of `src` at this context's cursor.
    ///
    /// Only the first `src.extent()` columns are copied, placed according to
    /// this context's direction. Returns the x the block landed at. The cursor
    /// is left alone: the caller advances it by `src.extent()` when the block
    /// should take up room.
    pub fn composite(
        &mut self,
        src: &LayoutContext<'_>,
    ) -> i32 {
        let extent = src.extent().min(src.width());
        let x = self.direction.place(self.width(), self.cursor, extent);
        let at = Point::new(x, self.secondary as i32);
        self.surface_mut().blit(src.surface(), 0..extent, at);
        x
    }

    // -------------------------------------------------------------------------
    // Painting
    // -------------------------------------------------------------------------

    /// Fill the whole surface with `color`.
    pub fn fill(
        &mut self,
        color: Rgb565,
    ) {
        self.surface_mut().clear(color).ok();
    }

    /// Horizontal band `thickness` pixels tall along the top edge, from `x1` to `x2`.
    pub fn hline(
        &mut self,
        color: Rgb565,
        thickness: u32,
        x1: u32,
        x2: u32,
    ) {
        if x2 <= x1 || thickness == 0 {
            return;
        }
        Rectangle::new(Point::new(x1 as i32, 0), Size::new(x2 - x1, thickness))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(self.surface_mut())
            .ok();
    }

    /// Draw `text` at the cursor in the context font and advance past it.
    ///
    /// Text is top-aligned at the padding. Returns its width in pixels.
    pub fn text(
        &mut self,
        color: Rgb565,
        text: &str,
    ) -> u32 {
        let style = MonoTextStyle::new(self.font, color);
        let start = Point::new(self.cursor as i32, self.padding as i32);
        let end = Text::with_baseline(text, start, style, Baseline::Top)
            .draw(self.surface_mut())
            .unwrap_or(start);

        let width = (end.x - start.x).max(0) as u32;
        self.advance(width, 0);
        width
    }

    /// Advance by the small gap used between parts of one widget.
    pub fn space(&mut self) { self.advance(SMALL_SPACE, 0); }

    /// Stacked column `width` wide, filled top to bottom.
    ///
    /// Returns `width`.
    pub fn vertical_stack(
        &mut self,
        width: u32,
        colors: &[Rgb565],
        percents: &[f32],
    ) -> u32 {
        let (x, y, height) = (self.cursor as i32, self.padding as i32, self.inner_height());
        draw_stack(self.surface_mut(), x, y, width, height, colors, percents);
        self.advance(width, 0);
        width
    }

    /// Sparkline of `hist`, one column per slot.
    ///
    /// Returns the chart width, always `hist.capacity()`.
    ///
    /// # Panics
    /// Panics if `palette` does not have one color per series.
    pub fn histogram(
        &mut self,
        hist: &HistogramBuffer,
        palette: &[Rgb565],
    ) -> u32 {
        let (x, y, height) = (self.cursor as i32, self.padding as i32, self.inner_height());
        draw_histogram(self.surface_mut(), x, y, height, hist, palette);
        let width = hist.capacity() as u32;
        self.advance(width, 0);
        width
    }
}

// =============================================================================
// Root Context
// =============================================================================

/// The bar's persistent surface, the only context state kept across frames.
#[derive(Debug)]
pub struct RootContext {
    surface: Surface,
    frames: u64,
}

impl RootContext {
    pub fn new(size: Size) -> Self {
        Self {
            surface: Surface::new(size),
            frames: 0,
        }
    }

    /// Last completed frame's pixels.
    pub fn surface(&self) -> &Surface { &self.surface }

    /// Number of frames pushed and popped so far.
    pub const fn frames(&self) -> u64 { self.frames }

    /// Start a frame. The root stays borrowed until the frame is popped.
    pub fn push(&mut self) -> RootFrame<'_> {
        let number = self.frames;
        tracing::trace!(frame = number, "root pushed");
        RootFrame { root: self, number }
    }
}

/// One frame's exclusive access to the root surface.
///
/// Dropping the guard pops the frame, as does [`RootFrame::pop`].
#[derive(Debug)]
pub struct RootFrame<'r> {
    root: &'r mut RootContext,
    number: u64,
}

impl RootFrame<'_> {
    /// Sequence number of this frame, starting at 0.
    pub const fn number(&self) -> u64 { self.number }

    /// Fill the whole root surface.
    pub fn clear(
        &mut self,
        color: Rgb565,
    ) {
        self.root.surface.clear(color).ok();
    }

    /// A context drawing straight onto the root surface.
    pub fn context(
        &mut self,
        direction: Direction,
        padding: u32,
        font: &'static MonoFont<'static>,
    ) -> LayoutContext<'_> {
        LayoutContext::on_root(direction, padding, &mut self.root.surface, font)
    }

    pub fn surface(&self) -> &Surface { &self.root.surface }

    /// Finish the frame, returning its number.
    pub fn pop(self) -> u64 { self.number }
}

impl Drop for RootFrame<'_> {
    fn drop(&mut self) {
        self.root.frames = self.number + 1;
        tracing::trace!(frame = self.number, "root popped");
    }
}

// =============================================================================
// Tests
// =============================================================================
