//! The widget capability interface.
//!
//! A widget is anything that can say whether it is visible this frame, paint
//! itself into a [`LayoutContext`] at the cursor, and name the color of its
//! header line. The bar knows nothing else about it.
//!
//! `S` is the read-only input every widget sees each frame (for the bar binary,
//! the latest statistics snapshot). Widgets that need nothing use `S = ()`.
//!
//! # Example
//!
//! ```
//! use embar_common::{LayoutContext, Widget, colors};
//! use embedded_graphics::pixelcolor::Rgb565;
//!
//! struct Hello;
//!
//! impl Widget for Hello {
//!     fn name(&self) -> &str { "hello" }
//!     fn header_color(&self) -> Rgb565 { colors::CYAN }
//!     fn draw(&mut self, ctx: &mut LayoutContext<'_>, _: &()) { ctx.text(colors::BASE1, "hi"); }
//! }
//! ```

use embedded_graphics::pixelcolor::Rgb565;

use crate::layout::LayoutContext;

/// A pluggable bar element.
pub trait Widget<S = ()> {
    /// Name used in logs and frame layouts.
    fn name(&self) -> &str;

    /// Whether the widget takes part in this frame. Disabled widgets take no room.
    fn is_enabled(
        &self,
        _state: &S,
    ) -> bool {
        true
    }

    /// Color of the line drawn across the top of the widget.
    fn header_color(&self) -> Rgb565;

    /// Paint at the context cursor, advancing it by everything drawn.
    ///
    /// The context flows left to right and already carries the widget
    /// background. Any history the widget keeps is updated here.
    fn draw(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        state: &S,
    );
}
