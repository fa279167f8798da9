//! Chart drawing shared by the bar's widgets.
//!
//! All primitives are generic over `DrawTarget<Color = Rgb565>`, so they draw
//! onto a [`crate::surface::Surface`] or straight onto a display.

mod primitives;

pub use primitives::{MAX_STACK_SEGMENTS, draw_histogram, draw_stack, stack_segments};
