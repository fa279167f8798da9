//! The bar's widgets.
//!
//! - [`battery`]: power source, charge stack and time remaining
//! - [`volume`]: mixer levels
//! - [`nprocs`]: process count
//! - [`memory`]: memory history and sizes
//! - [`cpus`]: per-core history and idle percent
//! - [`network`]: throughput history and rates
//! - [`time`]: the clock
//!
//! Every widget is built once from [`Settings`], resolving its colors up front
//! so a bad color stops the bar before the first frame. After that a widget
//! only reads the [`Stats`] snapshot it is handed each frame, plus whatever
//! history it owns.
//!
//! # Default Layout
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────────┐
//! │ battery volume nprocs memory cpus        time            network       │
//! │ └──────── left group ──────────┘   └ centered ┘      └ right group ┘   │
//! └────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod battery;
pub mod cpus;
pub mod format;
pub mod memory;
pub mod network;
pub mod nprocs;
pub mod time;
pub mod volume;

use embar_common::error::ConfigError;
use embar_common::settings::Settings;
use embar_common::{Direction, WidgetRegistry};

pub use battery::BatteryWidget;
pub use cpus::CpusWidget;
pub use memory::MemoryWidget;
pub use network::NetworkWidget;
pub use nprocs::NprocsWidget;
pub use time::TimeWidget;
pub use volume::VolumeWidget;

use crate::stats::Stats;

/// Build every widget from `settings` and register it in its default group.
///
/// # Errors
/// The first widget whose settings do not resolve, or a full group.
pub fn register_defaults<const N: usize>(
    registry: &mut WidgetRegistry<Stats, N>,
    settings: &Settings,
) -> Result<(), ConfigError> {
    use Direction::{Centered, LeftToRight, RightToLeft};

    registry.register(LeftToRight, Box::new(BatteryWidget::from_settings(settings)?))?;
    registry.register(LeftToRight, Box::new(VolumeWidget::from_settings(settings)?))?;
    registry.register(LeftToRight, Box::new(NprocsWidget::from_settings(settings)?))?;
    registry.register(LeftToRight, Box::new(MemoryWidget::from_settings(settings)?))?;
    registry.register(LeftToRight, Box::new(CpusWidget::from_settings(settings)?))?;
    registry.register(Centered, Box::new(TimeWidget::from_settings(settings)?))?;
    registry.register(RightToLeft, Box::new(NetworkWidget::from_settings(settings)?))?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use embar_common::{Direction, LayoutContext};
    use embedded_graphics::mono_font::ascii::FONT_6X10;
    use embedded_graphics::prelude::*;

    /// Padding of [`context`].
    pub const PAD: u32 = 2;

    /// Roomy left-to-right scratch context with a 6px wide font.
    pub fn context() -> LayoutContext<'static> {
        LayoutContext::scratch(Direction::LeftToRight, PAD, Size::new(600, 20), &FONT_6X10)
    }
}

// =============================================================================
// Tests
// =============================================================================
