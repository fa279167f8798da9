//! Process count widget.

use core::fmt::Write;

use embar_common::error::ConfigError;
use embar_common::settings::Settings;
use embar_common::{LayoutContext, Widget};
use embedded_graphics::pixelcolor::Rgb565;

use super::format::Label;
use crate::stats::Stats;

pub struct NprocsWidget {
    header: Rgb565,
    fg: Rgb565,
}

impl NprocsWidget {
    /// # Errors
    /// [`ConfigError::BadColor`] for an unparsable color.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self {
            header: settings.widget_color(&settings.nprocs.hdcolor)?,
            fg: settings.foreground()?,
        })
    }
}

impl Widget<Stats> for NprocsWidget {
    fn name(&self) -> &str { "nprocs" }

    fn header_color(&self) -> Rgb565 { self.header }

    fn draw(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        stats: &Stats,
    ) {
        let mut count = Label::new();
        let _ = write!(count, "{}", stats.nprocs);

        ctx.text(self.fg, "#PROCS:");
        ctx.space();
        ctx.text(self.fg, &count);
    }
}
