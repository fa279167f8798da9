//! Volume widget. One stack and percent when both channels match, the two
//! percents side by side when they differ. Hidden without a mixer.

use embar_common::error::ConfigError;
use embar_common::settings::Settings;
use embar_common::{LayoutContext, Widget};
use embedded_graphics::pixelcolor::Rgb565;

use super::format;
use crate::stats::Stats;

pub struct VolumeWidget {
    header: Rgb565,
    fg: Rgb565,
    chart_width: u32,
    chart: [Rgb565; 2],
}

impl VolumeWidget {
    /// # Errors
    /// [`ConfigError::BadColor`] for any unparsable color.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let v = &settings.volume;
        Ok(Self {
            header: settings.widget_color(&v.hdcolor)?,
            fg: settings.foreground()?,
            chart_width: v.chart_width,
            chart: [settings.widget_color(&v.chart_bgcolor)?, settings.widget_color(&v.chart_pgcolor)?],
        })
    }
}

impl Widget<Stats> for VolumeWidget {
    fn name(&self) -> &str { "volume" }

    fn is_enabled(
        &self,
        stats: &Stats,
    ) -> bool {
        stats.volume.is_some()
    }

    fn header_color(&self) -> Rgb565 { self.header }

    fn draw(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        stats: &Stats,
    ) {
        let Some(volume) = stats.volume else {
            return;
        };

        ctx.text(self.fg, "VOLUME:");
        ctx.space();
        if volume.left_pct == volume.right_pct {
            ctx.vertical_stack(self.chart_width, &self.chart, &[100.0 - volume.left_pct, volume.left_pct]);
            ctx.space();
            ctx.text(self.fg, &format::percent(volume.left_pct));
        } else {
            ctx.text(self.fg, &format::percent(volume.left_pct));
            ctx.space();
            ctx.text(self.fg, &format::percent(volume.right_pct));
        }
    }
}
