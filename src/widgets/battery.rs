//! Battery widget: power source, charge stack, percent and time remaining.
//!
//! Shows `AC:` in the foreground color when plugged in and `BAT:` in the
//! unplugged color otherwise. The charge stack is drawn with the charge at the
//! bottom. Hidden when the machine has no battery.

use embar_common::error::ConfigError;
use embar_common::settings::Settings;
use embar_common::{LayoutContext, Widget};
use embedded_graphics::pixelcolor::Rgb565;

use super::format;
use crate::stats::Stats;

pub struct BatteryWidget {
    header: Rgb565,
    fg: Rgb565,
    fg_unplugged: Rgb565,
    chart_width: u32,
    /// Drained part on top, charge below.
    chart: [Rgb565; 2],
}

impl BatteryWidget {
    /// # Errors
    /// [`ConfigError::BadColor`] for any unparsable color.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let b = &settings.battery;
        Ok(Self {
            header: settings.widget_color(&b.hdcolor)?,
            fg: settings.foreground()?,
            fg_unplugged: settings.widget_color(&b.fgcolor_unplugged)?,
            chart_width: b.chart_width,
            chart: [settings.widget_color(&b.chart_bgcolor)?, settings.widget_color(&b.chart_pgcolor)?],
        })
    }
}

impl Widget<Stats> for BatteryWidget {
    fn name(&self) -> &str { "battery" }

    fn is_enabled(
        &self,
        stats: &Stats,
    ) -> bool {
        stats.battery.is_some()
    }

    fn header_color(&self) -> Rgb565 { self.header }

    fn draw(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        stats: &Stats,
    ) {
        let Some(battery) = stats.battery else {
            return;
        };

        if battery.plugged_in {
            ctx.text(self.fg, "AC:");
        } else {
            ctx.text(self.fg_unplugged, "BAT:");
        }
        ctx.space();
        ctx.vertical_stack(self.chart_width, &self.chart, &[100.0 - battery.charge_pct, battery.charge_pct]);
        ctx.space();
        ctx.text(self.fg, &format::percent(battery.charge_pct));

        if let Some(minutes) = battery.minutes_remaining {
            ctx.space();
            ctx.text(self.fg, &format::duration_minutes(minutes));
        }
    }
}
