//! Clock widget: the local time in a configurable strftime format.

use core::fmt::{self, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use embar_common::error::ConfigError;
use embar_common::settings::Settings;
use embar_common::{LayoutContext, Widget};
use embedded_graphics::pixelcolor::Rgb565;

use crate::stats::Stats;

/// Longest clock text drawn. Longer output is cut short.
pub const TIME_MAXLEN: usize = 100;

pub struct TimeWidget {
    format: String,
    header: Rgb565,
    fg: Rgb565,
}

impl TimeWidget {
    /// # Errors
    /// [`ConfigError::BadTimeFormat`] for a format chrono cannot parse, or a
    /// bad color.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let format = settings.time.format.clone();
        validate_format(&format)?;
        Ok(Self {
            format,
            header: settings.widget_color(&settings.time.hdcolor)?,
            fg: settings.foreground()?,
        })
    }

    /// Clock text for `at`.
    pub fn label<Tz>(
        &self,
        at: &DateTime<Tz>,
    ) -> heapless::String<TIME_MAXLEN>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut s = heapless::String::new();
        let _ = write!(Truncate(&mut s), "{}", at.format(&self.format));
        s
    }
}

/// Keeps every character that fits and drops the rest.
struct Truncate<'a, const N: usize>(&'a mut heapless::String<N>);

impl<const N: usize> Write for Truncate<'_, N> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Reject formats containing specifiers chrono does not know.
pub fn validate_format(format: &str) -> Result<(), ConfigError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::BadTimeFormat(format.into()));
    }
    Ok(())
}

impl Widget<Stats> for TimeWidget {
    fn name(&self) -> &str { "time" }

    fn header_color(&self) -> Rgb565 { self.header }

    fn draw(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        _stats: &Stats,
    ) {
        let text = self.label(&Local::now());
        ctx.text(self.fg, &text);
    }
}
