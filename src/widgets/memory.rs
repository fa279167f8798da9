//! Memory widget: a minute of history plus active, total and free sizes.
//!
//! The history is a 3-series histogram (free, in use, active) as shares of
//! physical memory. Each size label is drawn in its series color.

use embar_common::error::ConfigError;
use embar_common::settings::Settings;
use embar_common::{HISTOGRAM_SLOTS, HistogramBuffer, LayoutContext, Widget};
use embedded_graphics::pixelcolor::Rgb565;

use super::format;
use crate::stats::Stats;

pub struct MemoryWidget {
    header: Rgb565,
    fg: Rgb565,
    /// Free, total, active.
    palette: [Rgb565; 3],
    history: HistogramBuffer,
}

impl MemoryWidget {
    /// # Errors
    /// [`ConfigError::BadColor`] for any unparsable color.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let m = &settings.memory;
        Ok(Self {
            header: settings.widget_color(&m.hdcolor)?,
            fg: settings.foreground()?,
            palette: [
                settings.widget_color(&m.chart_color_free)?,
                settings.widget_color(&m.chart_color_total)?,
                settings.widget_color(&m.chart_color_active)?,
            ],
            history: HistogramBuffer::new(HISTOGRAM_SLOTS, 3),
        })
    }

    #[cfg(test)]
    pub fn history(&self) -> &HistogramBuffer { &self.history }
}

impl Widget<Stats> for MemoryWidget {
    fn name(&self) -> &str { "memory" }

    fn header_color(&self) -> Rgb565 { self.header }

    fn draw(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        stats: &Stats,
    ) {
        let memory = stats.memory;
        let [free, total, active] = self.palette;
        self.history.update(&memory.percentages());

        ctx.text(self.fg, "MEMORY:");
        ctx.space();
        ctx.histogram(&self.history, &self.palette);

        for (color, mb, label) in [
            (active, memory.active_mb, "active"),
            (total, memory.total_mb, "total"),
            (free, memory.free_mb, "free"),
        ] {
            ctx.space();
            ctx.text(color, &format::megabytes(mb));
            ctx.space();
            ctx.text(self.fg, label);
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::*;

    use super::*;
    use crate::stats::Memory;
    use crate::widgets::testing::{PAD, context};

    fn stats() -> Stats {
        Stats {
            memory: Memory {
                free_mb: 512.0,
                total_mb: 1536.0,
                active_mb: 512.0,
            },
            ..Stats::default()
        }
    }

    #[test]
    fn test_each_draw_adds_one_sample() {
        let mut w = MemoryWidget::from_settings(&Settings::default()).unwrap();
        let stats = stats();
        for _ in 0..3 {
            w.draw(&mut context(), &stats);
        }
        assert_eq!(w.history().samples_written(), 3);
        let newest = w.history().iter().last().unwrap();
        assert_eq!(newest, &[25.0, 50.0, 25.0]);
    }

    #[test]
    fn test_layout_width() {
        let mut w = MemoryWidget::from_settings(&Settings::default()).unwrap();
        let mut ctx = context();
        w.draw(&mut ctx, &stats());
        // "MEMORY:" + space + 60 columns
        //   + space "512M" space "active" + space "1.5G" space "total" + space "512M" space "free"
        let expected = 42 + 5 + 60 + (5 + 24 + 5 + 36) + (5 + 24 + 5 + 30) + (5 + 24 + 5 + 24);
        assert_eq!(ctx.content_width(), expected);
    }

    #[test]
    fn test_newest_column_is_rightmost() {
        let mut w = MemoryWidget::from_settings(&Settings::default()).unwrap();
        let mut ctx = context();
        w.draw(&mut ctx, &stats());

        let chart_x = (PAD + 42 + 5) as i32;
        let bottom = (PAD + ctx.inner_height() - 1) as i32;
        assert_eq!(
            ctx.surface().pixel(Point::new(chart_x + 59, bottom)),
            Some(w.palette[2]),
            "active share sits at the bottom of the newest column"
        );
        assert_eq!(
            ctx.surface().pixel(Point::new(chart_x, bottom)),
            None,
            "unwritten slots leave the oldest column empty"
        );
    }
}
