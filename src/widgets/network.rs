//! Network widget: inbound and outbound throughput history and current rates.
//!
//! Each direction keeps a 2-series histogram, the idle share on top and the
//! rate below, as a percentage of the highest rate seen in that direction so
//! far. Older samples keep the scale they were taken at.

use embar_common::error::ConfigError;
use embar_common::settings::Settings;
use embar_common::{HISTOGRAM_SLOTS, HistogramBuffer, LayoutContext, Widget};
use embedded_graphics::pixelcolor::Rgb565;

use super::format;
use crate::stats::Stats;

/// History and scale for one traffic direction.
struct Traffic {
    label: &'static str,
    palette: [Rgb565; 2],
    peak: f64,
    history: HistogramBuffer,
}

impl Traffic {
    fn new(
        label: &'static str,
        palette: [Rgb565; 2],
    ) -> Self {
        Self {
            label,
            palette,
            peak: 0.0,
            history: HistogramBuffer::new(HISTOGRAM_SLOTS, 2),
        }
    }

    /// Record `rate` and return its share of the peak.
    fn record(
        &mut self,
        rate: f64,
    ) -> f32 {
        let rate = if rate.is_finite() { rate.max(0.0) } else { 0.0 };
        self.peak = self.peak.max(rate);
        let pct = if self.peak > 0.0 { (rate / self.peak * 100.0) as f32 } else { 0.0 };
        self.history.update(&[100.0 - pct, pct]);
        pct
    }
}

pub struct NetworkWidget {
    header: Rgb565,
    fg: Rgb565,
    inbound: Traffic,
    outbound: Traffic,
}

impl NetworkWidget {
    /// # Errors
    /// [`ConfigError::BadColor`] for any unparsable color.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let n = &settings.network;
        Ok(Self {
            header: settings.widget_color(&n.hdcolor)?,
            fg: settings.foreground()?,
            inbound: Traffic::new(
                "IN:",
                [
                    settings.widget_color(&n.inbound_chart_color_bgcolor)?,
                    settings.widget_color(&n.inbound_chart_color_pgcolor)?,
                ],
            ),
            outbound: Traffic::new(
                "OUT:",
                [
                    settings.widget_color(&n.outbound_chart_color_bgcolor)?,
                    settings.widget_color(&n.outbound_chart_color_pgcolor)?,
                ],
            ),
        })
    }

    /// Highest inbound and outbound rates seen, in bytes per second.
    #[cfg(test)]
    pub const fn peaks(&self) -> (f64, f64) { (self.inbound.peak, self.outbound.peak) }
}

impl Widget<Stats> for NetworkWidget {
    fn name(&self) -> &str { "network" }

    fn header_color(&self) -> Rgb565 { self.header }

    fn draw(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        stats: &Stats,
    ) {
        let rates = [stats.network.inbound, stats.network.outbound];

        for (i, (traffic, rate)) in [&mut self.inbound, &mut self.outbound].into_iter().zip(rates).enumerate() {
            if i > 0 {
                ctx.space();
            }
            traffic.record(rate);
            ctx.text(self.fg, traffic.label);
            ctx.space();
            ctx.histogram(&traffic.history, &traffic.palette);
            ctx.space();
            ctx.text(self.fg, &format::rate(rate));
        }
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::*;

    use super::*;
    use crate::stats::Network;
    use crate::widgets::testing::context;

    fn stats(
        inbound: f64,
        outbound: f64,
    ) -> Stats {
        Stats {
            network: Network { inbound, outbound },
            ..Stats::default()
        }
    }

    #[test]
    fn test_traffic_scales_to_peak() {
        let mut t = Traffic::new("IN:", [Rgb565::BLACK; 2]);
        assert_eq!(t.record(0.0), 0.0, "no traffic yet means an empty column");
        assert_eq!(t.record(2000.0), 100.0);
        assert_eq!(t.record(500.0), 25.0);
        assert_eq!(t.record(f64::NAN), 0.0);
        assert_eq!(t.peak, 2000.0);

        let newest = t.history.iter().last().unwrap();
        assert_eq!(newest, &[100.0, 0.0]);
    }

    #[test]
    fn test_peaks_tracked_per_direction() {
        let mut w = NetworkWidget::from_settings(&Settings::default()).unwrap();
        w.draw(&mut context(), &stats(4096.0, 100.0));
        w.draw(&mut context(), &stats(1024.0, 300.0));
        assert_eq!(w.peaks(), (4096.0, 300.0));
    }

    #[test]
    fn test_layout_width() {
        let mut w = NetworkWidget::from_settings(&Settings::default()).unwrap();
        let mut ctx = context();
        w.draw(&mut ctx, &stats(1536.0, 512.0));
        // "IN:" sp chart sp "1.5K/s" + sp + "OUT:" sp chart sp "512B/s"
        let inbound = 18 + 5 + 60 + 5 + 36;
        let outbound = 24 + 5 + 60 + 5 + 36;
        assert_eq!(ctx.content_width(), inbound + 5 + outbound);
    }
}
