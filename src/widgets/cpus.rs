//! CPU widget: one minute of history and the idle percent for every core.
//!
//! Each core gets its own 5-series histogram (idle, interrupt, sys, nice,
//! user). The buffers are created on the first draw, one per core in that
//! snapshot, and kept for the rest of the run. Cores that appear later have no
//! history and are not drawn.

use embar_common::error::ConfigError;
use embar_common::settings::Settings;
use embar_common::{HISTOGRAM_SLOTS, HistogramBuffer, LayoutContext, Widget};
use embedded_graphics::pixelcolor::Rgb565;
use tracing::{debug, warn};

use super::format;
use crate::stats::{Cpu, Stats};

/// Series per core.
const CPU_STATES: usize = 5;

pub struct CpusWidget {
    header: Rgb565,
    fg: Rgb565,
    /// Idle, interrupt, sys, nice, user.
    palette: [Rgb565; CPU_STATES],
    history: Option<Vec<HistogramBuffer>>,
    mismatch_reported: bool,
}

impl CpusWidget {
    /// # Errors
    /// [`ConfigError::BadColor`] for any unparsable color.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let c = &settings.cpus;
        Ok(Self {
            header: settings.widget_color(&c.hdcolor)?,
            fg: settings.foreground()?,
            palette: [
                settings.widget_color(&c.chart_color_idle)?,
                settings.widget_color(&c.chart_color_interrupt)?,
                settings.widget_color(&c.chart_color_sys)?,
                settings.widget_color(&c.chart_color_nice)?,
                settings.widget_color(&c.chart_color_user)?,
            ],
            history: None,
            mismatch_reported: false,
        })
    }

    /// Per-core history, empty until the first draw.
    #[cfg(test)]
    pub fn history(&self) -> &[HistogramBuffer] { self.history.as_deref().unwrap_or_default() }

    fn ensure_history(
        &mut self,
        cores: usize,
    ) {
        let history = self.history.get_or_insert_with(|| {
            debug!(cores, "cpu history created");
            (0..cores).map(|_| HistogramBuffer::new(HISTOGRAM_SLOTS, CPU_STATES)).collect()
        });
        if history.len() != cores && !self.mismatch_reported {
            warn!(tracked = history.len(), now = cores, "core count changed, drawing tracked cores only");
            self.mismatch_reported = true;
        }
    }
}

/// Idle share of one core, `"90%"`.
fn core_label(cpu: &Cpu) -> format::Label { format::percent(cpu.idle) }

impl Widget<Stats> for CpusWidget {
    fn name(&self) -> &str { "cpus" }

    fn header_color(&self) -> Rgb565 { self.header }

    fn draw(
        &mut self,
        ctx: &mut LayoutContext<'_>,
        stats: &Stats,
    ) {
        self.ensure_history(stats.cpus.len());

        ctx.text(self.fg, "CPUS:");
        for (cpu, history) in stats.cpus.iter().zip(self.history.iter_mut().flatten()) {
            history.update(&cpu.series());
            ctx.space();
            ctx.histogram(history, &self.palette);
            ctx.space();
            ctx.text(self.fg, &core_label(cpu));
        }
    }
}
