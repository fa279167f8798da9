//! Frame timing metrics.
//!
//! Tracks how long each bar frame took to render and how long the loop slept
//! to hold the one-second cadence. Every [`PROFILE_INTERVAL`] frames a summary
//! goes to the log at `debug` level.
//!
//! # Usage
//!
//! ```ignore
//! let mut metrics = FrameMetrics::new();
//!
//! // In main loop:
//! let frame_start = Instant::now();
//! // ... refresh stats, render, flush ...
//! let render_time = frame_start.elapsed();
//! // ... sleep ...
//! metrics.record_frame(frame_start.elapsed(), render_time, sleep_time);
//! ```

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::PROFILE_INTERVAL;

// =============================================================================
// Frame Metrics
// =============================================================================

/// Per-frame timing plus min/max/average over the whole run.
pub struct FrameMetrics {
    // Frame timing (microseconds for precision)
    /// Total frame time (render + sleep + overhead)
    pub frame_time_us: u32,
    /// Time spent refreshing statistics and compositing the bar
    pub render_time_us: u32,
    /// Time spent sleeping (rate limiting)
    pub sleep_time_us: u32,

    /// Minimum frame time observed
    pub frame_time_min_us: u32,
    /// Maximum frame time observed
    pub frame_time_max_us: u32,
    /// Slowest render observed
    pub render_time_max_us: u32,
    frame_time_avg_us: f32,
    render_time_avg_us: f32,

    /// Total frames rendered since startup
    pub total_frames: u64,

    start_time: Instant,
}

impl FrameMetrics {
    /// Exponential moving average alpha.
    const EMA_ALPHA: f32 = 0.1;

    /// Create new metrics, starting the uptime timer.
    pub fn new() -> Self {
        Self {
            frame_time_us: 0,
            render_time_us: 0,
            sleep_time_us: 0,
            frame_time_min_us: u32::MAX,
            frame_time_max_us: 0,
            render_time_max_us: 0,
            frame_time_avg_us: 0.0,
            render_time_avg_us: 0.0,
            total_frames: 0,
            start_time: Instant::now(),
        }
    }

    /// Record timing for one frame and log a summary every [`PROFILE_INTERVAL`] frames.
    pub fn record_frame(
        &mut self,
        total_time: Duration,
        render_time: Duration,
        sleep_time: Duration,
    ) {
        let total_us = saturating_micros(total_time);
        let render_us = saturating_micros(render_time);

        self.frame_time_us = total_us;
        self.render_time_us = render_us;
        self.sleep_time_us = saturating_micros(sleep_time);

        self.frame_time_min_us = self.frame_time_min_us.min(total_us);
        self.frame_time_max_us = self.frame_time_max_us.max(total_us);
        self.render_time_max_us = self.render_time_max_us.max(render_us);

        if self.total_frames == 0 {
            self.frame_time_avg_us = total_us as f32;
            self.render_time_avg_us = render_us as f32;
        } else {
            self.frame_time_avg_us = ema(self.frame_time_avg_us, total_us);
            self.render_time_avg_us = ema(self.render_time_avg_us, render_us);
        }

        self.total_frames += 1;

        if self.total_frames % PROFILE_INTERVAL == 0 {
            debug!(
                frames = self.total_frames,
                uptime_s = self.uptime().as_secs(),
                last_frame_us = self.frame_time_us,
                last_render_us = self.render_time_us,
                last_sleep_us = self.sleep_time_us,
                frame_avg_us = self.frame_time_avg_us(),
                frame_min_us = self.frame_time_min_us,
                frame_max_us = self.frame_time_max_us,
                render_avg_us = self.render_time_avg_us(),
                render_max_us = self.render_time_max_us,
                "frame timing"
            );
        }
    }

    /// Average frame time in microseconds.
    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 { self.frame_time_avg_us as u32 }

    /// Average render time in microseconds.
    #[inline]
    pub const fn render_time_avg_us(&self) -> u32 { self.render_time_avg_us as u32 }

    /// Time since the metrics were created.
    #[inline]
    pub fn uptime(&self) -> Duration { self.start_time.elapsed() }
}

impl Default for FrameMetrics {
    fn default() -> Self { Self::new() }
}

fn saturating_micros(d: Duration) -> u32 { u32::try_from(d.as_micros()).unwrap_or(u32::MAX) }

fn ema(
    avg: f32,
    sample_us: u32,
) -> f32 {
    FrameMetrics::EMA_ALPHA.mul_add(sample_us as f32, (1.0 - FrameMetrics::EMA_ALPHA) * avg)
}

// =============================================================================
// Tests
// =============================================================================
