// Crate-level lints: Allow common embedded/graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // f32->u32, f64->f32 for percentages and pixel math
#![allow(clippy::cast_precision_loss)] // u32->f32 in timing averages
#![allow(clippy::cast_possible_wrap)] // u32->i32 for bar geometry
#![allow(clippy::cast_sign_loss)] // f32->u32 where the value is known positive

//! embar: a single-row status bar of composited widget groups.
//!
//! Widgets are registered into three groups, left, centered and right. Every
//! frame each widget draws itself into its own scratch surface and the groups
//! are composited onto the bar, which is then flushed to the display.
//!
//! # Frame Loop
//!
//! ```text
//! ┌───────────────┐   ┌──────────────┐   ┌──────────────┐   ┌─────────┐
//! │ refresh stats │──▶│ render bar   │──▶│ present      │──▶│ sleep   │──┐
//! └───────────────┘   └──────────────┘   └──────────────┘   └─────────┘  │
//!         ▲                                                               │
//!         └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! One frame per second. Headless builds stop after `--frames` frames (one by
//! default) and write a PNG snapshot; `window` builds run until the window is
//! closed.
//!
//! # Logging
//!
//! Logs go to stderr through `tracing`. `RUST_LOG` selects the level, `info`
//! when unset. `debug` adds setup details and a frame timing summary every
//! minute, `trace` adds every widget placement.

mod cli;
mod config;
mod display;
mod error;
mod profiling;
mod stats;
mod widgets;

use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use cli::Cli;
use config::FRAME_TIME;
use display::Display;
use embar_common::settings::Settings;
use embar_common::{Bar, DISPLAY_HEIGHT, DISPLAY_WIDTH, WidgetRegistry};
use embedded_graphics::prelude::*;
use error::Result;
use profiling::FrameMetrics;
use stats::{SimulatedStats, Stats, StatsSource};
use tracing::{error, info, trace};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "embar stopped");
            eprintln!("embar: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// The bar with every default widget registered.
fn build_bar(
    settings: &Settings,
    size: Size,
) -> Result<Bar<Stats>> {
    let mut registry: WidgetRegistry<Stats> = WidgetRegistry::new();
    widgets::register_defaults(&mut registry, settings)?;
    Ok(Bar::new(size, settings.bar_style()?, registry))
}

fn run(cli: &Cli) -> Result<()> {
    // ==========================================================================
    // Setup
    // ==========================================================================

    let settings = cli.settings()?;
    let font = settings.font()?;
    let geometry = settings.geometry(font, Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));

    let mut bar = build_bar(&settings, geometry.size())?;

    let mut display = Display::new(&geometry, &cli.output, cli.scale);
    let mut source = SimulatedStats::default();
    let mut metrics = FrameMetrics::new();
    let frame_limit = cli.frames.or_else(Display::default_frames);

    info!(
        name = %settings.display.wmname,
        x = geometry.x,
        y = geometry.y,
        width = geometry.width,
        height = geometry.height,
        font = %settings.display.font,
        frames = ?frame_limit,
        "bar starting"
    );

    // ==========================================================================
    // Main Loop
    // ==========================================================================

    loop {
        let frame_start = Instant::now();

        let layout = bar.render(source.refresh());
        for group in &layout.groups {
            trace!(
                frame = layout.frame,
                direction = %group.direction,
                anchor_x = group.anchor_x,
                width = group.width,
                widgets = group.widgets.len(),
                "group placed"
            );
        }
        let open = display.present(&bar);
        let render_time = frame_start.elapsed();

        let done = !open || frame_limit.is_some_and(|limit| bar.frames() >= limit);

        // Sleep for the rest of the frame, unless this was the last one
        let pre_sleep = frame_start.elapsed();
        if !done && pre_sleep < FRAME_TIME {
            thread::sleep(FRAME_TIME.saturating_sub(pre_sleep));
        }
        let sleep_time = frame_start.elapsed().checked_sub(pre_sleep).unwrap_or(Duration::ZERO);

        metrics.record_frame(frame_start.elapsed(), render_time, sleep_time);

        if done {
            break;
        }
    }

    info!(
        frames = metrics.total_frames,
        frame_avg_us = metrics.frame_time_avg_us(),
        render_avg_us = metrics.render_time_avg_us(),
        "bar stopped"
    );
    display.finish()
}

// =============================================================================
// Tests
// =============================================================================
