//! Application configuration constants.
//!
//! Layout constants shared with the core live in `embar_common::config`.
//! These are the ones only the binary cares about: pacing, output and the
//! simulated statistics source.

use std::time::Duration;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Target frame time. The main loop sleeps for whatever is left of it.
pub const FRAME_TIME: Duration = Duration::from_secs(1);

/// Frames rendered in headless mode when `--frames` is not given.
pub const HEADLESS_DEFAULT_FRAMES: u64 = 1;

/// Frames between two profiling summaries.
pub const PROFILE_INTERVAL: u64 = 60;

// =============================================================================
// Display Output
// =============================================================================

/// PNG snapshot path used when `--output` is not given.
pub const DEFAULT_OUTPUT: &str = "embar.png";

/// Default simulator pixel scale.
pub const DEFAULT_SCALE: u32 = 1;

/// Window title in `window` mode.
pub const WINDOW_TITLE: &str = "embar";

// =============================================================================
// Simulated Statistics
// =============================================================================

/// Number of CPU cores the simulated source reports.
pub const SIM_CPU_CORES: usize = 4;

/// Simulated physical memory, in megabytes.
pub const SIM_MEMORY_TOTAL_MB: f32 = 16_384.0;

/// Signal time advanced per statistics refresh.
pub const SIM_TIME_STEP: f32 = 1.0;
