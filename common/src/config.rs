//! Layout and display configuration constants.
//!
//! Values the bar never changes at runtime live here as `const`. Anything a
//! user can override (geometry, padding, spacing, colors, fonts) lives in
//! [`crate::settings`] and only takes its default from these constants.

// =============================================================================
// Display Configuration
// =============================================================================

/// Width of the virtual screen the bar is placed on.
pub const DISPLAY_WIDTH: u32 = 1280;

/// Height of the virtual screen the bar is placed on.
pub const DISPLAY_HEIGHT: u32 = 720;

// =============================================================================
// Widget Registry
// =============================================================================

/// Default capacity of each alignment group's widget list.
pub const MAX_WIDGETS: usize = 10;

// =============================================================================
// Layout Spacing
// =============================================================================

/// Default inset between the bar edges and its content, in pixels.
pub const DEFAULT_PADDING: u32 = 10;

/// Default gap between two visible widgets of the same group.
pub const DEFAULT_WIDGET_SPACING: u32 = 15;

/// Gap between the parts of a single widget (label, chart, value).
pub const SMALL_SPACE: u32 = 5;

/// Thickness of the header line drawn across the top of each widget.
pub const HEADER_LINE_WIDTH: u32 = 2;

// =============================================================================
// Charts
// =============================================================================

/// Number of time slots (one pixel column each) in a widget histogram.
pub const HISTOGRAM_SLOTS: usize = 60;

/// Default width of the battery/volume vertical stack chart.
pub const DEFAULT_CHART_WIDTH: u32 = 7;

/// Upper bound accepted for `*.chart_width` settings.
pub const MAX_CHART_WIDTH: u32 = 64;
