//! Bar settings and `<widget>.<property>=<value>` overrides.
//!
//! # Key Table
//!
//! Every overridable setting is one row of [`KEYS`]: a lowercase dotted key
//! and a typed field descriptor pointing at the field it writes. Applying an
//! override is a single lookup in that table, matched exactly but ignoring
//! ASCII case (`Battery.HDColor` is `battery.hdcolor`, `battery.hd` is
//! nothing).
//!
//! Colors stay strings here. They are parsed when widgets are built, against
//! the background they will be drawn on, so a bad color fails startup there.
//!
//! # Geometry
//!
//! Bar position and size use `-1` for "derive it":
//!
//! | Field | `-1` means |
//! |-------|------------|
//! | `y`   | bottom of the display |
//! | `w`   | full display width |
//! | `h`   | font height + 2 × `padding_top` |

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::colors::{BLACK, resolve_color};
use crate::compositor::BarStyle;
use crate::config::{DEFAULT_CHART_WIDTH, DEFAULT_PADDING, DEFAULT_WIDGET_SPACING, MAX_CHART_WIDTH};
use crate::error::ConfigError;
use crate::styles::{DEFAULT_FONT_NAME, font_by_name};

// =============================================================================
// Settings Groups
// =============================================================================

/// Bar placement, spacing and base colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplaySettings {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub padding_top: u32,
    pub widget_spacing: u32,
    pub wmname: String,
    pub font: String,
    pub bgcolor: String,
    pub fgcolor: String,
    pub widget_bgcolor: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatterySettings {
    pub hdcolor: String,
    pub fgcolor_unplugged: String,
    pub chart_width: u32,
    pub chart_bgcolor: String,
    pub chart_pgcolor: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolumeSettings {
    pub hdcolor: String,
    pub chart_width: u32,
    pub chart_bgcolor: String,
    pub chart_pgcolor: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NprocsSettings {
    pub hdcolor: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemorySettings {
    pub hdcolor: String,
    pub chart_color_free: String,
    pub chart_color_total: String,
    pub chart_color_active: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpusSettings {
    pub hdcolor: String,
    pub chart_color_idle: String,
    pub chart_color_user: String,
    pub chart_color_sys: String,
    pub chart_color_nice: String,
    pub chart_color_interrupt: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkSettings {
    pub hdcolor: String,
    pub inbound_chart_color_bgcolor: String,
    pub inbound_chart_color_pgcolor: String,
    pub outbound_chart_color_bgcolor: String,
    pub outbound_chart_color_pgcolor: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeSettings {
    pub hdcolor: String,
    pub format: String,
}

/// Every configurable value of the bar and its widgets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub display: DisplaySettings,
    pub battery: BatterySettings,
    pub volume: VolumeSettings,
    pub nprocs: NprocsSettings,
    pub memory: MemorySettings,
    pub cpus: CpusSettings,
    pub network: NetworkSettings,
    pub time: TimeSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display: DisplaySettings {
                x: 0,
                y: -1,
                w: -1,
                h: -1,
                padding_top: DEFAULT_PADDING,
                widget_spacing: DEFAULT_WIDGET_SPACING,
                wmname: "embar".into(),
                font: DEFAULT_FONT_NAME.into(),
                bgcolor: "1c1c1cdd".into(),
                fgcolor: "93a1a1".into(),
                widget_bgcolor: "2d2d2d".into(),
            },
            battery: BatterySettings {
                hdcolor: "b58900".into(),
                fgcolor_unplugged: "dc322f".into(),
                chart_width: DEFAULT_CHART_WIDTH,
                chart_bgcolor: "dc322f".into(),
                chart_pgcolor: "859900".into(),
            },
            volume: VolumeSettings {
                hdcolor: "cb4b16".into(),
                chart_width: DEFAULT_CHART_WIDTH,
                chart_bgcolor: "dc322f".into(),
                chart_pgcolor: "859900".into(),
            },
            nprocs: NprocsSettings { hdcolor: "dc322f".into() },
            memory: MemorySettings {
                hdcolor: "d33682".into(),
                chart_color_free: "859900".into(),
                chart_color_total: "bbbb00".into(),
                chart_color_active: "dc322f".into(),
            },
            cpus: CpusSettings {
                hdcolor: "6c71c4".into(),
                chart_color_idle: "859900".into(),
                chart_color_user: "0000ff".into(),
                chart_color_sys: "ff0000".into(),
                chart_color_nice: "ff00ff".into(),
                chart_color_interrupt: "ffff00".into(),
            },
            network: NetworkSettings {
                hdcolor: "268bd2".into(),
                inbound_chart_color_bgcolor: "859900".into(),
                inbound_chart_color_pgcolor: "157ad2".into(),
                outbound_chart_color_bgcolor: "859900".into(),
                outbound_chart_color_pgcolor: "dc322f".into(),
            },
            time: TimeSettings {
                hdcolor: "859900".into(),
                format: "%a %d %b %Y  %I:%M:%S %p".into(),
            },
        }
    }
}

// =============================================================================
// Key Table
// =============================================================================

/// How a key reads its value and which field it writes.
#[derive(Clone, Copy)]
pub enum Field {
    /// Free-form string (colors, names, formats).
    Str(fn(&mut Settings) -> &mut String),
    /// Integer within `min..=max`.
    Int {
        field: fn(&mut Settings) -> &mut u32,
        min: u32,
        max: u32,
    },
}

/// Every key accepted by [`Settings::apply_override`].
pub const KEYS: &[(&str, Field)] = &[
    // display
    ("display.wmname", Field::Str(|s| &mut s.display.wmname)),
    ("display.font", Field::Str(|s| &mut s.display.font)),
    ("display.bgcolor", Field::Str(|s| &mut s.display.bgcolor)),
    ("display.fgcolor", Field::Str(|s| &mut s.display.fgcolor)),
    ("display.widget_bgcolor", Field::Str(|s| &mut s.display.widget_bgcolor)),
    // battery
    ("battery.hdcolor", Field::Str(|s| &mut s.battery.hdcolor)),
    ("battery.fgcolor_unplugged", Field::Str(|s| &mut s.battery.fgcolor_unplugged)),
    ("battery.chart_width", Field::Int { field: |s| &mut s.battery.chart_width, min: 1, max: MAX_CHART_WIDTH }),
    ("battery.chart_bgcolor", Field::Str(|s| &mut s.battery.chart_bgcolor)),
    ("battery.chart_pgcolor", Field::Str(|s| &mut s.battery.chart_pgcolor)),
    // volume
    ("volume.hdcolor", Field::Str(|s| &mut s.volume.hdcolor)),
    ("volume.chart_width", Field::Int { field: |s| &mut s.volume.chart_width, min: 1, max: MAX_CHART_WIDTH }),
    ("volume.chart_bgcolor", Field::Str(|s| &mut s.volume.chart_bgcolor)),
    ("volume.chart_pgcolor", Field::Str(|s| &mut s.volume.chart_pgcolor)),
    // nprocs
    ("nprocs.hdcolor", Field::Str(|s| &mut s.nprocs.hdcolor)),
    // memory
    ("memory.hdcolor", Field::Str(|s| &mut s.memory.hdcolor)),
    ("memory.chart_color_free", Field::Str(|s| &mut s.memory.chart_color_free)),
    ("memory.chart_color_total", Field::Str(|s| &mut s.memory.chart_color_total)),
    ("memory.chart_color_active", Field::Str(|s| &mut s.memory.chart_color_active)),
    // cpus
    ("cpus.hdcolor", Field::Str(|s| &mut s.cpus.hdcolor)),
    ("cpus.chart_color_idle", Field::Str(|s| &mut s.cpus.chart_color_idle)),
    ("cpus.chart_color_user", Field::Str(|s| &mut s.cpus.chart_color_user)),
    ("cpus.chart_color_sys", Field::Str(|s| &mut s.cpus.chart_color_sys)),
    ("cpus.chart_color_nice", Field::Str(|s| &mut s.cpus.chart_color_nice)),
    ("cpus.chart_color_interrupt", Field::Str(|s| &mut s.cpus.chart_color_interrupt)),
    // network
    ("network.hdcolor", Field::Str(|s| &mut s.network.hdcolor)),
    ("network.inbound_chart_color_bgcolor", Field::Str(|s| &mut s.network.inbound_chart_color_bgcolor)),
    ("network.inbound_chart_color_pgcolor", Field::Str(|s| &mut s.network.inbound_chart_color_pgcolor)),
    ("network.outbound_chart_color_bgcolor", Field::Str(|s| &mut s.network.outbound_chart_color_bgcolor)),
    ("network.outbound_chart_color_pgcolor", Field::Str(|s| &mut s.network.outbound_chart_color_pgcolor)),
    // time
    ("time.hdcolor", Field::Str(|s| &mut s.time.hdcolor)),
    ("time.format", Field::Str(|s| &mut s.time.format)),
];

/// Find the table row for `key`, ignoring ASCII case.
pub fn lookup(key: &str) -> Option<(&'static str, Field)> {
    KEYS.iter().find(|(name, _)| name.eq_ignore_ascii_case(key)).copied()
}

// =============================================================================
// Geometry
// =============================================================================

/// Resolved position and size of the bar on the display.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BarGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BarGeometry {
    #[inline]
    pub const fn origin(&self) -> Point { Point::new(self.x, self.y) }

    #[inline]
    pub const fn size(&self) -> Size { Size::new(self.width, self.height) }
}

// =============================================================================
// Settings Operations
// =============================================================================

impl Settings {
    /// Apply one `<widget>.<property>=<value>` override.
    ///
    /// # Errors
    /// - [`ConfigError::MalformedKeyValue`] without `=`, or without a
    ///   `<widget>.<property>` key
    /// - [`ConfigError::UnknownKey`] for keys not in [`KEYS`]
    /// - [`ConfigError::BadValue`] for integers that don't parse or are out of range
    pub fn apply_override(
        &mut self,
        keyvalue: &str,
    ) -> Result<(), ConfigError> {
        let malformed = || ConfigError::MalformedKeyValue(keyvalue.into());

        let (key, value) = keyvalue.split_once('=').ok_or_else(malformed)?;
        let (widget, property) = key.split_once('.').ok_or_else(malformed)?;
        if widget.is_empty() || property.is_empty() {
            return Err(malformed());
        }

        let (name, field) = lookup(key).ok_or_else(|| ConfigError::UnknownKey(key.into()))?;
        match field {
            Field::Str(field) => *field(self) = value.into(),
            Field::Int { field, min, max } => *field(self) = parse_bounded(name, value, min, max)?,
        }

        tracing::debug!(key = name, value, "setting override applied");
        Ok(())
    }

    /// Apply overrides in order, stopping at the first bad one.
    pub fn apply_overrides<'a>(
        &mut self,
        overrides: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ConfigError> {
        overrides.into_iter().try_for_each(|kv| self.apply_override(kv))
    }

    /// The configured font.
    pub fn font(&self) -> Result<&'static MonoFont<'static>, ConfigError> { font_by_name(&self.display.font) }

    /// Resolve `-1` geometry fields against `font` and the display size.
    pub fn geometry(
        &self,
        font: &MonoFont<'_>,
        display: Size,
    ) -> BarGeometry {
        let d = &self.display;
        let height = match u32::try_from(d.h) {
            Ok(h) => h,
            Err(_) => font.character_size.height + 2 * d.padding_top,
        };
        let width = u32::try_from(d.w).unwrap_or(display.width);
        let y = if d.y < 0 { display.height as i32 - height as i32 } else { d.y };

        BarGeometry { x: d.x, y, width, height }
    }

    /// Background color of the bar itself (over black).
    pub fn bar_background(&self) -> Result<Rgb565, ConfigError> { resolve_color(&self.display.bgcolor, BLACK) }

    /// Background painted under every widget (over the bar background).
    pub fn widget_background(&self) -> Result<Rgb565, ConfigError> {
        resolve_color(&self.display.widget_bgcolor, self.bar_background()?)
    }

    /// Default text color (over the widget background).
    pub fn foreground(&self) -> Result<Rgb565, ConfigError> {
        resolve_color(&self.display.fgcolor, self.widget_background()?)
    }

    /// Resolve a widget color string over the widget background.
    pub fn widget_color(
        &self,
        value: &str,
    ) -> Result<Rgb565, ConfigError> {
        resolve_color(value, self.widget_background()?)
    }

    /// Compositor style: colors, spacing, padding and font.
    pub fn bar_style(&self) -> Result<BarStyle, ConfigError> {
        Ok(BarStyle {
            background: self.bar_background()?,
            widget_background: self.widget_background()?,
            padding: self.display.padding_top,
            spacing: self.display.widget_spacing,
            font: self.font()?,
            ..BarStyle::default()
        })
    }
}

fn parse_bounded(
    key: &str,
    value: &str,
    min: u32,
    max: u32,
) -> Result<u32, ConfigError> {
    let bad = |reason: String| ConfigError::BadValue {
        key: key.into(),
        value: value.into(),
        reason,
    };

    let n: i64 = value.trim().parse().map_err(|_| bad("not an integer".into()))?;
    if n < i64::from(min) || n > i64::from(max) {
        return Err(bad(format!("must be between {min} and {max}")));
    }
    Ok(n as u32)
}

// =============================================================================
// Tests
// =============================================================================
