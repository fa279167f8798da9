//! Value formatting shared by the widgets.
//!
//! Everything formats into `heapless::String` with `core::fmt::Write`, so
//! drawing a frame does not allocate for text.

use core::fmt::Write;

use heapless::String;

/// Short formatted value. Inputs are clamped so every label fits.
pub type Label = String<16>;

/// Largest magnitude printed in the top unit, `"999999.9G"`.
const MAX_TOP_UNIT: f64 = 999_999.9;

/// Whole percent, `"42%"`.
pub fn percent(pct: f32) -> Label {
    let mut s = Label::new();
    let _ = write!(s, "{:.0}%", pct.clamp(0.0, 100.0));
    s
}

/// Minutes as hours and minutes, `"2h 05m"`.
pub fn duration_minutes(minutes: u32) -> Label {
    let mut s = Label::new();
    let _ = write!(s, "{}h {:02}m", minutes / 60, minutes % 60);
    s
}

/// Megabytes with one unit step, `"512M"` or `"7.4G"`.
pub fn megabytes(mb: f32) -> Label {
    let mut s = Label::new();
    if mb >= 1024.0 {
        let _ = write!(s, "{:.1}G", (f64::from(mb) / 1024.0).min(MAX_TOP_UNIT));
    } else {
        let _ = write!(s, "{:.0}M", mb.max(0.0));
    }
    s
}

/// Transfer rate in binary units, `"512B/s"`, `"1.5K/s"`, `"2.3M/s"`.
pub fn rate(bytes_per_sec: f64) -> Label {
    const UNITS: [&str; 4] = ["B", "K", "M", "G"];

    let mut value = bytes_per_sec.max(0.0);
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let value = value.min(MAX_TOP_UNIT);

    let mut s = Label::new();
    if unit == 0 {
        let _ = write!(s, "{value:.0}{}/s", UNITS[unit]);
    } else {
        let _ = write!(s, "{value:.1}{}/s", UNITS[unit]);
    }
    s
}
