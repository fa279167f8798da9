//! Color constants and hex color parsing for the status bar.
//!
//! # Palette
//!
//! The default palette is Solarized, the same hex values the bar settings use
//! for header lines and chart colors. Constants are built from the 8-bit
//! channels and converted to `Rgb565` at compile time, so they can be used in
//! `const` styles.
//!
//! # Hex Colors
//!
//! Settings carry colors as `rrggbb` or `rrggbbaa` strings. [`HexColor`] keeps
//! the alpha channel around until the color is resolved against the surface it
//! will be drawn on ([`HexColor::over`]), because `Rgb565` has no alpha.

use core::str::FromStr;

use embedded_graphics::pixelcolor::{IntoStorage, Rgb565, Rgb888, RgbColor};

use crate::error::ConfigError;

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black (0, 0, 0).
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31).
pub const WHITE: Rgb565 = Rgb565::WHITE;

// =============================================================================
// Solarized Palette
// =============================================================================

/// Convert 8-bit channels to `Rgb565` by dropping the low bits.
const fn rgb(
    r: u8,
    g: u8,
    b: u8,
) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// Bar background (`1c1c1c`).
pub const BAR_BG: Rgb565 = rgb(0x1c, 0x1c, 0x1c);

/// Widget background (`2d2d2d`).
pub const WIDGET_BG: Rgb565 = rgb(0x2d, 0x2d, 0x2d);

/// Default text color, Solarized base1 (`93a1a1`).
pub const BASE1: Rgb565 = rgb(0x93, 0xa1, 0xa1);

/// Chart background gray (`555555`).
pub const CHART_GRAY: Rgb565 = rgb(0x55, 0x55, 0x55);

/// Solarized yellow (`b58900`). Battery header.
pub const YELLOW: Rgb565 = rgb(0xb5, 0x89, 0x00);

/// Solarized orange (`cb4b16`). Volume header.
pub const ORANGE: Rgb565 = rgb(0xcb, 0x4b, 0x16);

/// Solarized red (`dc322f`). Unplugged battery, active memory.
pub const RED: Rgb565 = rgb(0xdc, 0x32, 0x2f);

/// Solarized magenta (`d33682`). Memory header.
pub const MAGENTA: Rgb565 = rgb(0xd3, 0x36, 0x82);

/// Solarized violet (`6c71c4`). CPU header.
pub const VIOLET: Rgb565 = rgb(0x6c, 0x71, 0xc4);

/// Solarized blue (`268bd2`). Network header.
pub const BLUE: Rgb565 = rgb(0x26, 0x8b, 0xd2);

/// Solarized cyan (`2aa198`).
pub const CYAN: Rgb565 = rgb(0x2a, 0xa1, 0x98);

/// Solarized green (`859900`). Time header, charge level, free memory.
pub const GREEN: Rgb565 = rgb(0x85, 0x99, 0x00);

// =============================================================================
// Hex Color Parsing
// =============================================================================

/// A color parsed from an `rrggbb` / `rrggbbaa` hex string.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HexColor {
    /// Opaque color channels.
    pub rgb: Rgb565,
    /// Alpha, 255 = opaque.
    pub alpha: u8,
}

impl HexColor {
    /// Resolve this color against `background` using its alpha channel.
    pub fn over(
        self,
        background: Rgb565,
    ) -> Rgb565 {
        blend_rgb565(background, self.rgb, self.alpha)
    }
}

impl FromStr for HexColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let bad = || ConfigError::BadColor(s.into());

        if !(hex.len() == 6 || hex.len() == 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        let rgb: Rgb565 = Rgb888::new(channel(0)?, channel(2)?, channel(4)?).into();
        let alpha = if hex.len() == 8 { channel(6)? } else { u8::MAX };

        Ok(Self { rgb, alpha })
    }
}

/// Parse a hex color and resolve it over `background`.
pub fn resolve_color(
    value: &str,
    background: Rgb565,
) -> Result<Rgb565, ConfigError> {
    Ok(value.parse::<HexColor>()?.over(background))
}

/// Blend `fg` over `bg` with an 8-bit alpha, per RGB565 channel.
///
/// Fixed-point: `bg + (fg - bg) * alpha / 255` with integer math only.
pub fn blend_rgb565(
    bg: Rgb565,
    fg: Rgb565,
    alpha: u8,
) -> Rgb565 {
    match alpha {
        0 => return bg,
        u8::MAX => return fg,
        _ => {}
    }

    let bg_raw = bg.into_storage();
    let fg_raw = fg.into_storage();
    let a = i32::from(alpha);

    let mix = |shift: u16, mask: u16| -> u8 {
        let from = i32::from((bg_raw >> shift) & mask);
        let to = i32::from((fg_raw >> shift) & mask);
        (from + (to - from) * a / 255).clamp(0, i32::from(mask)) as u8
    };

    Rgb565::new(mix(11, 0x1F), mix(5, 0x3F), mix(0, 0x1F))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        let c: HexColor = "dc322f".parse().unwrap();
        assert_eq!(c.rgb, Rgb565::from(Rgb888::new(0xdc, 0x32, 0x2f)));
        assert_eq!(c.alpha, 255);
    }

    #[test]
    fn test_parse_rgba_and_hash_prefix() {
        let c: HexColor = "#b58900b2".parse().unwrap();
        assert_eq!(c.rgb, Rgb565::from(Rgb888::new(0xb5, 0x89, 0x00)));
        assert_eq!(c.alpha, 0xb2);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for bad in ["", "fff", "12345", "1234567", "zzzzzz", "123456789", "ééé"] {
            assert!(bad.parse::<HexColor>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend_rgb565(BLACK, WHITE, 0), BLACK);
        assert_eq!(blend_rgb565(BLACK, WHITE, 255), WHITE);
    }

    #[test]
    fn test_blend_midpoint() {
        let mid = blend_rgb565(BLACK, WHITE, 128);
        let raw = mid.into_storage();
        let r = (raw >> 11) & 0x1F;
        let g = (raw >> 5) & 0x3F;
        assert!((15..=16).contains(&r), "red channel should be about half: {r}");
        assert!((31..=32).contains(&g), "green channel should be about half: {g}");
    }

    #[test]
    fn test_resolve_opaque_ignores_background() {
        let expected = Rgb565::from(Rgb888::new(0x85, 0x99, 0x00));
        assert_eq!(resolve_color("859900", WHITE).unwrap(), expected);
    }
}
