//! Fonts available to the bar, looked up by name.
//!
//! # Static Font Table
//!
//! Fonts are `'static` data compiled into the binary, so choosing one is just
//! picking a reference out of a `const` table. Every [`crate::LayoutContext`]
//! carries one `&'static MonoFont` and builds its `MonoTextStyle` per call with
//! the color it is given: only the color varies, the font reference is shared.
//!
//! Names are matched case-insensitively.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_6X13, FONT_7X13, FONT_8X13, FONT_9X15, FONT_10X20};
use profont::{
    PROFONT_7_POINT,
    PROFONT_9_POINT,
    PROFONT_10_POINT,
    PROFONT_12_POINT,
    PROFONT_14_POINT,
    PROFONT_18_POINT,
    PROFONT_24_POINT,
};

use crate::error::ConfigError;

// =============================================================================
// Font Table
// =============================================================================

/// Name of the font used when none is configured.
pub const DEFAULT_FONT_NAME: &str = "profont-14";

/// Default bar font (`ProFont` 14pt).
pub const DEFAULT_FONT: &MonoFont<'static> = &PROFONT_14_POINT;

/// Every selectable font, by name.
pub const FONTS: &[(&str, &MonoFont<'static>)] = &[
    ("profont-7", &PROFONT_7_POINT),
    ("profont-9", &PROFONT_9_POINT),
    ("profont-10", &PROFONT_10_POINT),
    ("profont-12", &PROFONT_12_POINT),
    ("profont-14", &PROFONT_14_POINT),
    ("profont-18", &PROFONT_18_POINT),
    ("profont-24", &PROFONT_24_POINT),
    ("6x10", &FONT_6X10),
    ("6x13", &FONT_6X13),
    ("7x13", &FONT_7X13),
    ("8x13", &FONT_8X13),
    ("9x15", &FONT_9X15),
    ("10x20", &FONT_10X20),
];

/// Look up a font by name.
///
/// # Errors
/// [`ConfigError::UnknownFont`] if no font has that name.
pub fn font_by_name(name: &str) -> Result<&'static MonoFont<'static>, ConfigError> {
    FONTS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|&(_, font)| font)
        .ok_or_else(|| ConfigError::UnknownFont(name.into()))
}

/// Comma-separated font names, for help text and diagnostics.
pub fn font_names() -> String { FONTS.iter().map(|(name, _)| *name).collect::<Vec<_>>().join(", ") }

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font_is_in_table() {
        let font = font_by_name(DEFAULT_FONT_NAME).unwrap();
        assert_eq!(font.character_size, DEFAULT_FONT.character_size);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let font = font_by_name("ProFont-24").unwrap();
        assert_eq!(font.character_size, PROFONT_24_POINT.character_size);
        assert_eq!(font_by_name("10X20").unwrap().character_size.height, 20);
    }

    #[test]
    fn test_unknown_font() {
        let Err(err) = font_by_name("comic-sans") else {
            panic!("comic-sans should not resolve");
        };
        assert!(matches!(err, ConfigError::UnknownFont(ref name) if name == "comic-sans"));
    }

    #[test]
    fn test_font_names_lists_all() {
        let names = font_names();
        assert_eq!(names.split(", ").count(), FONTS.len());
        assert!(names.starts_with("profont-7"));
    }
}
