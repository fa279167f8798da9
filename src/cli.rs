//! Command-line interface.
//!
//! Flags follow the classic bar options: single letters for geometry and
//! styling, `-S key=value` for everything in the settings table. Because `-h`
//! sets the bar height, help is only available as `--help`.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use embar_common::error::ConfigError;
use embar_common::settings::Settings;

use crate::config::{DEFAULT_OUTPUT, DEFAULT_SCALE};

#[derive(Parser, Debug)]
#[command(name = "embar", version)]
#[command(about = "Single-row status bar of composited widget groups")]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Bar x position
    #[arg(short = 'x', value_name = "N", value_parser = clap::value_parser!(i32).range(0..))]
    pub x: Option<i32>,

    /// Bar y position (-1 = bottom of the display)
    #[arg(short = 'y', value_name = "N", allow_negative_numbers = true, value_parser = clap::value_parser!(i32).range(-1..))]
    pub y: Option<i32>,

    /// Bar width (-1 = display width)
    #[arg(short = 'w', value_name = "N", allow_negative_numbers = true, value_parser = clap::value_parser!(i32).range(-1..))]
    pub w: Option<i32>,

    /// Bar height (-1 = font height + 2 x padding)
    #[arg(short = 'h', value_name = "N", allow_negative_numbers = true, value_parser = clap::value_parser!(i32).range(-1..))]
    pub h: Option<i32>,

    /// Top padding, also the inset around widget content
    #[arg(short = 'p', value_name = "N", value_parser = clap::value_parser!(u32).range(0..=i32::MAX as i64))]
    pub padding: Option<u32>,

    /// Gap between widgets of a group
    #[arg(short = 's', value_name = "N", value_parser = clap::value_parser!(u32).range(0..=i32::MAX as i64))]
    pub spacing: Option<u32>,

    /// Font name (profont-7 .. profont-24, 6x10, 6x13, 7x13, 8x13, 9x15, 10x20)
    #[arg(short = 'f', value_name = "NAME")]
    pub font: Option<String>,

    /// Clock format (strftime)
    #[arg(short = 't', value_name = "FMT")]
    pub time_format: Option<String>,

    /// Settings override, e.g. -S cpus.hdcolor=ff0000 (repeatable)
    #[arg(short = 'S', value_name = "KEY=VALUE", action = ArgAction::Append)]
    pub overrides: Vec<String>,

    /// Stop after this many frames (headless default: 1)
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// PNG snapshot written after the last frame
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Simulator pixel scale
    #[arg(long, value_name = "N", default_value_t = DEFAULT_SCALE, value_parser = clap::value_parser!(u32).range(1..=8))]
    pub scale: u32,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

impl Cli {
    /// Build settings: defaults, then `-S` overrides in order, then the direct flags.
    ///
    /// # Errors
    /// The first override that is malformed, unknown or out of range.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = Settings::default();
        settings.apply_overrides(self.overrides.iter().map(String::as_str))?;

        let display = &mut settings.display;
        if let Some(x) = self.x {
            display.x = x;
        }
        if let Some(y) = self.y {
            display.y = y;
        }
        if let Some(w) = self.w {
            display.w = w;
        }
        if let Some(h) = self.h {
            display.h = h;
        }
        if let Some(padding) = self.padding {
            display.padding_top = padding;
        }
        if let Some(spacing) = self.spacing {
            display.widget_spacing = spacing;
        }
        if let Some(font) = &self.font {
            display.font.clone_from(font);
        }
        if let Some(format) = &self.time_format {
            settings.time.format.clone_from(format);
        }

        Ok(settings)
    }
}

// =============================================================================
// Tests
// =============================================================================
