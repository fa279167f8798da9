//! Display backends.
//!
//! The bar is flushed into a [`SimulatorDisplay`] standing in for the whole
//! screen, at the bar's configured position. What happens to that screen
//! depends on the build:
//!
//! - Headless (default): nothing per frame. After the last frame the screen is
//!   written as a PNG snapshot.
//! - `window` feature: an SDL window shows every frame until it is closed.

use std::path::{Path, PathBuf};

use embar_common::settings::BarGeometry;
use embar_common::{Bar, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
#[cfg(feature = "window")]
use embedded_graphics_simulator::{SimulatorEvent, Window};
use embedded_graphics_simulator::{OutputSettings, OutputSettingsBuilder, SimulatorDisplay};
use tracing::{debug, info};

#[cfg(feature = "window")]
use crate::config::WINDOW_TITLE;
use crate::config::HEADLESS_DEFAULT_FRAMES;
use crate::error::{Error, Result};

/// The virtual screen plus whatever presents it.
pub struct Display {
    screen: SimulatorDisplay<Rgb565>,
    output_settings: OutputSettings,
    origin: Point,
    output: PathBuf,
    #[cfg(feature = "window")]
    window: Window,
}

impl Display {
    /// Black screen of the standard display size, bar drawn at `geometry`.
    pub fn new(
        geometry: &BarGeometry,
        output: &Path,
        scale: u32,
    ) -> Self {
        let mut screen = SimulatorDisplay::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));
        screen.clear(Rgb565::BLACK).ok();
        let output_settings = OutputSettingsBuilder::new().scale(scale).build();

        debug!(x = geometry.x, y = geometry.y, scale, "display ready");
        Self {
            #[cfg(feature = "window")]
            window: Window::new(WINDOW_TITLE, &output_settings),
            screen,
            output_settings,
            origin: geometry.origin(),
            output: output.to_path_buf(),
        }
    }

    /// Frames to render when the user gives no limit. `None` runs until closed.
    pub const fn default_frames() -> Option<u64> {
        if cfg!(feature = "window") { None } else { Some(HEADLESS_DEFAULT_FRAMES) }
    }

    /// Copy the bar's last frame onto the screen and show it.
    ///
    /// Returns `false` once the user has closed the window.
    pub fn present<S, const N: usize>(
        &mut self,
        bar: &Bar<S, N>,
    ) -> bool {
        bar.flush(&mut self.screen, self.origin).ok();
        self.show()
    }

    #[cfg(feature = "window")]
    fn show(&mut self) -> bool {
        self.window.update(&self.screen);
        !self.window.events().any(|ev| matches!(ev, SimulatorEvent::Quit))
    }

    #[cfg(not(feature = "window"))]
    fn show(&mut self) -> bool { true }

    /// Screen contents, for inspection.
    #[cfg(test)]
    pub fn screen(&self) -> &SimulatorDisplay<Rgb565> { &self.screen }

    /// Write the PNG snapshot in headless builds.
    ///
    /// # Errors
    /// [`Error::Snapshot`] when the image cannot be written.
    pub fn finish(&self) -> Result<()> {
        if cfg!(feature = "window") {
            return Ok(());
        }
        self.snapshot()
    }

    /// Write the screen to the output path as a PNG.
    ///
    /// # Errors
    /// [`Error::Snapshot`] when the image cannot be written.
    pub fn snapshot(&self) -> Result<()> {
        self.screen
            .to_rgb_output_image(&self.output_settings)
            .save_png(&self.output)
            .map_err(|err| Error::Snapshot {
                path: self.output.clone(),
                reason: err.to_string(),
            })?;
        info!(path = %self.output.display(), "snapshot written");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(all(test, not(feature = "window")))]
mod tests {
    use embar_common::{BarStyle, WidgetRegistry};

    use super::*;

    fn geometry() -> BarGeometry {
        BarGeometry {
            x: 0,
            y: DISPLAY_HEIGHT as i32 - 24,
            width: DISPLAY_WIDTH,
            height: 24,
        }
    }

    fn bar() -> Bar<()> {
        let mut bar = Bar::new(geometry().size(), BarStyle::default(), WidgetRegistry::new());
        bar.render(&());
        bar
    }

    #[test]
    fn test_present_places_bar_at_origin() {
        let geometry = geometry();
        let mut display = Display::new(&geometry, Path::new("unused.png"), 1);
        assert!(display.present(&bar()));

        let bg = BarStyle::default().background;
        assert_eq!(display.screen().get_pixel(Point::new(0, geometry.y)), bg);
        assert_eq!(display.screen().get_pixel(Point::new(0, geometry.y - 1)), Rgb565::BLACK, "above the bar is untouched");
    }

    #[test]
    fn test_snapshot_written() {
        let path = std::env::temp_dir().join(format!("embar-snapshot-{}.png", std::process::id()));
        let mut display = Display::new(&geometry(), &path, 1);
        display.present(&bar());
        display.finish().unwrap();

        assert!(path.exists(), "snapshot file should exist");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_snapshot_error_names_path() {
        let path = std::env::temp_dir().join("embar-missing-dir").join("nested").join("out.png");
        let display = Display::new(&geometry(), &path, 1);

        let err = display.snapshot().unwrap_err();
        assert!(matches!(err, Error::Snapshot { path: ref p, .. } if *p == path));
        assert!(err.to_string().contains("out.png"));
    }

    #[test]
    fn test_headless_renders_one_frame_by_default() { assert_eq!(Display::default_frames(), Some(1)); }
}
