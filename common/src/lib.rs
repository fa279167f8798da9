//! Layout, compositing and history core for the embar status bar.
//!
//! This crate holds everything that does not depend on where statistics come
//! from or which display the bar ends up on:
//!
//! - [`colors`]: RGB565 palette and hex color parsing
//! - [`config`]: layout and display constants
//! - [`error`]: configuration errors
//! - [`histogram`]: rolling multi-series sample buffer
//! - [`surface`]: off-screen pixel buffer with transparency
//! - [`layout`]: direction-aware drawing contexts and the root frame guard
//! - [`widget`]: the widget capability trait
//! - [`registry`]: per-group widget lists
//! - [`compositor`]: the bar and its per-frame compositing pass
//! - [`settings`]: settings table and dotted-key overrides
//! - [`styles`]: font table
//! - [`widgets`]: chart primitives

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod colors;
pub mod compositor;
pub mod config;
pub mod error;
pub mod histogram;
pub mod layout;
pub mod registry;
pub mod settings;
pub mod styles;
pub mod surface;
pub mod widget;
pub mod widgets;

// Re-export commonly used items
pub use compositor::{Bar, BarStyle, FrameLayout, GroupLayout, WidgetPlacement};
pub use config::*;
pub use error::ConfigError;
pub use histogram::HistogramBuffer;
pub use layout::{Direction, LayoutContext, RootContext, RootFrame};
pub use registry::{WidgetBox, WidgetRegistry};
pub use settings::{BarGeometry, Settings};
pub use surface::Surface;
pub use widget::Widget;
