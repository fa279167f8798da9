//! Widget registry: one fixed-capacity, append-only list per alignment group.
//!
//! Registration order is draw order. Lists never grow past `N`: running out of
//! room means the bar was assembled wrong, so [`WidgetRegistry::register`]
//! reports it as a configuration error and the bar does not start.

use heapless::Vec;

use crate::config::MAX_WIDGETS;
use crate::error::ConfigError;
use crate::layout::Direction;
use crate::widget::Widget;

/// Boxed widget handle as stored in a group list.
pub type WidgetBox<S> = Box<dyn Widget<S>>;

/// Three ordered widget lists, one per [`Direction`].
pub struct WidgetRegistry<S, const N: usize = MAX_WIDGETS> {
    left: Vec<WidgetBox<S>, N>,
    right: Vec<WidgetBox<S>, N>,
    centered: Vec<WidgetBox<S>, N>,
}

impl<S, const N: usize> Default for WidgetRegistry<S, N> {
    fn default() -> Self { Self::new() }
}

impl<S, const N: usize> WidgetRegistry<S, N> {
    pub const CAPACITY: usize = N;

    pub const fn new() -> Self {
        Self {
            left: Vec::new(),
            right: Vec::new(),
            centered: Vec::new(),
        }
    }

    fn list_mut(
        &mut self,
        group: Direction,
    ) -> &mut Vec<WidgetBox<S>, N> {
        match group {
            Direction::LeftToRight => &mut self.left,
            Direction::RightToLeft => &mut self.right,
            Direction::Centered => &mut self.centered,
        }
    }

    /// Append `widget` to `group`.
    ///
    /// # Errors
    /// [`ConfigError::TooManyWidgets`] when the group already holds `N` widgets.
    pub fn register(
        &mut self,
        group: Direction,
        widget: WidgetBox<S>,
    ) -> Result<(), ConfigError> {
        let name = widget.name().to_owned();
        self.list_mut(group).push(widget).map_err(|_| ConfigError::TooManyWidgets { group, capacity: N })?;
        tracing::debug!(widget = %name, %group, "widget registered");
        Ok(())
    }

    /// Widgets of `group` in draw order.
    pub fn group(
        &self,
        group: Direction,
    ) -> &[WidgetBox<S>] {
        match group {
            Direction::LeftToRight => self.left.as_slice(),
            Direction::RightToLeft => self.right.as_slice(),
            Direction::Centered => self.centered.as_slice(),
        }
    }

    /// Mutable widgets of `group` in draw order.
    pub fn group_mut(
        &mut self,
        group: Direction,
    ) -> &mut [WidgetBox<S>] {
        self.list_mut(group).as_mut_slice()
    }

    /// Total widgets across all groups.
    pub fn len(&self) -> usize { self.left.len() + self.right.len() + self.centered.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

// =============================================================================
// Tests
// =============================================================================
