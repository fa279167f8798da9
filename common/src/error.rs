//! Configuration errors.
//!
//! Every variant is fatal: the bar refuses to start rather than run with a
//! half-applied configuration or a widget silently missing from its group.

use crate::layout::Direction;

/// Errors raised while building the bar: settings, fonts, colors and widget registration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A group's widget list is already at capacity.
    #[error("too many widgets in the {group} group (capacity {capacity})")]
    TooManyWidgets {
        /// Group the registration targeted.
        group: Direction,
        /// Fixed capacity of every group list.
        capacity: usize,
    },

    /// A settings override was not of the form `<widget>.<property>=<value>`.
    #[error("malformed setting '{0}': expected <widget>.<property>=<value>")]
    MalformedKeyValue(String),

    /// The settings table has no such key.
    #[error("unknown settings key '{0}'")]
    UnknownKey(String),

    /// A known key got a value it cannot hold.
    #[error("bad value '{value}' for key {key}: {reason}")]
    BadValue {
        /// Dotted settings key.
        key: String,
        /// Value as given.
        value: String,
        /// Constraint that was violated.
        reason: String,
    },

    /// A color string is not `rrggbb` or `rrggbbaa` hex.
    #[error("bad color '{0}': expected rrggbb or rrggbbaa hex")]
    BadColor(String),

    /// No font in the font table has this name.
    #[error("unknown font '{0}'")]
    UnknownFont(String),

    /// A strftime format string contains an invalid specifier.
    #[error("bad time format '{0}'")]
    BadTimeFormat(String),
}
