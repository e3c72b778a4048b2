//! Animated pill indicator for bottom tab bars.
//!
//! [`selector`] is the headless core; [`tui`] hosts it in a terminal.

pub mod config;
pub mod error;
pub mod selector;
pub mod trace;
pub mod tui;

pub use selector::{
    BarEvent, Geometry, GeometryCache, IndicatorState, MotionController, OptionRow, SelectorBar,
    SelectorOption, SpringConfig,
};
