//! Headless animated selector indicator.
//!
//! The bar measures a variable number of options, keeps a pill aligned with
//! the active one and diverts activations of overriding options into an
//! external action. Nothing in here knows about terminals; the host supplies
//! geometry, frame ticks and the current selection.

mod bar;
mod geometry;
mod motion;
mod option_row;
pub mod spring;

pub use bar::{IndicatorState, SelectorBar};
pub use geometry::GeometryCache;
pub use motion::{MotionController, MotionState};
pub use option_row::OptionRow;
use serde::{Deserialize, Serialize};
pub use spring::SpringConfig;

/// Horizontal footprint of an option in the bar's local coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub offset: f64,
    pub width: f64,
}

impl Geometry {
    #[must_use]
    pub const fn new(offset: f64, width: f64) -> Self {
        Self { offset, width }
    }
}

/// One selectable entry of the bar.
///
/// Identity is `identifier`; `index` is only the position on the current
/// render and changes when the list is reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    pub index: usize,
    pub identifier: String,
    pub overrides_selection: bool,
    /// Display text. Opaque to the bar.
    pub label: String,
    /// Optional icon shown before the label. Opaque to the bar.
    pub glyph: Option<String>,
}

impl SelectorOption {
    pub fn new(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self {
            index: 0,
            label: identifier.clone(),
            identifier,
            overrides_selection: false,
            glyph: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.glyph = Some(glyph.into());
        self
    }

    #[must_use]
    pub const fn overriding(mut self) -> Self {
        self.overrides_selection = true;
        self
    }
}

/// Requests the bar emits towards the hosting application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BarEvent {
    /// A regular option was activated; the selection owner should switch to it.
    SelectionChangeRequested { identifier: String },
    /// An overriding option was activated; the host decides what it triggers.
    OverrideRequested { identifier: String },
}

impl BarEvent {
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::SelectionChangeRequested { identifier }
            | Self::OverrideRequested { identifier } => identifier,
        }
    }
}
