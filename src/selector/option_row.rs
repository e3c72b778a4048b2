//! One measured, pressable option of the bar.

use super::{Geometry, GeometryCache, SelectorOption};

/// Binds an option to its layout reports.
///
/// Remembers the last geometry it reported so repeated layout passes with an
/// unchanged footprint do not touch the cache.
#[derive(Debug, Clone)]
pub struct OptionRow {
    option: SelectorOption,
    last_reported: Option<Geometry>,
}

impl OptionRow {
    #[must_use]
    pub const fn new(option: SelectorOption) -> Self {
        Self {
            option,
            last_reported: None,
        }
    }

    #[must_use]
    pub const fn option(&self) -> &SelectorOption {
        &self.option
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.option.identifier
    }

    /// Replace the option data for a new render, keeping the measurement
    /// history of the same identifier.
    pub(super) fn refresh(&mut self, option: SelectorOption) {
        debug_assert_eq!(option.identifier, self.option.identifier);
        self.option = option;
    }

    /// Report the footprint measured on a layout pass.
    ///
    /// Returns whether the cache was updated.
    pub fn report_layout(&mut self, geometry: Geometry, cache: &mut GeometryCache) -> bool {
        if self.last_reported == Some(geometry) && cache.contains(self.identifier()) {
            return false;
        }
        self.last_reported = Some(geometry);
        cache.record(self.identifier(), geometry);
        true
    }

    /// Whether this row is drawn in its active style.
    #[must_use]
    pub fn is_active(&self, tracked: Option<&str>) -> bool {
        tracked == Some(self.identifier())
    }
}
