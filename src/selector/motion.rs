//! Indicator motion: offset and width springs driven towards a geometry.

use std::time::Duration;

use serde::Serialize;

use super::{
    spring::{Spring, SpringConfig},
    Geometry,
};

/// Snapshot of the indicator motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotionState {
    pub current_offset: f64,
    pub current_width: f64,
    pub target_offset: f64,
    pub target_width: f64,
    pub is_animating: bool,
}

#[derive(Debug, Clone)]
struct Axes {
    offset: Spring,
    width: Spring,
}

/// Owns the animatable indicator position.
///
/// Starts without a position; the first [`retarget`](Self::retarget) snaps
/// so the pill never sweeps in from the origin on first paint.
#[derive(Debug, Clone, Default)]
pub struct MotionController {
    axes: Option<Axes>,
    config: SpringConfig,
}

impl MotionController {
    #[must_use]
    pub const fn new(config: SpringConfig) -> Self {
        Self { axes: None, config }
    }

    /// Aim at `geometry`. Snaps when nothing is shown yet, otherwise
    /// redirects from wherever the indicator currently is.
    pub fn retarget(&mut self, geometry: Geometry) {
        match &mut self.axes {
            Some(axes) => {
                axes.offset.set_target(geometry.offset);
                axes.width.set_target(geometry.width);
            }
            None => {
                self.axes = Some(Axes {
                    offset: Spring::resting_at(geometry.offset),
                    width: Spring::resting_at(geometry.width),
                });
            }
        }
    }

    /// Advance one frame. Returns whether the indicator is still moving.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(axes) = &mut self.axes else {
            return false;
        };
        let offset_rest = axes.offset.advance(dt, self.config);
        let width_rest = axes.width.advance(dt, self.config);
        !(offset_rest && width_rest)
    }

    pub fn reset(&mut self) {
        self.axes = None;
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.axes
            .as_ref()
            .is_some_and(|a| !(a.offset.is_at_rest() && a.width.is_at_rest()))
    }

    /// Whether the indicator has a position at all.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.axes.is_some()
    }

    /// Current visual footprint, if any.
    #[must_use]
    pub fn current(&self) -> Option<Geometry> {
        self.axes
            .as_ref()
            .map(|a| Geometry::new(a.offset.position(), a.width.position()))
    }

    #[must_use]
    pub fn target(&self) -> Option<Geometry> {
        self.axes
            .as_ref()
            .map(|a| Geometry::new(a.offset.target(), a.width.target()))
    }

    #[must_use]
    pub fn state(&self) -> Option<MotionState> {
        let axes = self.axes.as_ref()?;
        Some(MotionState {
            current_offset: axes.offset.position(),
            current_width: axes.width.position(),
            target_offset: axes.offset.target(),
            target_width: axes.width.target(),
            is_animating: self.is_animating(),
        })
    }
}
