//! Damped spring driving a single indicator axis.
//!
//! Integrates `a = -k (x - target) - c v` with semi-implicit Euler. Frames
//! longer than [`MAX_STEP_SECS`] are split into sub-steps so a stalled frame
//! clock cannot destabilise the integration.
//!
//! With `c = 2√k` (the default) the spring is critically damped: it
//! approaches the target without overshoot when starting from rest and
//! settles in bounded time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Maximum integration step in seconds.
const MAX_STEP_SECS: f64 = 0.004;

/// Distance (in cells) under which the axis counts as arrived.
pub const REST_THRESHOLD: f64 = 0.01;

/// Speed (cells per second) under which the axis counts as stopped.
pub const VELOCITY_THRESHOLD: f64 = 0.05;

const MIN_STIFFNESS: f64 = 0.1;

/// Spring constants shared by both indicator axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    /// Velocity drag. `None` means critical damping for `stiffness`.
    #[serde(default)]
    pub damping: Option<f64>,
}

impl SpringConfig {
    /// Critically damped spring with the given stiffness.
    #[must_use]
    pub const fn critical(stiffness: f64) -> Self {
        Self {
            stiffness,
            damping: None,
        }
    }

    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness.max(MIN_STIFFNESS)
    }

    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
            .map_or_else(|| 2.0 * self.stiffness().sqrt(), |c| c.max(0.0))
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::critical(170.0)
    }
}

/// One animated scalar.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    at_rest: bool,
}

impl Spring {
    /// A spring already resting at `value`.
    #[must_use]
    pub const fn resting_at(value: f64) -> Self {
        Self {
            position: value,
            velocity: 0.0,
            target: value,
            at_rest: true,
        }
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub const fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub const fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Redirect towards `target`, keeping the current position and velocity.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > f64::EPSILON {
            self.target = target;
            self.at_rest = false;
        }
    }

    fn step(&mut self, dt: f64, config: SpringConfig) {
        let displacement = self.position - self.target;
        let acceleration =
            -config.stiffness() * displacement - config.damping() * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance by `dt`. Returns whether the spring is at rest afterwards.
    pub fn advance(&mut self, dt: Duration, config: SpringConfig) -> bool {
        if self.at_rest {
            return true;
        }

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECS);
            self.step(step, config);
            remaining -= step;
        }

        if (self.position - self.target).abs() < REST_THRESHOLD
            && self.velocity.abs() < VELOCITY_THRESHOLD
        {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
        self.at_rest
    }
}
