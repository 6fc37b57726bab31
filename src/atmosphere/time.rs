//! Hour of day as set by the time slider.

use std::f32::consts::TAU;

/// Night starts after this hour...
pub const DUSK_HOUR: f32 = 18.0;
/// ...and ends at this one.
pub const DAWN_HOUR: f32 = 6.0;

/// Current hour within a 24-hour cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeOfDay {
    /// Current hour, in the range `[0.0, 24.0]`.
    hour: f32,
}

impl TimeOfDay {
    /// Create a new time at the given hour, clamped to `[0.0, 24.0]`.
    pub fn new(hour: f32) -> Self {
        Self { hour: hour.clamp(0.0, 24.0) }
    }

    #[inline]
    pub fn hour(&self) -> f32 {
        self.hour
    }

    /// Fraction of the day elapsed, 0.0 at midnight.
    #[inline]
    pub fn day_fraction(&self) -> f32 {
        self.hour / 24.0
    }

    /// Angle of the sun around the garden, in radians.
    #[inline]
    pub fn sun_angle(&self) -> f32 {
        self.day_fraction() * TAU
    }

    /// Whether it is night (strictly after dusk or before dawn).
    #[inline]
    pub fn is_night(&self) -> bool {
        self.hour > DUSK_HOUR || self.hour < DAWN_HOUR
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self::new(9.0)
    }
}
