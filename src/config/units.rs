//! Unit types for physical quantities.
//!
//! Provides type-safe representations of step rates, accelerations, encoder ticks
//! and control periods to prevent unit confusion at compile time.

use serde::{Deserialize, Serialize};

/// Step rate in steps per second (signed: positive = clockwise).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct StepsPerSec(pub f32);

impl StepsPerSec {
    /// Create a new StepsPerSec value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Acceleration limit in steps per second squared.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct StepsPerSecSquared(pub f32);

impl StepsPerSecSquared {
    /// Create a new StepsPerSecSquared value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Largest velocity change allowed over `dt_secs`.
    ///
    /// Negative limits are treated as zero.
    #[inline]
    pub fn max_step(self, dt_secs: f32) -> f32 {
        if self.0 > 0.0 {
            self.0 * dt_secs
        } else {
            0.0
        }
    }
}

/// Count of validated encoder transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Ticks(pub u32);

impl Ticks {
    /// Create a new Ticks value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Convert to output shaft revolutions.
    #[inline]
    pub fn to_revolutions(self, ticks_per_revolution: u16) -> f32 {
        self.0 as f32 / ticks_per_revolution as f32
    }
}

/// Time span in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Micros(pub u32);

impl Micros {
    /// Create a new Micros value.
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Convert to seconds.
    #[inline]
    pub fn as_secs_f32(self) -> f32 {
        self.0 as f32 / 1_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_step_scales_with_period() {
        let accel = StepsPerSecSquared(2000.0);
        assert_eq!(accel.max_step(0.25), 500.0);
        assert_eq!(StepsPerSecSquared(-5.0).max_step(1.0), 0.0);
    }

    #[test]
    fn test_micros_to_secs() {
        assert_eq!(Micros(250).as_secs_f32(), 0.000_25);
        assert_eq!(Micros::new(1_000_000).as_secs_f32(), 1.0);
    }

    #[test]
    fn test_ticks_to_revolutions() {
        assert_eq!(Ticks(2000).to_revolutions(400), 5.0);
    }
}
