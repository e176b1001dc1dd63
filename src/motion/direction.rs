//! Rotation direction.

use serde::{Deserialize, Serialize};

/// Direction of motor rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Clockwise (positive velocity, canonical 00→01→11→10 order).
    Clockwise,
    /// Counter-clockwise (negative velocity, reverse order).
    CounterClockwise,
}

impl Direction {
    /// Get the sign multiplier.
    #[inline]
    pub const fn sign(self) -> i8 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    /// Decode a stored sign. Zero (or anything else) means not yet known.
    #[inline]
    pub const fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Direction::Clockwise),
            -1 => Some(Direction::CounterClockwise),
            _ => None,
        }
    }

    /// Direction implied by a signed velocity; `None` when stopped.
    #[inline]
    pub fn from_velocity(velocity: f32) -> Option<Self> {
        if velocity > 0.0 {
            Some(Direction::Clockwise)
        } else if velocity < 0.0 {
            Some(Direction::CounterClockwise)
        } else {
            None
        }
    }

    /// The opposite direction.
    #[inline]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}
