//! Motion module for stepper-encoder-core.
//!
//! Provides the rotation direction type and the acceleration-limited velocity ramp.

mod direction;
mod ramp;

pub use direction::Direction;
pub use ramp::{StepCommand, VelocityRamp};
