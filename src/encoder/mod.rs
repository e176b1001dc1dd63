//! Encoder module for stepper-encoder-core.
//!
//! Provides the quadrature state table and the interrupt-side decoder that feeds
//! direction and tick counts into [`MotionState`](crate::state::MotionState).

mod builder;
mod decoder;
mod quadrature;

pub use builder::QuadratureDecoderBuilder;
pub use decoder::QuadratureDecoder;
pub use quadrature::{QuadratureState, Transition};
