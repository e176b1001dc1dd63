//! # stepper-encoder-core
//!
//! Real-time motion core for a stepper driver board: quadrature direction sensing,
//! acceleration-limited velocity ramping, and periodic tick-rate telemetry.
//!
//! ## Features
//!
//! - **Interrupt-driven decoding**: explicit quadrature transition table, illegal
//!   jumps rejected and counted, differential complements checked
//! - **Lock-free shared state**: one atomic cell per quantity, single writer each
//! - **Exact velocity ramp**: bounded by `acceleration × dt`, lands on the target
//! - **Best-effort telemetry**: one record per window, dropped rather than blocking
//! - **embedded-hal 1.0**: encoder phases are plain `InputPin`s
//! - **no_std compatible**: no heap, no blocking primitives
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_encoder_core::{DriveLoop, MotionState, QuadratureDecoder, RecordQueue};
//!
//! static MOTION: MotionState = MotionState::new();
//!
//! // Interrupt context
//! fn on_encoder_edge(decoder: &mut QuadratureDecoder<A, NA, B, NB>) {
//!     let _ = decoder.on_edge(&MOTION);
//! }
//!
//! // Main loop
//! let mut drive = DriveLoop::from_config(&MOTION, &config);
//! let mut uart: RecordQueue<4> = RecordQueue::new();
//! loop {
//!     let output = drive.iterate(&mut uart);
//!     pulses.set_rate(output.command.step_rate());
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and a host critical-section
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod log;

// Core modules
pub mod config;
pub mod drive;
pub mod encoder;
pub mod error;
pub mod motion;
pub mod state;
pub mod telemetry;

// Re-exports for ergonomic API
pub use config::{validate_config, DriveConfig, UART_UPDATE_INTERVAL};
pub use drive::{DriveLoop, LoopOutput};
pub use encoder::{QuadratureDecoder, QuadratureState, Transition};
pub use error::{Error, Result};
pub use motion::{Direction, StepCommand, VelocityRamp};
pub use state::{MotionState, TickWindow};
pub use telemetry::{RecordQueue, ReportStatus, TelemetryRecord, TelemetryReporter, TelemetrySink};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

// Unit types
pub use config::units::{Micros, StepsPerSec, StepsPerSecSquared, Ticks};
