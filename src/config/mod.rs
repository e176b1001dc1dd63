//! Configuration module for stepper-encoder-core.
//!
//! Provides the drive configuration (encoder wiring, control period, telemetry window),
//! its validation, and loading from TOML files (with `std` feature).

mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use system::{
    ControlConfig, DriveConfig, EncoderConfig, TelemetryConfig, PIN_A, PIN_B, PIN_NA, PIN_NB,
    UART_UPDATE_INTERVAL,
};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Micros, StepsPerSec, StepsPerSecSquared, Ticks};
