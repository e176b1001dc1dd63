//! Error types for stepper-encoder-core.
//!
//! Provides unified error handling across configuration, encoder sensing, and telemetry transport.
//!
//! None of these are fatal to the control loop: rejected encoder edges and dropped
//! telemetry windows are recovered locally, and only static configuration problems
//! surface to the caller at start-up.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-encoder-core operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Encoder input error
    Encoder(EncoderError),
    /// Telemetry transport error
    Telemetry(TransportError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Telemetry update interval must be at least one iteration
    InvalidUpdateInterval(u32),
    /// Control period must be > 0
    InvalidControlPeriod(u32),
    /// Acceleration must be finite and >= 0
    InvalidAcceleration(f32),
    /// Ticks per revolution must be > 0
    InvalidTicksPerRevolution(u16),
    /// Two encoder signals share one pin
    DuplicatePin(u8),
    /// A required builder field was not provided
    Missing(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Encoder sensing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncoderError {
    /// Reading a phase input failed
    PinRead,
}

/// Telemetry transport errors.
///
/// The reporter never retries; any of these drops the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Transmit buffer has no room for the record
    BufferFull,
    /// Transport is not connected or not yet initialized
    Unavailable,
    /// Record did not fit the line formatter
    Format,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Encoder(e) => write!(f, "Encoder error: {}", e),
            Error::Telemetry(e) => write!(f, "Telemetry error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidUpdateInterval(v) => {
                write!(f, "Invalid telemetry update interval: {}. Must be > 0", v)
            }
            ConfigError::InvalidControlPeriod(v) => {
                write!(f, "Invalid control period: {} us. Must be > 0", v)
            }
            ConfigError::InvalidAcceleration(v) => {
                write!(f, "Invalid acceleration: {}. Must be finite and >= 0", v)
            }
            ConfigError::InvalidTicksPerRevolution(v) => {
                write!(f, "Invalid ticks per revolution: {}. Must be > 0", v)
            }
            ConfigError::DuplicatePin(pin) => {
                write!(f, "Pin {} is assigned to more than one encoder signal", pin)
            }
            ConfigError::Missing(field) => write!(f, "{} is required", field),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for EncoderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncoderError::PinRead => write!(f, "Phase input read failed"),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::BufferFull => write!(f, "Transmit buffer full"),
            TransportError::Unavailable => write!(f, "Transport unavailable"),
            TransportError::Format => write!(f, "Record exceeds line buffer"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<EncoderError> for Error {
    fn from(e: EncoderError) -> Self {
        Error::Encoder(e)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Telemetry(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for EncoderError {}

#[cfg(feature = "std")]
impl std::error::Error for TransportError {}
