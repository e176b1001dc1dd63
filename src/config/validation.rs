//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::system::{ControlConfig, EncoderConfig, TelemetryConfig};
use super::DriveConfig;

/// Validate a drive configuration.
///
/// Checks:
/// - The four encoder signals use distinct pins
/// - Ticks per revolution is non-zero
/// - Control period is non-zero
/// - Initial acceleration is finite and non-negative
/// - Telemetry update interval is non-zero
///
/// Runtime targets written by the command handler are not covered here; the
/// control loop trusts them.
pub fn validate_config(config: &DriveConfig) -> Result<()> {
    validate_encoder(&config.encoder)?;
    validate_control(&config.control)?;
    validate_telemetry(&config.telemetry)?;

    Ok(())
}

fn validate_encoder(config: &EncoderConfig) -> Result<()> {
    let pins = config.pins();
    for (i, pin) in pins.iter().enumerate() {
        if pins[i + 1..].contains(pin) {
            return Err(Error::Config(ConfigError::DuplicatePin(*pin)));
        }
    }

    if config.ticks_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidTicksPerRevolution(0)));
    }

    Ok(())
}

fn validate_control(config: &ControlConfig) -> Result<()> {
    if config.period.0 == 0 {
        return Err(Error::Config(ConfigError::InvalidControlPeriod(0)));
    }

    let accel = config.initial_acceleration.0;
    if !accel.is_finite() || accel < 0.0 {
        return Err(Error::Config(ConfigError::InvalidAcceleration(accel)));
    }

    Ok(())
}

fn validate_telemetry(config: &TelemetryConfig) -> Result<()> {
    if config.update_interval == 0 {
        return Err(Error::Config(ConfigError::InvalidUpdateInterval(0)));
    }

    Ok(())
}
