//! Drive configuration - root configuration structure.

use serde::Deserialize;

use super::units::{Micros, StepsPerSecSquared};

/// Main-loop iterations between two telemetry reports.
pub const UART_UPDATE_INTERVAL: u16 = 10000;

/// Board pin wired to encoder phase A.
pub const PIN_A: u8 = 10;
/// Board pin wired to the complement of phase A.
pub const PIN_NA: u8 = 11;
/// Board pin wired to encoder phase B.
pub const PIN_B: u8 = 12;
/// Board pin wired to the complement of phase B.
pub const PIN_NB: u8 = 13;

/// Root configuration structure from TOML.
///
/// Every section is optional; omitted values fall back to the board constants.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DriveConfig {
    /// Quadrature encoder wiring.
    #[serde(default)]
    pub encoder: EncoderConfig,

    /// Velocity ramp settings.
    #[serde(default)]
    pub control: ControlConfig,

    /// Telemetry reporter settings.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Encoder wiring and decoding options.
#[derive(Debug, Clone, Deserialize)]
pub struct EncoderConfig {
    /// Pin number of phase A.
    #[serde(default = "default_pin_a")]
    pub pin_a: u8,

    /// Pin number of complement phase A.
    #[serde(default = "default_pin_na")]
    pub pin_na: u8,

    /// Pin number of phase B.
    #[serde(default = "default_pin_b")]
    pub pin_b: u8,

    /// Pin number of complement phase B.
    #[serde(default = "default_pin_nb")]
    pub pin_nb: u8,

    /// Reject edges where a phase and its complement read the same level.
    #[serde(default = "default_true")]
    pub check_complements: bool,

    /// Validated transitions per output shaft revolution (4 × encoder lines).
    #[serde(default = "default_ticks_per_revolution")]
    pub ticks_per_revolution: u16,
}

/// Velocity ramp settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ControlConfig {
    /// Control-loop period in microseconds.
    #[serde(default = "default_period", rename = "period_us")]
    pub period: Micros,

    /// Acceleration limit applied until the command handler sets one.
    #[serde(default, rename = "initial_acceleration_steps_per_sec2")]
    pub initial_acceleration: StepsPerSecSquared,
}

/// Telemetry reporter settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Main-loop iterations per report window.
    #[serde(default = "default_update_interval")]
    pub update_interval: u32,
}

fn default_pin_a() -> u8 {
    PIN_A
}

fn default_pin_na() -> u8 {
    PIN_NA
}

fn default_pin_b() -> u8 {
    PIN_B
}

fn default_pin_nb() -> u8 {
    PIN_NB
}

fn default_true() -> bool {
    true
}

fn default_ticks_per_revolution() -> u16 {
    // 1.8° stepper with a 200-line encoder, x4 decoding
    800
}

fn default_period() -> Micros {
    Micros(100)
}

fn default_update_interval() -> u32 {
    u32::from(UART_UPDATE_INTERVAL)
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            pin_a: PIN_A,
            pin_na: PIN_NA,
            pin_b: PIN_B,
            pin_nb: PIN_NB,
            check_complements: true,
            ticks_per_revolution: default_ticks_per_revolution(),
        }
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            period: default_period(),
            initial_acceleration: StepsPerSecSquared::default(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            update_interval: default_update_interval(),
        }
    }
}

impl EncoderConfig {
    /// Pins in `[A, ¬A, B, ¬B]` order.
    pub fn pins(&self) -> [u8; 4] {
        [self.pin_a, self.pin_na, self.pin_b, self.pin_nb]
    }
}

impl DriveConfig {
    /// Control-loop period in seconds (`dt`).
    #[inline]
    pub fn dt_secs(&self) -> f32 {
        self.control.period.as_secs_f32()
    }
}
