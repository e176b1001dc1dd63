//! Builder pattern for QuadratureDecoder.

use embedded_hal::digital::InputPin;

use crate::config::EncoderConfig;
use crate::error::{ConfigError, Error, Result};

use super::decoder::QuadratureDecoder;

/// Builder for creating QuadratureDecoder instances.
pub struct QuadratureDecoderBuilder<A, NA, B, NB>
where
    A: InputPin,
    NA: InputPin,
    B: InputPin,
    NB: InputPin,
{
    pin_a: Option<A>,
    pin_na: Option<NA>,
    pin_b: Option<B>,
    pin_nb: Option<NB>,
    check_complements: bool,
}

impl<A, NA, B, NB> Default for QuadratureDecoderBuilder<A, NA, B, NB>
where
    A: InputPin,
    NA: InputPin,
    B: InputPin,
    NB: InputPin,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A, NA, B, NB> QuadratureDecoderBuilder<A, NA, B, NB>
where
    A: InputPin,
    NA: InputPin,
    B: InputPin,
    NB: InputPin,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            pin_a: None,
            pin_na: None,
            pin_b: None,
            pin_nb: None,
            check_complements: true,
        }
    }

    /// Set the phase A input.
    pub fn pin_a(mut self, pin: A) -> Self {
        self.pin_a = Some(pin);
        self
    }

    /// Set the complement phase A input.
    pub fn pin_na(mut self, pin: NA) -> Self {
        self.pin_na = Some(pin);
        self
    }

    /// Set the phase B input.
    pub fn pin_b(mut self, pin: B) -> Self {
        self.pin_b = Some(pin);
        self
    }

    /// Set the complement phase B input.
    pub fn pin_nb(mut self, pin: NB) -> Self {
        self.pin_nb = Some(pin);
        self
    }

    /// Enable or disable complement checking (on by default).
    pub fn check_complements(mut self, check: bool) -> Self {
        self.check_complements = check;
        self
    }

    /// Configure decoding options from an EncoderConfig.
    ///
    /// Pin numbers in the config are for board bring-up; the pins themselves are
    /// still passed in with the setters.
    pub fn from_encoder_config(mut self, config: &EncoderConfig) -> Self {
        self.check_complements = config.check_complements;
        self
    }

    /// Build the QuadratureDecoder, capturing the current encoder state.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin is missing or cannot be read.
    pub fn build(self) -> Result<QuadratureDecoder<A, NA, B, NB>> {
        let a = self
            .pin_a
            .ok_or(Error::Config(ConfigError::Missing("pin_a")))?;
        let na = self
            .pin_na
            .ok_or(Error::Config(ConfigError::Missing("pin_na")))?;
        let b = self
            .pin_b
            .ok_or(Error::Config(ConfigError::Missing("pin_b")))?;
        let nb = self
            .pin_nb
            .ok_or(Error::Config(ConfigError::Missing("pin_nb")))?;

        QuadratureDecoder::with_options(a, na, b, nb, self.check_complements)
    }
}
