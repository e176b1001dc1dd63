//! Quadrature decoder.
//!
//! Generic over embedded-hal 1.0 input pins for both phases and their complements.
//! Call [`QuadratureDecoder::on_edge`] from the pin-change interrupt.

use embedded_hal::digital::InputPin;

use crate::error::{EncoderError, Result};
use crate::motion::Direction;
use crate::state::MotionState;

use super::builder::QuadratureDecoderBuilder;
use super::quadrature::{QuadratureState, Transition};

/// Quadrature decoder reading a differential encoder.
///
/// Generic over:
/// - `A`, `B`: phase inputs
/// - `NA`, `NB`: complement inputs (only read when complement checking is on)
pub struct QuadratureDecoder<A, NA, B, NB>
where
    A: InputPin,
    NA: InputPin,
    B: InputPin,
    NB: InputPin,
{
    a: A,
    na: NA,
    b: B,
    nb: NB,

    /// State seen on the previous edge.
    last: QuadratureState,

    /// Reject reads where a phase equals its complement.
    check_complements: bool,

    /// Reads discarded because a differential pair had not settled.
    unsettled: u32,
}

impl<A, NA, B, NB> QuadratureDecoder<A, NA, B, NB>
where
    A: InputPin,
    NA: InputPin,
    B: InputPin,
    NB: InputPin,
{
    /// Create a decoder with complement checking on, capturing the current state.
    ///
    /// # Errors
    ///
    /// Returns `EncoderError::PinRead` if a pin cannot be read.
    pub fn new(a: A, na: NA, b: B, nb: NB) -> Result<Self> {
        Self::with_options(a, na, b, nb, true)
    }

    /// Create a builder.
    pub fn builder() -> QuadratureDecoderBuilder<A, NA, B, NB> {
        QuadratureDecoderBuilder::new()
    }

    pub(crate) fn with_options(
        a: A,
        na: NA,
        b: B,
        nb: NB,
        check_complements: bool,
    ) -> Result<Self> {
        let mut decoder = Self {
            a,
            na,
            b,
            nb,
            last: QuadratureState::S00,
            check_complements,
            unsettled: 0,
        };
        decoder.resync()?;
        Ok(decoder)
    }

    /// State seen on the previous edge.
    #[inline]
    pub fn state(&self) -> QuadratureState {
        self.last
    }

    /// Whether complement checking is enabled.
    #[inline]
    pub fn checks_complements(&self) -> bool {
        self.check_complements
    }

    /// Reads discarded because a phase matched its complement.
    #[inline]
    pub fn unsettled_reads(&self) -> u32 {
        self.unsettled
    }

    /// Handle one pin-change interrupt.
    ///
    /// Reads the phases, classifies the move from the previous state and records
    /// ticks, direction and rejected edges into `state`. A read where a phase and
    /// its complement agree is dropped as [`Transition::Idle`] without touching the
    /// previous state; the complement's own edge follows and resolves it.
    ///
    /// # Errors
    ///
    /// Returns `EncoderError::PinRead` if a pin cannot be read. Shared state is
    /// untouched in that case.
    pub fn on_edge(&mut self, state: &MotionState) -> Result<Transition> {
        match self.read()? {
            Some(next) => Ok(self.apply(next, state)),
            None => {
                self.unsettled = self.unsettled.wrapping_add(1);
                Ok(Transition::Idle)
            }
        }
    }

    /// Classify and record a move to `next`, for callers that latched the levels
    /// themselves (e.g. from a port input register).
    pub fn apply(&mut self, next: QuadratureState, state: &MotionState) -> Transition {
        let transition = self.last.transition(next);

        match transition {
            Transition::Idle => {}
            Transition::Invalid => {
                state.record_invalid();
                crate::log::log_debug!("quadrature: illegal jump {} -> {}", self.last, next);
            }
            Transition::Clockwise => Self::record(Direction::Clockwise, state),
            Transition::CounterClockwise => Self::record(Direction::CounterClockwise, state),
        }

        // Always follow the pins: after a missed edge the new state is the only
        // trustworthy reference for the next one.
        self.last = next;
        transition
    }

    fn record(direction: Direction, state: &MotionState) {
        if state.record_transition(direction) {
            crate::log::log_debug!("quadrature: direction reversed to {}", direction);
        }
    }

    /// Re-capture the current state without counting anything.
    ///
    /// Use after re-enabling the interrupt, so edges missed meanwhile are not
    /// reported as an illegal jump. Keeps the previous state if the pair is unsettled.
    ///
    /// # Errors
    ///
    /// Returns `EncoderError::PinRead` if a pin cannot be read.
    pub fn resync(&mut self) -> Result<QuadratureState> {
        if let Some(current) = self.read()? {
            self.last = current;
        }
        Ok(self.last)
    }

    /// Release the pins.
    pub fn release(self) -> (A, NA, B, NB) {
        (self.a, self.na, self.b, self.nb)
    }

    /// Sample the inputs. `None` if a differential pair disagrees.
    fn read(&mut self) -> Result<Option<QuadratureState>> {
        let a = self.a.is_high().map_err(|_| EncoderError::PinRead)?;
        let b = self.b.is_high().map_err(|_| EncoderError::PinRead)?;

        if self.check_complements {
            let na = self.na.is_high().map_err(|_| EncoderError::PinRead)?;
            let nb = self.nb.is_high().map_err(|_| EncoderError::PinRead)?;
            if a == na || b == nb {
                return Ok(None);
            }
        }

        Ok(Some(QuadratureState::from_levels(a, b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::Ticks;
    use crate::error::Error;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::MockError;
    use std::io::ErrorKind;

    fn levels(states: &[bool]) -> PinMock {
        let transactions: Vec<PinTransaction> = states
            .iter()
            .map(|&high| {
                PinTransaction::get(if high { PinState::High } else { PinState::Low })
            })
            .collect();
        PinMock::new(&transactions)
    }

    fn done(decoder: QuadratureDecoder<PinMock, PinMock, PinMock, PinMock>) {
        let (mut a, mut na, mut b, mut nb) = decoder.release();
        a.done();
        na.done();
        b.done();
        nb.done();
    }

    #[test]
    fn test_clockwise_cycle_from_pins() {
        // Reads: initial 00, then 01, 11, 10, 00
        let a = levels(&[false, false, true, true, false]);
        let b = levels(&[false, true, true, false, false]);
        let na = levels(&[true, true, false, false, true]);
        let nb = levels(&[true, false, false, true, true]);

        let state = MotionState::new();
        let mut decoder = QuadratureDecoder::new(a, na, b, nb).unwrap();
        assert_eq!(decoder.state(), QuadratureState::S00);

        for _ in 0..4 {
            assert_eq!(decoder.on_edge(&state).unwrap(), Transition::Clockwise);
        }

        assert_eq!(state.direction(), Some(Direction::Clockwise));
        assert_eq!(state.ticks(), Ticks(4));
        assert!(!state.direction_changed());
        done(decoder);
    }

    #[test]
    fn test_unsettled_pair_is_ignored() {
        // Initial 00; then A rose but ¬A still high; then ¬A settles
        let a = levels(&[false, true, true]);
        let b = levels(&[false, false, false]);
        let na = levels(&[true, true, false]);
        let nb = levels(&[true, true, true]);

        let state = MotionState::new();
        let mut decoder = QuadratureDecoder::new(a, na, b, nb).unwrap();

        assert_eq!(decoder.on_edge(&state).unwrap(), Transition::Idle);
        assert_eq!(decoder.unsettled_reads(), 1);
        assert_eq!(decoder.state(), QuadratureState::S00);
        assert_eq!(state.ticks(), Ticks(0));

        assert_eq!(decoder.on_edge(&state).unwrap(), Transition::CounterClockwise);
        assert_eq!(state.invalid_transitions(), 0);
        done(decoder);
    }

    #[test]
    fn test_complements_not_read_when_disabled() {
        let a = levels(&[false, true]);
        let b = levels(&[false, true]);
        let na = levels(&[]);
        let nb = levels(&[]);

        let state = MotionState::new();
        let mut decoder = QuadratureDecoder::builder()
            .pin_a(a)
            .pin_na(na)
            .pin_b(b)
            .pin_nb(nb)
            .check_complements(false)
            .build()
            .unwrap();

        assert_eq!(decoder.on_edge(&state).unwrap(), Transition::Invalid);
        assert_eq!(state.invalid_transitions(), 1);
        assert_eq!(state.direction(), None);
        assert_eq!(decoder.state(), QuadratureState::S11);
        done(decoder);
    }

    #[test]
    fn test_pin_error_is_reported() {
        let a = PinMock::new(&[
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::Low).with_error(MockError::Io(ErrorKind::NotConnected)),
        ]);
        let b = levels(&[false]);
        let na = levels(&[true]);
        let nb = levels(&[true]);

        let state = MotionState::new();
        let mut decoder = QuadratureDecoder::new(a, na, b, nb).unwrap();
        assert_eq!(
            decoder.on_edge(&state),
            Err(Error::Encoder(EncoderError::PinRead))
        );
        assert_eq!(state.ticks(), Ticks(0));
        done(decoder);
    }

    #[test]
    fn test_apply_reversal_sets_latch() {
        let a = levels(&[false]);
        let b = levels(&[false]);
        let na = levels(&[true]);
        let nb = levels(&[true]);

        let state = MotionState::new();
        let mut decoder = QuadratureDecoder::new(a, na, b, nb).unwrap();

        assert_eq!(
            decoder.apply(QuadratureState::S10, &state),
            Transition::CounterClockwise
        );
        assert_eq!(state.direction(), Some(Direction::CounterClockwise));
        assert!(!state.direction_changed());

        assert_eq!(decoder.apply(QuadratureState::S00, &state), Transition::Clockwise);
        assert_eq!(state.direction(), Some(Direction::Clockwise));
        assert!(state.direction_changed());
        assert_eq!(state.ticks(), Ticks(2));

        // Every tick lands in the counter, in both directions
        assert_eq!(decoder.apply(QuadratureState::S01, &state), Transition::Clockwise);
        assert_eq!(
            decoder.apply(QuadratureState::S00, &state),
            Transition::CounterClockwise
        );
        assert_eq!(state.ticks(), Ticks(4));
        assert_eq!(state.direction(), Some(Direction::CounterClockwise));
        done(decoder);
    }
}
