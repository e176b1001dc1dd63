//! Motion state shared between the encoder interrupt and the main loop.
//!
//! Every quantity lives in its own atomic cell so a single load or store is never
//! torn, even on cores without native atomics (`portable-atomic` falls back to
//! `critical-section` there). Each cell has exactly one writer:
//!
//! | Cell | Writer | Readers |
//! |---|---|---|
//! | direction, direction-changed latch, ticks, invalid count | encoder interrupt | main loop |
//! | target velocity, target acceleration | command handler | ramp |
//! | observation time | telemetry reporter | reporter |
//!
//! The reporter is also allowed to *reset* the tick and invalid counters and to
//! clear the latch. Those resets happen in [`MotionState::take_window`] and
//! [`MotionState::acknowledge_direction_change`].
//!
//! Cells are independently consistent only. A snapshot of direction and ticks may be
//! one edge apart; consumers must not assume otherwise.

use portable_atomic::{AtomicBool, AtomicF32, AtomicI8, AtomicU32, Ordering};

use crate::config::units::{StepsPerSec, StepsPerSecSquared, Ticks};
use crate::motion::Direction;

/// Tick accounting for one completed counting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickWindow {
    /// Validated transitions counted during the window.
    pub ticks: Ticks,
    /// Edges rejected as illegal during the window.
    pub invalid_transitions: u32,
    /// Loop iteration stamp at which the window opened.
    pub started_at: u32,
    /// Loop iteration stamp at which the window closed (and the next opened).
    pub ended_at: u32,
}

impl TickWindow {
    /// Window length in loop iterations (wrapping).
    #[inline]
    pub fn iterations(&self) -> u32 {
        self.ended_at.wrapping_sub(self.started_at)
    }
}

/// Interrupt-safe motion state.
///
/// Designed to live in a `static` and be shared by reference:
///
/// ```rust,ignore
/// static MOTION: MotionState = MotionState::new();
/// ```
#[derive(Debug)]
pub struct MotionState {
    /// +1 clockwise, -1 counter-clockwise, 0 not yet known.
    direction: AtomicI8,
    direction_changed: AtomicBool,
    ticks: AtomicU32,
    /// Loop iteration at which the current tick window opened.
    observation_time: AtomicU32,
    invalid_transitions: AtomicU32,
    target_velocity: AtomicF32,
    target_acceleration: AtomicF32,
}

impl MotionState {
    /// Start-up state: direction unknown, zero ticks, zero targets.
    pub const fn new() -> Self {
        Self {
            direction: AtomicI8::new(0),
            direction_changed: AtomicBool::new(false),
            ticks: AtomicU32::new(0),
            observation_time: AtomicU32::new(0),
            invalid_transitions: AtomicU32::new(0),
            target_velocity: AtomicF32::new(0.0),
            target_acceleration: AtomicF32::new(0.0),
        }
    }

    /// Re-initialize every cell to its start-up value.
    pub fn reset(&self) {
        critical_section::with(|_| {
            self.direction.store(0, Ordering::Relaxed);
            self.direction_changed.store(false, Ordering::Relaxed);
            self.ticks.store(0, Ordering::Relaxed);
            self.observation_time.store(0, Ordering::Relaxed);
            self.invalid_transitions.store(0, Ordering::Relaxed);
            self.target_velocity.store(0.0, Ordering::Relaxed);
            self.target_acceleration.store(0.0, Ordering::Relaxed);
        });
    }

    // Encoder interrupt side.

    /// Count one validated transition in `direction`.
    ///
    /// Returns `true` if the stored direction flipped, which also latches the
    /// direction-changed flag. Resolving an unknown direction is not a flip.
    pub fn record_transition(&self, direction: Direction) -> bool {
        self.ticks.fetch_add(1, Ordering::Relaxed);

        let sign = direction.sign();
        let previous = self.direction.swap(sign, Ordering::Relaxed);
        let flipped = previous != 0 && previous != sign;
        if flipped {
            self.direction_changed.store(true, Ordering::Release);
        }
        flipped
    }

    /// Count one rejected edge.
    pub fn record_invalid(&self) {
        self.invalid_transitions.fetch_add(1, Ordering::Relaxed);
    }

    // Main loop side.

    /// Last sensed direction, or `None` before the first valid transition.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        Direction::from_sign(self.direction.load(Ordering::Relaxed))
    }

    /// Whether a reversal is pending acknowledgement. Does not clear the latch.
    #[inline]
    pub fn direction_changed(&self) -> bool {
        self.direction_changed.load(Ordering::Acquire)
    }

    /// Clear the direction-changed latch, returning whether it was set.
    ///
    /// Clearing an already clear latch is a no-op.
    #[inline]
    pub fn acknowledge_direction_change(&self) -> bool {
        self.direction_changed.swap(false, Ordering::AcqRel)
    }

    /// Ticks counted in the current window so far.
    #[inline]
    pub fn ticks(&self) -> Ticks {
        Ticks(self.ticks.load(Ordering::Relaxed))
    }

    /// Rejected edges in the current window so far.
    #[inline]
    pub fn invalid_transitions(&self) -> u32 {
        self.invalid_transitions.load(Ordering::Relaxed)
    }

    /// Loop iteration at which the current window opened.
    #[inline]
    pub fn observation_time(&self) -> u32 {
        self.observation_time.load(Ordering::Relaxed)
    }

    /// Close the current window at iteration `now` and open the next one.
    ///
    /// Sampling and resetting happen with the encoder interrupt masked so no
    /// increment lands between the read and the reset.
    pub fn take_window(&self, now: u32) -> TickWindow {
        critical_section::with(|_| TickWindow {
            ticks: Ticks(self.ticks.swap(0, Ordering::Relaxed)),
            invalid_transitions: self.invalid_transitions.swap(0, Ordering::Relaxed),
            started_at: self.observation_time.swap(now, Ordering::Relaxed),
            ended_at: now,
        })
    }

    // Command handler side.

    /// Set the commanded steady-state velocity. Trusted input.
    #[inline]
    pub fn set_target_velocity(&self, velocity: StepsPerSec) {
        self.target_velocity.store(velocity.0, Ordering::Relaxed);
    }

    /// Commanded steady-state velocity.
    #[inline]
    pub fn target_velocity(&self) -> StepsPerSec {
        StepsPerSec(self.target_velocity.load(Ordering::Relaxed))
    }

    /// Set the acceleration limit. Expected to be >= 0; not validated here.
    #[inline]
    pub fn set_target_acceleration(&self, acceleration: StepsPerSecSquared) {
        self.target_acceleration
            .store(acceleration.0, Ordering::Relaxed);
    }

    /// Current acceleration limit.
    #[inline]
    pub fn target_acceleration(&self) -> StepsPerSecSquared {
        StepsPerSecSquared(self.target_acceleration.load(Ordering::Relaxed))
    }
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new()
    }
}
