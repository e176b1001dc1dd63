//! Velocity ramp controller.
//!
//! Slews the output velocity toward the commanded target, changing it by at most
//! `acceleration × dt` per control period. The last step lands on the target
//! exactly, so the output never overshoots and never dithers around it.

use libm::{ceilf, fabsf};

use crate::config::units::{StepsPerSec, StepsPerSecSquared};
use crate::state::MotionState;

use super::direction::Direction;

/// Step-rate command for the pulse generator, produced once per control period.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepCommand {
    /// Signed velocity in steps/sec (positive = clockwise).
    pub velocity: StepsPerSec,
}

impl StepCommand {
    /// Command to hold still.
    pub const STOP: Self = Self {
        velocity: StepsPerSec(0.0),
    };

    /// Intended direction, or `None` when stopped.
    ///
    /// This is the *commanded* direction. Reconciling it with the sensed one
    /// from the encoder is up to the caller.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        Direction::from_velocity(self.velocity.0)
    }

    /// Unsigned step rate in steps/sec.
    #[inline]
    pub fn step_rate(&self) -> f32 {
        fabsf(self.velocity.0)
    }

    /// Whether the command is a standstill.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.velocity.0 == 0.0
    }

    /// Step pulse interval in nanoseconds (`u32::MAX` when stopped).
    pub fn interval_ns(&self) -> u32 {
        let rate = self.step_rate();
        if rate == 0.0 {
            return u32::MAX;
        }
        // Float-to-int casts saturate, so very slow rates clamp to u32::MAX
        (1_000_000_000.0 / rate) as u32
    }
}

/// Rounding slack, in units of `f32::EPSILON` times the magnitudes involved, within
/// which the remaining error still counts as one step.
const SNAP_ULPS: f32 = 8.0;

/// One uninterrupted slew toward a fixed target at a fixed step size.
///
/// Velocities are computed as `anchor ± steps × max_step` rather than accumulated,
/// so rounding error stays at a few ulps however long the slew runs.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    anchor: f32,
    target: f32,
    max_step: f32,
    sign: f32,
    steps: u32,
}

impl Segment {
    fn start(anchor: f32, target: f32, max_step: f32) -> Self {
        Self {
            anchor,
            target,
            max_step,
            sign: if target > anchor { 1.0 } else { -1.0 },
            steps: 0,
        }
    }

    fn continues(&self, target: f32, max_step: f32) -> bool {
        self.target == target && self.max_step == max_step
    }

    fn advance(&mut self) -> f32 {
        self.steps = self.steps.saturating_add(1);
        self.anchor + self.sign * (self.steps as f32 * self.max_step)
    }
}

/// Acceleration-limited velocity ramp.
#[derive(Debug, Clone)]
pub struct VelocityRamp {
    /// Output velocity after the last update.
    current: StepsPerSec,
    /// Control period in seconds.
    dt_secs: f32,
    /// Slew in progress, if any.
    segment: Option<Segment>,
}

impl VelocityRamp {
    /// Create a ramp starting at rest.
    pub fn new(dt_secs: f32) -> Self {
        Self::with_velocity(dt_secs, StepsPerSec(0.0))
    }

    /// Create a ramp starting at `initial` velocity.
    pub fn with_velocity(dt_secs: f32, initial: StepsPerSec) -> Self {
        Self {
            current: initial,
            dt_secs,
            segment: None,
        }
    }

    /// Output velocity after the last update.
    #[inline]
    pub fn current(&self) -> StepsPerSec {
        self.current
    }

    /// Control period in seconds.
    #[inline]
    pub fn dt_secs(&self) -> f32 {
        self.dt_secs
    }

    /// Current output as a pulse generator command.
    #[inline]
    pub fn command(&self) -> StepCommand {
        StepCommand {
            velocity: self.current,
        }
    }

    /// Advance one control period toward `target`.
    ///
    /// The output lands on the target once the remaining error is within one step,
    /// allowing a few ulps of rounding slack. With a zero (or negative)
    /// acceleration the output stays where it is.
    pub fn update(&mut self, target: StepsPerSec, acceleration: StepsPerSecSquared) -> StepCommand {
        let max_step = acceleration.max_step(self.dt_secs);
        let error = target.0 - self.current.0;

        if error == 0.0 {
            self.current = target;
            self.segment = None;
            return self.command();
        }
        if max_step <= 0.0 {
            self.segment = None;
            return self.command();
        }

        let mut segment = match self.segment {
            Some(segment) if segment.continues(target.0, max_step) => segment,
            _ => Segment::start(self.current.0, target.0, max_step),
        };

        let slack = SNAP_ULPS
            * f32::EPSILON
            * (fabsf(segment.anchor) + fabsf(target.0) + max_step);
        if fabsf(error) <= max_step + slack {
            self.current = target;
            self.segment = None;
        } else {
            self.current = StepsPerSec(segment.advance());
            self.segment = Some(segment);
        }

        self.command()
    }

    /// Advance one control period toward the targets held in `state`.
    pub fn update_from(&mut self, state: &MotionState) -> StepCommand {
        self.update(state.target_velocity(), state.target_acceleration())
    }

    /// Upper bound on the updates needed to land on `target` from the current output:
    /// `ceil(|target - current| / (acceleration × dt))`.
    ///
    /// Returns `None` if the ramp is frozen away from the target.
    pub fn steps_to_converge(
        &self,
        target: StepsPerSec,
        acceleration: StepsPerSecSquared,
    ) -> Option<u32> {
        let distance = fabsf(target.0 - self.current.0);
        if distance == 0.0 {
            return Some(0);
        }

        let max_step = acceleration.max_step(self.dt_secs);
        if max_step <= 0.0 {
            return None;
        }

        Some(ceilf(distance / max_step) as u32)
    }

    /// Force the output to `velocity` (e.g. after an emergency stop).
    pub fn reset(&mut self, velocity: StepsPerSec) {
        self.current = velocity;
        self.segment = None;
    }
}
