//! Main-loop driver.
//!
//! Ties the velocity ramp and the telemetry reporter to one shared [`MotionState`].
//! The encoder decoder is not part of it: it runs from the pin-change interrupt and
//! only meets the loop through the shared state.

use crate::config::units::StepsPerSec;
use crate::config::DriveConfig;
use crate::motion::{StepCommand, VelocityRamp};
use crate::state::MotionState;
use crate::telemetry::{ReportStatus, TelemetryReporter, TelemetrySink};

/// Result of one main-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopOutput {
    /// Step-rate command for the pulse generator.
    pub command: StepCommand,
    /// Telemetry outcome for this iteration.
    pub report: ReportStatus,
}

/// Cooperative main loop: ramp first, then telemetry.
///
/// # Example
///
/// ```rust,ignore
/// static MOTION: MotionState = MotionState::new();
///
/// let config = stepper_encoder_core::load_config("drive.toml")?;
/// let mut drive = DriveLoop::from_config(&MOTION, &config);
/// let mut uart_queue: RecordQueue<4> = RecordQueue::new();
///
/// loop {
///     let output = drive.iterate(&mut uart_queue);
///     pulse_generator.set_rate(output.command);
///     wait_for_next_period();
/// }
/// ```
#[derive(Debug)]
pub struct DriveLoop<'a> {
    state: &'a MotionState,
    ramp: VelocityRamp,
    reporter: TelemetryReporter,
}

impl<'a> DriveLoop<'a> {
    /// Assemble a loop from already configured parts.
    pub fn new(state: &'a MotionState, ramp: VelocityRamp, reporter: TelemetryReporter) -> Self {
        Self {
            state,
            ramp,
            reporter,
        }
    }

    /// Create a loop from configuration.
    ///
    /// Seeds the shared acceleration limit with `control.initial_acceleration`
    /// when one is configured; afterwards only the command handler writes it.
    pub fn from_config(state: &'a MotionState, config: &DriveConfig) -> Self {
        let initial = config.control.initial_acceleration;
        if initial.0 > 0.0 {
            state.set_target_acceleration(initial);
        }

        Self::new(
            state,
            VelocityRamp::new(config.dt_secs()),
            TelemetryReporter::from_config(config),
        )
    }

    /// Run one main-loop iteration.
    pub fn iterate<S: TelemetrySink>(&mut self, sink: S) -> LoopOutput {
        let command = self.ramp.update_from(self.state);
        let report = self.reporter.poll(self.state, sink);
        LoopOutput { command, report }
    }

    /// Return everything to its start-up condition: shared state cleared, ramp at
    /// rest, current telemetry window abandoned.
    ///
    /// The acceleration limit is cleared with the rest of the state; re-seed it
    /// (or let the command handler set it) before expecting motion.
    pub fn reset(&mut self) {
        self.state.reset();
        self.ramp.reset(StepsPerSec(0.0));
        self.reporter.restart(self.state);
        crate::log::log_info!("drive loop reset at iteration {=u32}", self.reporter.now());
    }

    /// The shared motion state.
    #[inline]
    pub fn state(&self) -> &'a MotionState {
        self.state
    }

    /// The velocity ramp.
    #[inline]
    pub fn ramp(&self) -> &VelocityRamp {
        &self.ramp
    }

    /// The velocity ramp, for forcing its output.
    #[inline]
    pub fn ramp_mut(&mut self) -> &mut VelocityRamp {
        &mut self.ramp
    }

    /// The telemetry reporter.
    #[inline]
    pub fn reporter(&self) -> &TelemetryReporter {
        &self.reporter
    }
}
