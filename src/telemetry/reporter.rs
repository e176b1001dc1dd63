//! Telemetry reporter.
//!
//! Counts main-loop iterations and, once per window, closes the tick window,
//! samples direction state and hands a [`TelemetryRecord`] to the transport.

use crate::config::DriveConfig;
use crate::error::TransportError;
use crate::state::MotionState;

use super::record::TelemetryRecord;
use super::sink::TelemetrySink;

/// Outcome of one reporter poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportStatus {
    /// Window still open.
    Pending,
    /// Window closed and the record was accepted by the transport.
    Sent(TelemetryRecord),
    /// Window closed but the transport refused the record; it is gone.
    Dropped {
        /// The record that was not delivered.
        record: TelemetryRecord,
        /// Why the transport refused it.
        error: TransportError,
    },
}

impl ReportStatus {
    /// The record produced by this poll, delivered or not.
    pub fn record(&self) -> Option<&TelemetryRecord> {
        match self {
            ReportStatus::Pending => None,
            ReportStatus::Sent(record) | ReportStatus::Dropped { record, .. } => Some(record),
        }
    }

    /// Whether this poll closed a window.
    #[inline]
    pub fn is_report(&self) -> bool {
        !matches!(self, ReportStatus::Pending)
    }
}

/// Periodic tick-rate reporter.
#[derive(Debug, Clone)]
pub struct TelemetryReporter {
    /// Iterations per window.
    interval: u32,
    /// Control period in seconds.
    dt_secs: f32,
    /// Iterations into the current window.
    counter: u32,
    /// Iterations since start (wrapping); the reporter's time base.
    now: u32,
    /// Sequence number of the next record.
    sequence: u32,
    sent: u32,
    dropped: u32,
}

impl TelemetryReporter {
    /// Create a reporter emitting every `interval` iterations of a `dt_secs` loop.
    ///
    /// An `interval` of 0 is treated as 1.
    pub fn new(interval: u32, dt_secs: f32) -> Self {
        Self {
            interval: interval.max(1),
            dt_secs,
            counter: 0,
            now: 0,
            sequence: 0,
            sent: 0,
            dropped: 0,
        }
    }

    /// Create a reporter from the telemetry and control sections of `config`.
    pub fn from_config(config: &DriveConfig) -> Self {
        Self::new(config.telemetry.update_interval, config.dt_secs())
    }

    /// Iterations per window.
    #[inline]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Iterations into the current window.
    #[inline]
    pub fn iterations(&self) -> u32 {
        self.counter
    }

    /// Iterations since start (wrapping).
    #[inline]
    pub fn now(&self) -> u32 {
        self.now
    }

    /// Records accepted by the transport.
    #[inline]
    pub fn sent(&self) -> u32 {
        self.sent
    }

    /// Records dropped because the transport refused them.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Account for one main-loop iteration, reporting if the window is complete.
    pub fn poll<S: TelemetrySink>(&mut self, state: &MotionState, mut sink: S) -> ReportStatus {
        self.now = self.now.wrapping_add(1);
        self.counter += 1;
        if self.counter < self.interval {
            return ReportStatus::Pending;
        }

        // Window length comes from this reporter's own count: the shared stamp is
        // zeroed by `MotionState::reset`, which may happen mid-window.
        let window = state.take_window(self.now);
        let direction_changed = state.acknowledge_direction_change();
        let iterations = self.counter;

        let record = TelemetryRecord {
            sequence: self.sequence,
            ticks: window.ticks,
            window_iterations: iterations,
            window_secs: iterations as f32 * self.dt_secs,
            direction: state.direction(),
            direction_changed,
            invalid_transitions: window.invalid_transitions,
        };

        self.sequence = self.sequence.wrapping_add(1);
        self.counter = 0;

        match sink.try_send(&record) {
            Ok(()) => {
                self.sent = self.sent.wrapping_add(1);
                ReportStatus::Sent(record)
            }
            Err(error) => {
                self.dropped = self.dropped.wrapping_add(1);
                crate::log::log_warn!(
                    "telemetry: window {=u32} dropped: {}",
                    record.sequence,
                    error
                );
                ReportStatus::Dropped { record, error }
            }
        }
    }

    /// Abandon the current window and start a new one from this iteration.
    ///
    /// Ticks counted so far are discarded and the shared observation stamp is
    /// re-taken at the current iteration; the direction latch is left alone.
    pub fn restart(&mut self, state: &MotionState) {
        state.take_window(self.now);
        self.counter = 0;
    }
}
