//! Telemetry record emitted once per window.

use core::fmt::{self, Write};

use serde::Serialize;

use crate::config::units::Ticks;
use crate::error::TransportError;
use crate::motion::Direction;

/// Capacity of a formatted telemetry line.
pub const LINE_CAPACITY: usize = 96;

/// Status record for one completed telemetry window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryRecord {
    /// Window number since start-up (wrapping).
    pub sequence: u32,
    /// Validated encoder transitions in the window.
    pub ticks: Ticks,
    /// Window length in main-loop iterations.
    pub window_iterations: u32,
    /// Window length in seconds (`window_iterations × dt`).
    pub window_secs: f32,
    /// Sensed direction at sampling time, `None` before the first valid edge.
    pub direction: Option<Direction>,
    /// Whether a reversal was latched since the previous acknowledgement.
    pub direction_changed: bool,
    /// Edges rejected as illegal in the window.
    pub invalid_transitions: u32,
}

impl TelemetryRecord {
    /// Ticks per second over the window, or 0 for a zero-length window.
    pub fn tick_rate(&self) -> f32 {
        if self.window_secs > 0.0 {
            self.ticks.0 as f32 / self.window_secs
        } else {
            0.0
        }
    }

    /// Shaft speed over the window, unsigned, for an encoder giving
    /// `ticks_per_revolution` validated transitions per turn
    /// (`EncoderConfig::ticks_per_revolution`). 0 for an empty window or a zero
    /// resolution.
    pub fn revolutions_per_sec(&self, ticks_per_revolution: u16) -> f32 {
        if self.window_secs > 0.0 && ticks_per_revolution > 0 {
            self.ticks.to_revolutions(ticks_per_revolution) / self.window_secs
        } else {
            0.0
        }
    }

    /// Signed direction as transmitted: 1, -1, or 0 when unknown.
    #[inline]
    pub fn direction_sign(&self) -> i8 {
        self.direction.map_or(0, Direction::sign)
    }

    /// Write the record as one CRLF-terminated CSV line:
    ///
    /// `TLM,<sequence>,<ticks>,<window_iterations>,<window_secs>,<direction>,<changed>,<invalid>`
    pub fn write_line<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(
            out,
            "TLM,{},{},{},{:.4},{},{},{}\r\n",
            self.sequence,
            self.ticks.0,
            self.window_iterations,
            self.window_secs,
            self.direction_sign(),
            u8::from(self.direction_changed),
            self.invalid_transitions
        )
    }

    /// Format the record into a fixed-capacity line.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Format` if the line does not fit.
    pub fn to_line(&self) -> Result<heapless::String<LINE_CAPACITY>, TransportError> {
        let mut line = heapless::String::new();
        self.write_line(&mut line)
            .map_err(|_| TransportError::Format)?;
        Ok(line)
    }
}
