//! Telemetry module for stepper-encoder-core.
//!
//! Provides the per-window status record, the non-blocking transport seam, and the
//! reporter that closes a tick window every `update_interval` loop iterations.

mod record;
mod reporter;
mod sink;

pub use record::{TelemetryRecord, LINE_CAPACITY};
pub use reporter::{ReportStatus, TelemetryReporter};
pub use sink::{RecordQueue, TelemetrySink};
