//! Telemetry transport seam.

use heapless::Deque;

use crate::error::TransportError;

use super::record::TelemetryRecord;

/// Non-blocking consumer of telemetry records (typically a UART TX path).
///
/// Implementations must return immediately. Any error drops the record; the
/// reporter never retries.
pub trait TelemetrySink {
    /// Hand one record to the transport.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` if the transport cannot take the record now.
    fn try_send(&mut self, record: &TelemetryRecord) -> Result<(), TransportError>;
}

impl<S: TelemetrySink + ?Sized> TelemetrySink for &mut S {
    fn try_send(&mut self, record: &TelemetryRecord) -> Result<(), TransportError> {
        (**self).try_send(record)
    }
}

/// Bounded record queue, drained by the transport (e.g. from the UART TX interrupt).
///
/// Refuses records with `TransportError::BufferFull` once `N` are waiting.
#[derive(Debug, Default)]
pub struct RecordQueue<const N: usize> {
    records: Deque<TelemetryRecord, N>,
}

impl<const N: usize> RecordQueue<N> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            records: Deque::new(),
        }
    }

    /// Take the oldest waiting record.
    pub fn pop(&mut self) -> Option<TelemetryRecord> {
        self.records.pop_front()
    }

    /// Records waiting to be transmitted.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are waiting.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate waiting records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TelemetryRecord> {
        self.records.iter()
    }
}

impl<const N: usize> TelemetrySink for RecordQueue<N> {
    fn try_send(&mut self, record: &TelemetryRecord) -> Result<(), TransportError> {
        self.records
            .push_back(*record)
            .map_err(|_| TransportError::BufferFull)
    }
}
