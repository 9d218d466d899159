//! Recording trace hook for tests.
//!
//! Collects every [`CodecTrace`] call so tests can assert which groups and
//! entries the codec visited without installing a `tracing` subscriber.

use std::sync::Mutex;

use crate::domain::ValueType;

use super::trace::CodecTrace;

/// One recorded codec event.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    GroupEncoded(String),
    EntryEncoded {
        group: String,
        entry: String,
        value_type: ValueType,
    },
    GroupDecoded(String),
    EntryDecoded {
        group: String,
        entry: String,
        raw_value: String,
        value_type: ValueType,
    },
    LineSkipped(usize),
}

/// A [`CodecTrace`] that stores every event in call order.
#[derive(Debug, Default)]
pub struct RecordingTrace {
    events: Mutex<Vec<TraceEvent>>,
}

impl RecordingTrace {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every event recorded so far.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().expect("lock poisoned").clone()
    }

    /// Number of entry events (encoded or decoded) recorded so far.
    pub fn entry_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    TraceEvent::EntryEncoded { .. } | TraceEvent::EntryDecoded { .. }
                )
            })
            .count()
    }

    fn record(&self, event: TraceEvent) {
        self.events.lock().expect("lock poisoned").push(event);
    }
}

impl CodecTrace for RecordingTrace {
    fn group_encoded(&self, group: &str) {
        self.record(TraceEvent::GroupEncoded(group.to_string()));
    }

    fn entry_encoded(&self, group: &str, entry: &str, value_type: ValueType) {
        self.record(TraceEvent::EntryEncoded {
            group: group.to_string(),
            entry: entry.to_string(),
            value_type,
        });
    }

    fn group_decoded(&self, group: &str) {
        self.record(TraceEvent::GroupDecoded(group.to_string()));
    }

    fn entry_decoded(&self, group: &str, entry: &str, raw_value: &str, value_type: ValueType) {
        self.record(TraceEvent::EntryDecoded {
            group: group.to_string(),
            entry: entry.to_string(),
            raw_value: raw_value.to_string(),
            value_type,
        });
    }

    fn line_skipped(&self, line_number: usize, _line: &str) {
        self.record(TraceEvent::LineSkipped(line_number));
    }
}
