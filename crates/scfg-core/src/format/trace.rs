//! Injectable trace hook for the codec.
//!
//! The encoder and decoder report their progress through a [`CodecTrace`]
//! passed in by the caller.  [`TracingTrace`] forwards every call to the
//! `tracing` facade at `debug` level; tests use
//! [`crate::format::mock::RecordingTrace`] to assert on the calls instead.

use tracing::debug;

use crate::domain::ValueType;

/// Receives codec progress events.  Every method defaults to a no-op.
pub trait CodecTrace {
    /// A `[group]` header was written.
    fn group_encoded(&self, _group: &str) {}

    /// An entry line was written.
    fn entry_encoded(&self, _group: &str, _entry: &str, _value_type: ValueType) {}

    /// A `[group]` header was read.
    fn group_decoded(&self, _group: &str) {}

    /// An entry line was read and converted.
    fn entry_decoded(&self, _group: &str, _entry: &str, _raw_value: &str, _value_type: ValueType) {}

    /// A non-empty line appeared before any group header and was ignored.
    fn line_skipped(&self, _line_number: usize, _line: &str) {}
}

/// Forwards codec events to `tracing` at `debug` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTrace;

impl CodecTrace for TracingTrace {
    fn group_encoded(&self, group: &str) {
        debug!(%group, "saving group");
    }

    fn entry_encoded(&self, group: &str, entry: &str, value_type: ValueType) {
        debug!(%group, %entry, %value_type, "saving entry");
    }

    fn group_decoded(&self, group: &str) {
        debug!(%group, "found group");
    }

    fn entry_decoded(&self, group: &str, entry: &str, raw_value: &str, value_type: ValueType) {
        debug!(%group, %entry, value = %raw_value, %value_type, "found entry");
    }

    fn line_skipped(&self, line_number: usize, line: &str) {
        debug!(line_number, %line, "skipping line outside of any group");
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentTrace;

impl CodecTrace for SilentTrace {}
