//! Decode trace hook
//!
//! The assembler reports every decoded field as a [`DecodeEvent`] to a
//! [`DecodeObserver`]. Observers only watch; they cannot change the outcome
//! of a decode.

use std::fmt;

use crate::pattern::Measure;

/// A field or record the decoder has just finished reading
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeEvent {
    /// Magic bytes matched
    Magic { offset: u64 },
    /// Declared payload size read from the header
    DeclaredSize { offset: u64, size: i64 },
    /// Hardware version string read from the header
    Version { offset: u64, version: String },
    /// Tempo read from the header; `budget` is what remains for measures
    Tempo { offset: u64, tempo: f32, budget: i64 },
    /// One measure record decoded
    Measure {
        index: usize,
        offset: u64,
        measure: Measure,
        bytes_consumed: u64,
        remaining: i64,
    },
    /// Decoding completed; a negative `remaining` means the last record
    /// overran the declared size, a positive one is too short for a record
    Finished { measures: usize, remaining: i64 },
}

impl fmt::Display for DecodeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Magic { offset } => write!(f, "@{:<5} magic ok", offset),
            Self::DeclaredSize { offset, size } => {
                write!(f, "@{:<5} declared size {}", offset, size)
            }
            Self::Version { offset, version } => {
                write!(f, "@{:<5} version {:?}", offset, version)
            }
            Self::Tempo {
                offset,
                tempo,
                budget,
            } => write!(f, "@{:<5} tempo {} (measure budget {})", offset, tempo, budget),
            Self::Measure {
                index,
                offset,
                measure,
                bytes_consumed,
                remaining,
            } => write!(
                f,
                "@{:<5} measure {} id={} name={:?} ({} bytes, {} left)",
                offset,
                index,
                measure.id(),
                measure.name(),
                bytes_consumed,
                remaining
            ),
            Self::Finished {
                measures,
                remaining,
            } => write!(f, "done: {} measures, {} budget left", measures, remaining),
        }
    }
}

/// Receiver of decode events
pub trait DecodeObserver {
    /// Called once per decoded field or record, in file order
    fn on_event(&mut self, event: &DecodeEvent);
}

impl<F: FnMut(&DecodeEvent)> DecodeObserver for F {
    fn on_event(&mut self, event: &DecodeEvent) {
        self(event)
    }
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DecodeObserver for NoopObserver {
    fn on_event(&mut self, _event: &DecodeEvent) {}
}

/// Observer that forwards events to `tracing`
///
/// Header fields and measures go out at debug level, bookkeeping at trace.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DecodeObserver for TracingObserver {
    fn on_event(&mut self, event: &DecodeEvent) {
        match event {
            DecodeEvent::Magic { .. } | DecodeEvent::Finished { .. } => {
                tracing::trace!("{}", event)
            }
            _ => tracing::debug!("{}", event),
        }
    }
}

/// Observer that keeps every event, for inspection after the decode
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<DecodeEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in the order they were reported
    pub fn events(&self) -> &[DecodeEvent] {
        &self.events
    }

    /// Decoded measure events only
    pub fn measures(&self) -> impl Iterator<Item = &DecodeEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, DecodeEvent::Measure { .. }))
    }
}

impl DecodeObserver for EventLog {
    fn on_event(&mut self, event: &DecodeEvent) {
        self.events.push(event.clone());
    }
}
