//! Pattern assembly: header once, then measures until the byte budget runs out

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::DecodeError;
use crate::header::decode_header;
use crate::measure::decode_measure;
use crate::pattern::Pattern;
use crate::reader::ByteReader;
use crate::trace::{DecodeEvent, DecodeObserver, NoopObserver, TracingObserver};
use crate::MEASURE_RECORD_OVERHEAD;

/// Where the assembler is in a decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    /// Nothing read yet
    Header,
    /// Header accepted; decoding measure records
    MeasureLoop,
    /// Budget exhausted, pattern complete
    Done,
    /// A decode step failed
    Failed,
}

/// Drives the header and measure decoders over one source
///
/// ```ignore
/// let mut log = EventLog::new();
/// let pattern = PatternAssembler::new(BufReader::new(file))
///     .with_observer(&mut log)
///     .assemble()?;
/// ```
pub struct PatternAssembler<'o, R: Read> {
    reader: ByteReader<R>,
    observer: Option<&'o mut dyn DecodeObserver>,
    state: AssemblyState,
}

impl<'o, R: Read> PatternAssembler<'o, R> {
    /// Create an assembler over a source positioned at the start of a file
    pub fn new(source: R) -> Self {
        Self {
            reader: ByteReader::new(source),
            observer: None,
            state: AssemblyState::Header,
        }
    }

    /// Report every decoded field to `observer`
    pub fn with_observer(mut self, observer: &'o mut dyn DecodeObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Current state
    pub fn state(&self) -> AssemblyState {
        self.state
    }

    /// Decode the whole pattern
    ///
    /// All-or-nothing: on error no measures are returned and the assembler
    /// is left in [`AssemblyState::Failed`].
    pub fn assemble(&mut self) -> Result<Pattern, DecodeError> {
        let result = self.run();
        self.state = match result {
            Ok(_) => AssemblyState::Done,
            Err(_) => AssemblyState::Failed,
        };
        result
    }

    fn run(&mut self) -> Result<Pattern, DecodeError> {
        let mut noop = NoopObserver;
        let observer: &mut dyn DecodeObserver = match self.observer.as_deref_mut() {
            Some(observer) => observer,
            None => &mut noop,
        };

        self.state = AssemblyState::Header;
        let header = decode_header(&mut self.reader, observer)?;

        self.state = AssemblyState::MeasureLoop;
        let mut remaining = header.remaining_bytes();
        let mut measures = Vec::new();

        // A budget too small for the shortest record cannot start one
        while remaining >= MEASURE_RECORD_OVERHEAD as i64 {
            let decoded = decode_measure(&mut self.reader, measures.len())?;
            remaining -= decoded.bytes_consumed as i64;
            observer.on_event(&DecodeEvent::Measure {
                index: measures.len(),
                offset: decoded.offset,
                measure: decoded.measure.clone(),
                bytes_consumed: decoded.bytes_consumed,
                remaining,
            });
            measures.push(decoded.measure);
        }

        observer.on_event(&DecodeEvent::Finished {
            measures: measures.len(),
            remaining,
        });

        Ok(Pattern::new(header.version, header.tempo, measures))
    }
}

/// Decode the splice file at `path`
///
/// Decode events are forwarded to `tracing`.
pub fn decode(path: impl AsRef<Path>) -> Result<Pattern, DecodeError> {
    decode_with(path, &mut TracingObserver)
}

/// Decode the splice file at `path`, reporting events to `observer`
pub fn decode_with(
    path: impl AsRef<Path>,
    observer: &mut dyn DecodeObserver,
) -> Result<Pattern, DecodeError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DecodeError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    PatternAssembler::new(BufReader::new(file))
        .with_observer(observer)
        .assemble()
}

/// Decode a complete splice file image held in memory
pub fn decode_bytes(data: &[u8]) -> Result<Pattern, DecodeError> {
    PatternAssembler::new(data)
        .with_observer(&mut TracingObserver)
        .assemble()
}
