//! Splice-Drum: decoder for `.splice` drum machine pattern files
//!
//! A `.splice` file is a saved drum pattern: a fixed header carrying the
//! hardware version and tempo, followed by one record per instrument track
//! ("measure"), each with a sixteen-step on/off grid.
//!
//! # Key Features
//!
//! - **Decode-only**: one forward pass over the file, no seeking
//! - **Byte-budget bounded**: the header's declared size bounds the record loop
//! - **All-or-nothing**: a decode returns a complete [`Pattern`] or a [`DecodeError`]
//! - **Observable**: every decoded field can be reported to a [`DecodeObserver`]
//!
//! # Format Overview
//!
//! ```text
//! offset  size  order  field
//!      0     6    -    magic "SPLICE"
//!      6     8    BE   declared size (bytes from offset 14 to end of file)
//!     14    32    -    hardware version, NUL-terminated within the field
//!     46     4    LE   tempo (f32)
//!     50     *         measure records
//!
//! measure record:
//!      4    LE   id (i32)
//!      1    -    name length n (i8)
//!      n    -    name
//!     16    -    steps, one byte each (nonzero = active)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use splice_drum::decode;
//!
//! let pattern = decode("pattern_1.splice")?;
//! print!("{}", pattern);
//! // Saved with HW Version: 0.808-alpha
//! // Tempo: 120
//! // (0) kick	|x---|x---|x---|x---|
//! ```

mod decoder;
mod error;
mod header;
mod measure;
mod pattern;
mod reader;
mod trace;

pub use decoder::{AssemblyState, PatternAssembler, decode, decode_bytes, decode_with};
pub use error::DecodeError;
pub use header::{Header, decode_header};
pub use measure::{DecodedMeasure, decode_measure};
pub use pattern::{Measure, Pattern, Steps};
pub use reader::{ByteReader, Endian};
pub use trace::{DecodeEvent, DecodeObserver, EventLog, NoopObserver, TracingObserver};

// =============================================================================
// Format Constants
// =============================================================================

/// Magic bytes at the start of every splice file
pub const SPLICE_MAGIC: &[u8; 6] = b"SPLICE";

/// Width of the fixed hardware version field
pub const VERSION_FIELD_LEN: usize = 32;

/// Width of the tempo field
pub const TEMPO_FIELD_LEN: usize = 4;

/// Bytes of the declared size that belong to the header rather than to
/// measure records (version field + tempo)
pub const HEADER_BUDGET_OVERHEAD: i64 = (VERSION_FIELD_LEN + TEMPO_FIELD_LEN) as i64;

/// Number of steps in every measure
pub const STEPS_PER_MEASURE: usize = 16;

/// Steps per beat; the rendering puts a bar between groups of this size
pub const STEPS_PER_BEAT: usize = 4;

/// Fixed part of a measure record: id (4) + name length (1) + steps (16)
pub const MEASURE_RECORD_OVERHEAD: u64 = 4 + 1 + STEPS_PER_MEASURE as u64;

// =============================================================================
// Tests
// =============================================================================
