//! Decode error types

use std::io;
use std::path::PathBuf;

/// Errors that can occur while decoding a splice file
///
/// Every variant is fatal to the decode call: no partial pattern is
/// returned alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input path could not be opened
    #[error("cannot open {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The header failed validation (magic mismatch)
    #[error("malformed header: {0}")]
    MalformedHeader(&'static str),

    /// A measure record is structurally invalid
    #[error("malformed measure {index} at offset {offset}: {reason}")]
    MalformedMeasure {
        index: usize,
        offset: u64,
        reason: String,
    },

    /// A read failed or came up short
    #[error("I/O error at offset {offset}: {source}")]
    Io {
        offset: u64,
        #[source]
        source: io::Error,
    },
}

impl DecodeError {
    /// True if the error is a short read (the source ended mid-field)
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            Self::Io { source, .. } if source.kind() == io::ErrorKind::UnexpectedEof
        )
    }
}
