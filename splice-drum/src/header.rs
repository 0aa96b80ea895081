//! Splice file header

use std::io::Read;

use crate::error::DecodeError;
use crate::reader::{ByteReader, Endian};
use crate::trace::{DecodeEvent, DecodeObserver};
use crate::{HEADER_BUDGET_OVERHEAD, SPLICE_MAGIC, VERSION_FIELD_LEN};

/// Decoded header fields
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Declared payload size: bytes from the end of the size field to the
    /// end of the file (version + tempo + measure records)
    pub declared_size: i64,
    /// Hardware version the pattern was saved with
    pub version: String,
    /// Tempo in beats per minute
    pub tempo: f32,
}

impl Header {
    /// Byte budget left for measure records after the version and tempo
    ///
    /// May be zero or negative on a malformed file, in which case no
    /// measure is decoded.
    pub fn remaining_bytes(&self) -> i64 {
        self.declared_size.saturating_sub(HEADER_BUDGET_OVERHEAD)
    }
}

/// Decode the header from a reader positioned at offset 0
///
/// A magic mismatch fails before anything past the magic is read.
pub fn decode_header<R: Read>(
    reader: &mut ByteReader<R>,
    observer: &mut dyn DecodeObserver,
) -> Result<Header, DecodeError> {
    let offset = reader.position();
    let magic = reader.read_array::<6>()?;
    if magic != *SPLICE_MAGIC {
        return Err(DecodeError::MalformedHeader("bad magic"));
    }
    observer.on_event(&DecodeEvent::Magic { offset });

    let offset = reader.position();
    let declared_size = reader.read_i64(Endian::Big)?;
    observer.on_event(&DecodeEvent::DeclaredSize {
        offset,
        size: declared_size,
    });

    let offset = reader.position();
    let field = reader.read_array::<VERSION_FIELD_LEN>()?;
    let version = read_version(&field);
    observer.on_event(&DecodeEvent::Version {
        offset,
        version: version.clone(),
    });

    let offset = reader.position();
    let tempo = reader.read_f32(Endian::Little)?;

    let header = Header {
        declared_size,
        version,
        tempo,
    };
    observer.on_event(&DecodeEvent::Tempo {
        offset,
        tempo,
        budget: header.remaining_bytes(),
    });

    Ok(header)
}

/// Text of a fixed field up to its first NUL, or the whole field if none
fn read_version(field: &[u8]) -> String {
    let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..len]).into_owned()
}
