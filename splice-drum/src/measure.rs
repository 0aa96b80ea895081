//! Measure record decoding

use std::io::Read;

use crate::error::DecodeError;
use crate::pattern::{Measure, Steps};
use crate::reader::{ByteReader, Endian};
use crate::{MEASURE_RECORD_OVERHEAD, STEPS_PER_MEASURE};

/// A measure together with the size of the record it came from
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMeasure {
    /// Offset of the first byte of the record
    pub offset: u64,
    /// Record size: 4 + 1 + name length + 16
    pub bytes_consumed: u64,
    pub measure: Measure,
}

/// Decode one measure record
///
/// `index` is the record's position in the file and is only used to label
/// errors.
pub fn decode_measure<R: Read>(
    reader: &mut ByteReader<R>,
    index: usize,
) -> Result<DecodedMeasure, DecodeError> {
    let offset = reader.position();
    let id = reader.read_i32(Endian::Little)?;

    let name_len = reader.read_i8()?;
    if name_len < 0 {
        return Err(DecodeError::MalformedMeasure {
            index,
            offset,
            reason: format!("negative name length {}", name_len),
        });
    }
    let name_len = name_len as usize;

    let name = reader.read_raw(name_len)?;
    let steps = reader.read_array::<STEPS_PER_MEASURE>()?;

    Ok(DecodedMeasure {
        offset,
        bytes_consumed: MEASURE_RECORD_OVERHEAD + name_len as u64,
        measure: Measure::new(
            id,
            String::from_utf8_lossy(&name),
            Steps::from_bytes(&steps),
        ),
    })
}
