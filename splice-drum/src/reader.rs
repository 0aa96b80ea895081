//! Forward-only typed reads over a byte source
//!
//! The splice header mixes byte orders (big-endian size, little-endian
//! tempo), so the order is chosen per read rather than per reader.

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::{self, Read};

use crate::error::DecodeError;

/// Byte order of a single multi-byte field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    /// Most significant byte first
    Big,
    /// Least significant byte first
    Little,
}

/// Reader for fixed-width fields of a splice file
///
/// Tracks the absolute number of bytes consumed so failures can name the
/// offset at which the failing read started. The cursor only moves forward.
pub struct ByteReader<R: Read> {
    reader: R,
    position: u64,
}

impl<R: Read> ByteReader<R> {
    /// Create a reader positioned at offset 0 of `reader`
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
        }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Read exactly `n` raw bytes
    pub fn read_raw(&mut self, n: usize) -> Result<Vec<u8>, DecodeError> {
        let mut buf = vec![0u8; n];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Read exactly `N` raw bytes into a fixed array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Read a signed byte
    pub fn read_i8(&mut self) -> Result<i8, DecodeError> {
        self.track(1, |r| r.read_i8())
    }

    /// Read a 32-bit signed integer
    pub fn read_i32(&mut self, order: Endian) -> Result<i32, DecodeError> {
        self.track(4, |r| match order {
            Endian::Big => r.read_i32::<BigEndian>(),
            Endian::Little => r.read_i32::<LittleEndian>(),
        })
    }

    /// Read a 64-bit signed integer
    pub fn read_i64(&mut self, order: Endian) -> Result<i64, DecodeError> {
        self.track(8, |r| match order {
            Endian::Big => r.read_i64::<BigEndian>(),
            Endian::Little => r.read_i64::<LittleEndian>(),
        })
    }

    /// Read an IEEE-754 single precision float
    pub fn read_f32(&mut self, order: Endian) -> Result<f32, DecodeError> {
        self.track(4, |r| match order {
            Endian::Big => r.read_f32::<BigEndian>(),
            Endian::Little => r.read_f32::<LittleEndian>(),
        })
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        let len = buf.len() as u64;
        self.track(len, |r| r.read_exact(buf))
    }

    /// Run a fixed-width read, advancing the position only on success
    fn track<T>(
        &mut self,
        width: u64,
        read: impl FnOnce(&mut R) -> io::Result<T>,
    ) -> Result<T, DecodeError> {
        let offset = self.position;
        let value = read(&mut self.reader).map_err(|source| DecodeError::Io { offset, source })?;
        self.position += width;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_byte_orders() {
        let mut data = Vec::new();
        data.extend_from_slice(&258i64.to_be_bytes());
        data.extend_from_slice(&120.0f32.to_le_bytes());
        data.extend_from_slice(&(-7i32).to_le_bytes());

        let mut reader = ByteReader::new(&data[..]);
        assert_eq!(reader.read_i64(Endian::Big).unwrap(), 258);
        assert_eq!(reader.read_f32(Endian::Little).unwrap(), 120.0);
        assert_eq!(reader.read_i32(Endian::Little).unwrap(), -7);
        assert_eq!(reader.position(), 16);
        assert!(reader.read_i8().unwrap_err().is_truncation());
    }

    #[test]
    fn test_order_is_per_call() {
        let data = [0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01];
        let mut reader = ByteReader::new(&data[..]);
        assert_eq!(reader.read_i32(Endian::Big).unwrap(), 1);
        assert_eq!(reader.read_i32(Endian::Little).unwrap(), 0x0100_0000);
    }

    #[test]
    fn test_signed_byte_is_not_widened_unsigned() {
        let data = [0xFF];
        let mut reader = ByteReader::new(&data[..]);
        assert_eq!(reader.read_i8().unwrap(), -1);
    }

    #[test]
    fn test_raw_and_array_reads() {
        let data = b"SPLICEkick";
        let mut reader = ByteReader::new(&data[..]);
        assert_eq!(&reader.read_array::<6>().unwrap(), b"SPLICE");
        assert_eq!(reader.read_raw(4).unwrap(), b"kick");
        assert_eq!(reader.read_raw(0).unwrap(), Vec::<u8>::new());
        assert_eq!(reader.position(), 10);
    }

    #[test]
    fn test_short_read_reports_start_offset() {
        let data = [1u8, 2, 3, 4, 5, 6];
        let mut reader = ByteReader::new(&data[..]);
        reader.read_raw(4).unwrap();

        let err = reader.read_i32(Endian::Little).unwrap_err();
        assert!(err.is_truncation());
        assert!(matches!(err, DecodeError::Io { offset: 4, .. }));
        assert_eq!(reader.position(), 4);
    }
}
