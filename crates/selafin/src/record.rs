//! Fortran unformatted record framing
//!
//! Every logical record is stored as
//!
//! ```text
//! <i32 byte length> <payload> <i32 byte length>
//! ```
//!
//! in big endian byte order. The two lengths must agree, anything else is
//! treated as corrupt input rather than guessing at a record boundary.
//!
//! Record shapes are declared once through the [Record] trait and used for
//! both directions so that reading and writing can not drift apart.

// standard library
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

// crate modules
use crate::error::{Error, Result};
use crate::precision::Precision;
use crate::text::FixedText;

// external crates
use bincode::Options;
use log::trace;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Size of the length prefix and suffix
const MARKER: usize = std::mem::size_of::<i32>();

/// A record with a fixed payload size
pub(crate) trait Record: Sized {
    /// Exact payload length in bytes
    const LENGTH: usize;

    /// Append the payload bytes
    fn encode(&self, buffer: &mut Vec<u8>) -> Result<()>;

    /// Decode from exactly [LENGTH](Record::LENGTH) payload bytes
    fn decode(fields: &mut Fields) -> Result<Self>;
}

/// Big endian, fixed width integer encoding for serde records
fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_big_endian()
        .with_fixint_encoding()
}

/// Serialise a record made only of fixed size integers
pub(crate) fn encode_fixed<T: Serialize>(value: &T, buffer: &mut Vec<u8>) -> Result<()> {
    buffer.extend(bincode_options().serialize(value)?);
    Ok(())
}

/// Deserialise a record made only of fixed size integers
pub(crate) fn decode_fixed<T: DeserializeOwned>(fields: &mut Fields, length: usize) -> Result<T> {
    Ok(bincode_options().deserialize(fields.take(length)?)?)
}

/// Implements [Record] through bincode for serde structs of i32 fields
macro_rules! fixed_record {
    ($ty:ty, $count:expr) => {
        impl $crate::record::Record for $ty {
            const LENGTH: usize = $count * std::mem::size_of::<i32>();

            fn encode(&self, buffer: &mut Vec<u8>) -> $crate::error::Result<()> {
                $crate::record::encode_fixed(self, buffer)
            }

            fn decode(fields: &mut $crate::record::Fields) -> $crate::error::Result<Self> {
                $crate::record::decode_fixed(fields, Self::LENGTH)
            }
        }
    };
}

pub(crate) use fixed_record;

/// Typed cursor over a record payload
#[derive(Debug)]
pub(crate) struct Fields<'a> {
    bytes: &'a [u8],
    position: usize,
    offset: u64,
}

impl<'a> Fields<'a> {
    /// Wrap a payload that started at byte `offset` in the file
    pub fn new(bytes: &'a [u8], offset: u64) -> Self {
        Self {
            bytes,
            position: 0,
            offset,
        }
    }

    /// Next `n` raw bytes
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.position + n;
        if end > self.bytes.len() {
            return Err(Error::UnexpectedRecordLength {
                offset: self.offset,
                expected: end,
                found: self.bytes.len(),
            });
        }
        let slice = &self.bytes[self.position..end];
        self.position = end;
        Ok(slice)
    }

    pub fn i32(&mut self) -> Result<i32> {
        let mut b = [0u8; MARKER];
        b.copy_from_slice(self.take(MARKER)?);
        Ok(i32::from_be_bytes(b))
    }

    pub fn i32s(&mut self, n: usize) -> Result<Vec<i32>> {
        (0..n).map(|_| self.i32()).collect()
    }

    pub fn text<const N: usize>(&mut self) -> Result<FixedText<N>> {
        let mut b = [0u8; N];
        b.copy_from_slice(self.take(N)?);
        Ok(FixedText::from_bytes(b))
    }

    pub fn float(&mut self, precision: Precision) -> Result<f64> {
        Ok(precision.get(self.take(precision.width())?))
    }

    pub fn floats(&mut self, n: usize, precision: Precision) -> Result<Vec<f64>> {
        (0..n).map(|_| self.float(precision)).collect()
    }
}

/// Sequential record reader over any seekable byte stream
#[derive(Debug)]
pub(crate) struct RecordReader<R> {
    inner: R,
}

impl<R: Read + Seek> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Current byte offset of the cursor
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Move the cursor to an absolute byte offset
    pub fn seek_to(&mut self, position: u64) -> Result<()> {
        self.inner.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    /// Next record payload, or `None` at a clean end of stream
    ///
    /// End of stream exactly on a record boundary is the only terminal
    /// condition. Running out of bytes anywhere else is
    /// [Truncated](Error::Truncated).
    pub fn try_read_record(&mut self) -> Result<Option<(u64, Vec<u8>)>> {
        let offset = self.position()?;
        let Some(prefix) = self.try_read_marker()? else {
            return Ok(None);
        };
        let length = Self::payload_length(offset, prefix)?;

        let payload = self.read_payload(length)?;
        self.check_suffix(offset, prefix)?;

        trace!("read {length} byte record at {offset}");
        Ok(Some((offset + MARKER as u64, payload)))
    }

    /// Next record, which must exist
    pub fn read_record(&mut self) -> Result<(u64, Vec<u8>)> {
        let offset = self.position()?;
        self.try_read_record()?
            .ok_or(Error::Truncated { offset })
    }

    /// Next record, which must be exactly `expected` bytes long
    pub fn read_record_of(&mut self, expected: usize) -> Result<(u64, Vec<u8>)> {
        let (offset, payload) = self.read_record()?;
        Self::check_length(offset, expected, payload.len())?;
        Ok((offset, payload))
    }

    /// Decode the next record as a fixed shape [Record]
    pub fn read<T: Record>(&mut self) -> Result<T> {
        let (offset, payload) = self.read_record_of(T::LENGTH)?;
        T::decode(&mut Fields::new(&payload, offset))
    }

    /// Seek past a record of `expected` bytes without decoding it
    ///
    /// The framing is still checked so a skipped record can not hide a
    /// corrupt file.
    pub fn skip_record_of(&mut self, expected: usize) -> Result<()> {
        let offset = self.position()?;
        let prefix = self
            .try_read_marker()?
            .ok_or(Error::Truncated { offset })?;
        let length = Self::payload_length(offset, prefix)?;
        Self::check_length(offset + MARKER as u64, expected, length)?;

        self.inner.seek(SeekFrom::Current(length as i64))?;
        self.check_suffix(offset, prefix)
    }

    /// Read a length marker, `None` if the stream ended before any byte
    fn try_read_marker(&mut self) -> Result<Option<i32>> {
        let offset = self.position()?;
        let mut buffer = [0u8; MARKER];
        let mut filled = 0;
        while filled < MARKER {
            match self.inner.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        match filled {
            0 => Ok(None),
            MARKER => Ok(Some(i32::from_be_bytes(buffer))),
            _ => Err(Error::Truncated { offset }),
        }
    }

    /// Suffix must exist and match the prefix of the record at `offset`
    fn check_suffix(&mut self, offset: u64, prefix: i32) -> Result<()> {
        let mut buffer = [0u8; MARKER];
        self.fill(&mut buffer)?;
        let suffix = i32::from_be_bytes(buffer);
        if suffix != prefix {
            return Err(Error::CorruptRecord {
                offset,
                prefix,
                suffix,
            });
        }
        Ok(())
    }

    /// Payload of `length` bytes, grown only as far as the stream allows
    fn read_payload(&mut self, length: usize) -> Result<Vec<u8>> {
        let offset = self.position()?;
        let mut payload = Vec::new();
        (&mut self.inner)
            .take(length as u64)
            .read_to_end(&mut payload)?;

        if payload.len() < length {
            return Err(Error::Truncated { offset });
        }
        Ok(payload)
    }

    /// read_exact, but running out of bytes is reported as truncation
    fn fill(&mut self, buffer: &mut [u8]) -> Result<()> {
        let offset = self.position()?;
        self.inner.read_exact(buffer).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => Error::Truncated { offset },
            _ => Error::IOError(e),
        })
    }

    fn payload_length(offset: u64, prefix: i32) -> Result<usize> {
        usize::try_from(prefix).map_err(|_| Error::InvalidRecordLength {
            offset,
            length: prefix,
        })
    }

    fn check_length(offset: u64, expected: usize, found: usize) -> Result<()> {
        if expected != found {
            return Err(Error::UnexpectedRecordLength {
                offset,
                expected,
                found,
            });
        }
        Ok(())
    }
}

/// Sequential record writer over any byte sink
#[derive(Debug)]
pub(crate) struct RecordWriter<W> {
    inner: W,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn flush(&mut self) -> Result<()> {
        Ok(self.inner.flush()?)
    }

    /// Wrap a payload with its length prefix and suffix
    pub fn write_record(&mut self, payload: &[u8]) -> Result<()> {
        let length = i32::try_from(payload.len()).map_err(|_| Error::CountOverflow {
            what: "record length",
            value: payload.len(),
        })?;
        self.inner.write_all(&length.to_be_bytes())?;
        self.inner.write_all(payload)?;
        self.inner.write_all(&length.to_be_bytes())?;
        Ok(())
    }

    /// Encode and write a fixed shape [Record]
    pub fn write<T: Record>(&mut self, record: &T) -> Result<()> {
        let mut buffer = Vec::with_capacity(T::LENGTH);
        record.encode(&mut buffer)?;
        debug_assert_eq!(buffer.len(), T::LENGTH);
        self.write_record(&buffer)
    }

    /// Write a record of big endian i32 values
    pub fn write_i32s(&mut self, values: &[i32]) -> Result<()> {
        let mut buffer = Vec::with_capacity(values.len() * MARKER);
        for v in values {
            buffer.extend_from_slice(&v.to_be_bytes());
        }
        self.write_record(&buffer)
    }

    /// Write a record of floats at the given precision
    pub fn write_floats(&mut self, values: &[f64], precision: Precision) -> Result<()> {
        let mut buffer = Vec::with_capacity(values.len() * precision.width());
        for v in values {
            precision.put(*v, &mut buffer);
        }
        self.write_record(&buffer)
    }
}

/// Converts an in-memory count to the on-disk i32
pub(crate) fn to_i32(what: &'static str, value: usize) -> Result<i32> {
    i32::try_from(value).map_err(|_| Error::CountOverflow { what, value })
}

/// Converts an on-disk i32 to an in-memory count
pub(crate) fn to_count(what: &'static str, value: i32) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::NegativeCount { what, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn framed(prefix: i32, payload: &[u8], suffix: i32) -> Cursor<Vec<u8>> {
        let mut bytes = prefix.to_be_bytes().to_vec();
        bytes.extend_from_slice(payload);
        bytes.extend_from_slice(&suffix.to_be_bytes());
        Cursor::new(bytes)
    }

    #[test]
    fn framing_matches_payload_length() {
        let mut writer = RecordWriter::new(Vec::new());
        writer.write_i32s(&[7, -1]).unwrap();
        let bytes = writer.into_inner();

        assert_eq!(bytes.len(), 4 + 8 + 4);
        assert_eq!(&bytes[..4], &8i32.to_be_bytes());
        assert_eq!(&bytes[12..], &8i32.to_be_bytes());
        assert_eq!(&bytes[4..8], &7i32.to_be_bytes());
    }

    #[test]
    fn clean_end_of_stream() {
        let mut reader = RecordReader::new(Cursor::new(Vec::new()));
        assert!(reader.try_read_record().unwrap().is_none());
    }

    #[test]
    fn mismatched_suffix_is_corrupt() {
        let mut reader = RecordReader::new(framed(4, &[0, 0, 0, 1], 5));
        assert!(matches!(
            reader.try_read_record(),
            Err(Error::CorruptRecord {
                offset: 0,
                prefix: 4,
                suffix: 5
            })
        ));
    }

    #[test]
    fn negative_length_is_invalid() {
        let mut reader = RecordReader::new(framed(-4, &[0, 0, 0, 1], -4));
        assert!(matches!(
            reader.try_read_record(),
            Err(Error::InvalidRecordLength { length: -4, .. })
        ));
    }

    #[test]
    fn partial_marker_is_truncated() {
        let mut reader = RecordReader::new(Cursor::new(vec![0u8, 0]));
        assert!(matches!(
            reader.try_read_record(),
            Err(Error::Truncated { offset: 0 })
        ));
    }

    #[test]
    fn short_payload_is_truncated() {
        let mut bytes = 8i32.to_be_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);
        let mut reader = RecordReader::new(Cursor::new(bytes));
        assert!(matches!(
            reader.try_read_record(),
            Err(Error::Truncated { .. })
        ));
    }

    #[test]
    fn huge_length_on_short_stream_is_truncated() {
        let mut bytes = i32::MAX.to_be_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2, 3, 4]);
        let mut reader = RecordReader::new(Cursor::new(bytes));
        assert!(matches!(
            reader.try_read_record(),
            Err(Error::Truncated { offset: 4 })
        ));
    }

    #[test]
    fn skip_checks_framing() {
        let mut reader = RecordReader::new(framed(4, &[9, 9, 9, 9], 4));
        reader.skip_record_of(4).unwrap();
        assert_eq!(reader.position().unwrap(), 12);

        let mut reader = RecordReader::new(framed(4, &[9, 9, 9, 9], 3));
        assert!(matches!(
            reader.skip_record_of(4),
            Err(Error::CorruptRecord { .. })
        ));

        let mut reader = RecordReader::new(framed(4, &[9, 9, 9, 9], 4));
        assert!(matches!(
            reader.skip_record_of(8),
            Err(Error::UnexpectedRecordLength {
                expected: 8,
                found: 4,
                ..
            })
        ));
    }

    #[test]
    fn typed_fields() {
        let mut payload = 42i32.to_be_bytes().to_vec();
        payload.extend_from_slice(b"AB  ");
        Precision::Single.put(0.5, &mut payload);

        let mut fields = Fields::new(&payload, 0);
        assert_eq!(fields.i32().unwrap(), 42);
        assert_eq!(fields.text::<4>().unwrap().text(), "AB");
        assert_eq!(fields.float(Precision::Single).unwrap(), 0.5);
        assert!(fields.i32().is_err());
    }
}
