//! Log entry encoding
//!
//! Every entry in the record log is one self-delimiting frame:
//!
//! ```text
//! +------------------+
//! | Frame Length     | (u32 LE, whole frame including this field)
//! +------------------+
//! | Kind             | (u8: 0 = put, 1 = tombstone)
//! +------------------+
//! | Record ID        | (length-prefixed UTF-8)
//! +------------------+
//! | Value            | (length-prefixed UTF-8)
//! +------------------+
//! | Properties       | (put only, see below)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! Put properties, in order: length (u64), is_palindrome (u8, 0 or 1),
//! unique_characters (u64), word_count (u64), created_at (i64 microseconds
//! since the Unix epoch), entry count (u32), then per entry a Unicode scalar
//! (u32) followed by its count (u64).
//!
//! Checksum covers all bytes except the checksum itself. Decoding is strict:
//! invalid scalars, duplicate frequency keys, bad flags and trailing bytes
//! are all rejected.

use std::io;

use chrono::DateTime;

use crate::analysis::{CharacterFrequency, PropertyBundle};
use crate::record::StringRecord;

use super::checksum::compute_checksum;

/// len + kind + two empty strings + checksum
pub const MIN_FRAME_SIZE: usize = 4 + 1 + 4 + 4 + 4;

const KIND_PUT: u8 = 0;
const KIND_TOMBSTONE: u8 = 1;

/// One decoded log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// A full record, written once at creation
    Put(StringRecord),
    /// Deletion marker for a previously written record
    Tombstone { id: String, value: String },
}

impl LogEntry {
    /// Identity of the record this entry refers to
    pub fn id(&self) -> &str {
        match self {
            LogEntry::Put(record) => record.id(),
            LogEntry::Tombstone { id, .. } => id,
        }
    }

    /// Returns true for deletion markers
    pub fn is_tombstone(&self) -> bool {
        matches!(self, LogEntry::Tombstone { .. })
    }

    fn serialize_body(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        match self {
            LogEntry::Put(record) => {
                buf.push(KIND_PUT);
                put_str(&mut buf, record.id());
                put_str(&mut buf, record.value());

                let props = record.properties();
                buf.extend_from_slice(&props.length.to_le_bytes());
                buf.push(u8::from(props.is_palindrome));
                buf.extend_from_slice(&props.unique_characters.to_le_bytes());
                buf.extend_from_slice(&props.word_count.to_le_bytes());
                buf.extend_from_slice(&record.created_at().timestamp_micros().to_le_bytes());

                buf.extend_from_slice(&(props.character_frequency.len() as u32).to_le_bytes());
                for (c, count) in &props.character_frequency {
                    buf.extend_from_slice(&u32::from(*c).to_le_bytes());
                    buf.extend_from_slice(&count.to_le_bytes());
                }
            }
            LogEntry::Tombstone { id, value } => {
                buf.push(KIND_TOMBSTONE);
                put_str(&mut buf, id);
                put_str(&mut buf, value);
            }
        }

        buf
    }

    /// Serialize the complete frame.
    pub fn serialize(&self) -> Vec<u8> {
        let body = self.serialize_body();
        let frame_length = (4 + body.len() + 4) as u32;

        let mut frame = Vec::with_capacity(frame_length as usize);
        frame.extend_from_slice(&frame_length.to_le_bytes());
        frame.extend_from_slice(&body);
        let checksum = compute_checksum(&frame);
        frame.extend_from_slice(&checksum.to_le_bytes());

        frame
    }

    /// Deserialize one frame from the start of `data`, verifying its checksum.
    ///
    /// Returns the entry and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_FRAME_SIZE {
            return Err(invalid(io::ErrorKind::UnexpectedEof, "Frame too short"));
        }

        let frame_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if frame_length < MIN_FRAME_SIZE {
            return Err(invalid(
                io::ErrorKind::InvalidData,
                format!("Invalid frame length: {}", frame_length),
            ));
        }

        if data.len() < frame_length {
            return Err(invalid(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Frame truncated: expected {} bytes, got {}",
                    frame_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = frame_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        let computed_checksum = compute_checksum(&data[..checksum_offset]);

        if computed_checksum != stored_checksum {
            return Err(invalid(
                io::ErrorKind::InvalidData,
                format!(
                    "Checksum mismatch: computed {:08x}, stored {:08x}",
                    computed_checksum, stored_checksum
                ),
            ));
        }

        let mut body = BodyReader::new(&data[4..checksum_offset]);
        let kind = body.read_u8()?;
        let id = body.read_string()?;
        let value = body.read_string()?;

        let entry = match kind {
            KIND_PUT => LogEntry::Put(read_put(&mut body, id, value)?),
            KIND_TOMBSTONE => LogEntry::Tombstone { id, value },
            other => {
                return Err(invalid(
                    io::ErrorKind::InvalidData,
                    format!("Unknown entry kind: {}", other),
                ))
            }
        };

        body.finish()?;

        Ok((entry, frame_length))
    }
}

fn read_put(body: &mut BodyReader<'_>, id: String, value: String) -> io::Result<StringRecord> {
    let length = body.read_u64()?;
    let is_palindrome = match body.read_u8()? {
        0 => false,
        1 => true,
        other => {
            return Err(invalid(
                io::ErrorKind::InvalidData,
                format!("Invalid palindrome flag: {}", other),
            ))
        }
    };
    let unique_characters = body.read_u64()?;
    let word_count = body.read_u64()?;
    let micros = body.read_i64()?;
    let created_at = DateTime::from_timestamp_micros(micros).ok_or_else(|| {
        invalid(
            io::ErrorKind::InvalidData,
            format!("Timestamp out of range: {}", micros),
        )
    })?;

    let entries = body.read_u32()?;
    let mut character_frequency = CharacterFrequency::new();
    for _ in 0..entries {
        let scalar = body.read_u32()?;
        let c = char::from_u32(scalar).ok_or_else(|| {
            invalid(
                io::ErrorKind::InvalidData,
                format!("Invalid character scalar: {:#x}", scalar),
            )
        })?;
        let count = body.read_u64()?;
        if character_frequency.insert(c, count).is_some() {
            return Err(invalid(
                io::ErrorKind::InvalidData,
                format!("Duplicate frequency entry for {:?}", c),
            ));
        }
    }

    let properties = PropertyBundle {
        length,
        is_palindrome,
        unique_characters,
        word_count,
        sha256_hash: id.clone(),
        character_frequency,
    };

    Ok(StringRecord::from_parts(id, value, properties, created_at))
}

fn put_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

fn invalid(kind: io::ErrorKind, message: impl Into<String>) -> io::Error {
    io::Error::new(kind, message.into())
}

/// Bounds-checked reader over a frame body.
struct BodyReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BodyReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> io::Result<&'a [u8]> {
        let remaining = self.buf.len() - self.pos;
        if n > remaining {
            return Err(invalid(
                io::ErrorKind::UnexpectedEof,
                format!("Field needs {} bytes, {} remaining", n, remaining),
            ));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> io::Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn read_u8(&mut self) -> io::Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    fn read_u32(&mut self) -> io::Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    fn read_u64(&mut self) -> io::Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    fn read_i64(&mut self) -> io::Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    fn read_string(&mut self) -> io::Result<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| invalid(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e)))
    }

    fn finish(&self) -> io::Result<()> {
        if self.pos != self.buf.len() {
            return Err(invalid(
                io::ErrorKind::InvalidData,
                format!("{} trailing bytes in frame", self.buf.len() - self.pos),
            ));
        }
        Ok(())
    }
}
