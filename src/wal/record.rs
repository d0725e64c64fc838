//! Journal record types and binary layout
//!
//! Each journal record contains:
//! - Record Length (u32 LE), total length including this field
//! - Record Type (u8): CREATE / UPDATE / DELETE / TOGGLE_LIKE / TOGGLE_RETWEET
//! - Sequence Number (u64 LE)
//! - Payload (variable)
//! - Checksum (u32 LE), CRC32 over everything before it
//!
//! Payload:
//! - Caller (u32 LE length + UTF-8 bytes)
//! - Record id (u64 LE); for CREATE, the id the creation was assigned
//! - Text (u32 LE length + UTF-8 bytes); empty unless CREATE or UPDATE

use std::io::{self, Cursor, Read};

use crate::record::{CallerId, RecordId};
use crate::store::{Mutation, ToggleKind};

use super::checksum::compute_checksum;

/// Journal record types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RecordType {
    /// Record creation
    Create = 0,
    /// Text replacement (full text, not a delta)
    Update = 1,
    /// Soft delete
    Delete = 2,
    /// Like toggle
    ToggleLike = 3,
    /// Retweet toggle
    ToggleRetweet = 4,
}

impl RecordType {
    /// Convert from u8, returns None for invalid values
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(RecordType::Create),
            1 => Some(RecordType::Update),
            2 => Some(RecordType::Delete),
            3 => Some(RecordType::ToggleLike),
            4 => Some(RecordType::ToggleRetweet),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordType::Create => "CREATE",
            RecordType::Update => "UPDATE",
            RecordType::Delete => "DELETE",
            RecordType::ToggleLike => "TOGGLE_LIKE",
            RecordType::ToggleRetweet => "TOGGLE_RETWEET",
        }
    }
}

/// Journal payload: who did what to which record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalPayload {
    /// Caller identity the call was attributed to
    pub caller: String,
    /// Target record id (assigned id for CREATE)
    pub record_id: u64,
    /// Post-operation text for CREATE / UPDATE, empty otherwise
    pub text: String,
}

impl WalPayload {
    pub fn new(caller: impl Into<String>, record_id: u64, text: impl Into<String>) -> Self {
        Self {
            caller: caller.into(),
            record_id,
            text: text.into(),
        }
    }

    /// Payload without text, for deletes and toggles
    pub fn bare(caller: impl Into<String>, record_id: u64) -> Self {
        Self::new(caller, record_id, String::new())
    }

    /// Serialize payload to bytes
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.caller.len() + 8 + 4 + self.text.len());

        buf.extend_from_slice(&(self.caller.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.caller.as_bytes());

        buf.extend_from_slice(&self.record_id.to_le_bytes());

        buf.extend_from_slice(&(self.text.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.text.as_bytes());

        buf
    }

    /// Deserialize payload from bytes. Trailing bytes are an error.
    pub fn deserialize(data: &[u8]) -> io::Result<Self> {
        fn read_string<R: Read>(reader: &mut R) -> io::Result<String> {
            let mut len_buf = [0u8; 4];
            reader.read_exact(&mut len_buf)?;
            let len = u32::from_le_bytes(len_buf) as usize;

            let mut buf = vec![0u8; len];
            reader.read_exact(&mut buf)?;

            String::from_utf8(buf).map_err(|e| {
                io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e))
            })
        }

        let mut cursor = Cursor::new(data);

        let caller = read_string(&mut cursor)?;

        let mut id_buf = [0u8; 8];
        cursor.read_exact(&mut id_buf)?;
        let record_id = u64::from_le_bytes(id_buf);

        let text = read_string(&mut cursor)?;

        if cursor.position() as usize != data.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Trailing payload bytes: {} unread",
                    data.len() - cursor.position() as usize
                ),
            ));
        }

        Ok(Self {
            caller,
            record_id,
            text,
        })
    }
}

/// Complete journal record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalRecord {
    pub record_type: RecordType,
    /// Strictly consecutive, starting at 1
    pub sequence_number: u64,
    pub payload: WalPayload,
}

impl WalRecord {
    pub fn new(record_type: RecordType, sequence_number: u64, payload: WalPayload) -> Self {
        Self {
            record_type,
            sequence_number,
            payload,
        }
    }

    /// Encode an accepted mutation.
    ///
    /// `assigned` is the id a CREATE receives; it is ignored for the
    /// other types, which carry their own target.
    pub fn from_mutation(sequence_number: u64, mutation: &Mutation, assigned: RecordId) -> Self {
        let (record_type, payload) = match mutation {
            Mutation::Create { caller, text } => (
                RecordType::Create,
                WalPayload::new(caller.as_str(), assigned.value(), text.as_str()),
            ),
            Mutation::Update { caller, id, text } => (
                RecordType::Update,
                WalPayload::new(caller.as_str(), id.value(), text.as_str()),
            ),
            Mutation::Delete { caller, id } => {
                (RecordType::Delete, WalPayload::bare(caller.as_str(), id.value()))
            }
            Mutation::Toggle { caller, id, kind } => {
                let record_type = match kind {
                    ToggleKind::Like => RecordType::ToggleLike,
                    ToggleKind::Retweet => RecordType::ToggleRetweet,
                };
                (record_type, WalPayload::bare(caller.as_str(), id.value()))
            }
        };
        Self::new(record_type, sequence_number, payload)
    }

    /// Decode back into the mutation that produced this record.
    pub fn to_mutation(&self) -> Mutation {
        let caller = CallerId::new(self.payload.caller.clone());
        let id = RecordId::new(self.payload.record_id);
        match self.record_type {
            RecordType::Create => Mutation::Create {
                caller,
                text: self.payload.text.clone(),
            },
            RecordType::Update => Mutation::Update {
                caller,
                id,
                text: self.payload.text.clone(),
            },
            RecordType::Delete => Mutation::Delete { caller, id },
            RecordType::ToggleLike => Mutation::Toggle {
                caller,
                id,
                kind: ToggleKind::Like,
            },
            RecordType::ToggleRetweet => Mutation::Toggle {
                caller,
                id,
                kind: ToggleKind::Retweet,
            },
        }
    }

    /// Record type, sequence number and payload: the checksummed body
    /// minus the length prefix.
    fn serialize_body(&self) -> Vec<u8> {
        let payload_bytes = self.payload.serialize();
        let mut buf = Vec::with_capacity(1 + 8 + payload_bytes.len());

        buf.push(self.record_type.as_u8());
        buf.extend_from_slice(&self.sequence_number.to_le_bytes());
        buf.extend_from_slice(&payload_bytes);

        buf
    }

    /// Serialize the complete record to bytes
    pub fn serialize(&self) -> Vec<u8> {
        let body = self.serialize_body();

        let record_length = (4 + body.len() + 4) as u32;

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());
        record.extend_from_slice(&body);

        // Checksum covers length field + body
        let checksum = compute_checksum(&record);
        record.extend_from_slice(&checksum.to_le_bytes());

        record
    }

    /// Deserialize a record from bytes, verifying checksum.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Record too short",
            ));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid record length: {}", record_length),
            ));
        }

        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);

        let computed_checksum = compute_checksum(&data[0..checksum_offset]);
        if computed_checksum != stored_checksum {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Checksum mismatch: computed {:08x}, stored {:08x}",
                    computed_checksum, stored_checksum
                ),
            ));
        }

        let record_type_byte = data[4];
        let record_type = RecordType::from_u8(record_type_byte).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid record type: {}", record_type_byte),
            )
        })?;

        let mut seq_buf = [0u8; 8];
        seq_buf.copy_from_slice(&data[5..13]);
        let sequence_number = u64::from_le_bytes(seq_buf);

        let payload = WalPayload::deserialize(&data[13..checksum_offset])?;

        Ok((
            WalRecord {
                record_type,
                sequence_number,
                payload,
            },
            record_length,
        ))
    }
}

/// len + type + seq + (caller len + id + text len) + checksum
pub const MIN_RECORD_SIZE: usize = 4 + 1 + 8 + (4 + 8 + 4) + 4;
