//! Container payload decoding
//!
//! `Data3` payloads are protobuf messages. We never need the field bodies, so
//! the decoder walks the top-level wire format and records which fields occur.

use crate::container::message::{Data3Message, PayloadContents};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

/// Field number of the dense voxel grid in a `Data3` message.
pub const DEFAULT_VOXEL_FIELD: u32 = 1;
/// Field number of the sparse voxel grid in a `Data3` message.
pub const DEFAULT_SPARSE_VOXEL_FIELD: u32 = 2;

const MAX_FIELD_NUMBER: u64 = (1 << 29) - 1;
const MAX_VARINT_BYTES: usize = 10;

/// Errors produced while decoding a container payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("payload truncated at byte {offset}")]
    Truncated { offset: usize },

    #[error("varint longer than 10 bytes at byte {offset}")]
    VarintOverflow { offset: usize },

    #[error("invalid field number {field} at byte {offset}")]
    InvalidField { field: u64, offset: usize },

    #[error("unsupported wire type {wire_type} for field {field} at byte {offset}")]
    UnsupportedWireType {
        wire_type: u8,
        field: u32,
        offset: usize,
    },
}

/// Turns raw container bytes into something that can answer content queries.
pub trait PayloadDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Box<dyn PayloadContents>, DecodeError>;
}

/// Decoder for `Data3` protobuf containers.
#[derive(Debug, Clone, Copy)]
pub struct Data3Decoder {
    voxel_field: u32,
    sparse_voxel_field: u32,
}

impl Data3Decoder {
    pub fn new() -> Self {
        Self {
            voxel_field: DEFAULT_VOXEL_FIELD,
            sparse_voxel_field: DEFAULT_SPARSE_VOXEL_FIELD,
        }
    }

    /// Use different field numbers for the voxel and sparse-voxel bodies.
    pub fn with_fields(mut self, voxel_field: u32, sparse_voxel_field: u32) -> Self {
        self.voxel_field = voxel_field;
        self.sparse_voxel_field = sparse_voxel_field;
        self
    }

    /// Decode a payload into its top-level field summary.
    pub fn decode_message(&self, bytes: &[u8]) -> Result<Data3Message, DecodeError> {
        let mut cursor = 0usize;
        let mut present = BTreeSet::new();

        while cursor < bytes.len() {
            let key_offset = cursor;
            let key = read_varint(bytes, &mut cursor)?;
            let field = key >> 3;
            if field == 0 || field > MAX_FIELD_NUMBER {
                return Err(DecodeError::InvalidField {
                    field,
                    offset: key_offset,
                });
            }
            let field = field as u32;

            match (key & 0x7) as u8 {
                0 => {
                    read_varint(bytes, &mut cursor)?;
                }
                1 => skip(bytes, &mut cursor, 8)?,
                2 => {
                    let len = read_varint(bytes, &mut cursor)?;
                    let len = usize::try_from(len)
                        .map_err(|_| DecodeError::Truncated { offset: cursor })?;
                    skip(bytes, &mut cursor, len)?;
                }
                5 => skip(bytes, &mut cursor, 4)?,
                wire_type => {
                    return Err(DecodeError::UnsupportedWireType {
                        wire_type,
                        field,
                        offset: key_offset,
                    });
                }
            }

            present.insert(field);
        }

        debug!(
            "Decoded container payload: {} bytes, fields {:?}",
            bytes.len(),
            present
        );

        Ok(Data3Message::new(
            present,
            self.voxel_field,
            self.sparse_voxel_field,
        ))
    }
}

impl Default for Data3Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadDecoder for Data3Decoder {
    fn decode(&self, bytes: &[u8]) -> Result<Box<dyn PayloadContents>, DecodeError> {
        Ok(Box::new(self.decode_message(bytes)?))
    }
}

fn read_varint(bytes: &[u8], cursor: &mut usize) -> Result<u64, DecodeError> {
    let start = *cursor;
    let mut value = 0u64;
    for i in 0..MAX_VARINT_BYTES {
        let Some(&byte) = bytes.get(start + i) else {
            return Err(DecodeError::Truncated { offset: start + i });
        };
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            *cursor = start + i + 1;
            return Ok(value);
        }
    }
    Err(DecodeError::VarintOverflow { offset: start })
}

fn skip(bytes: &[u8], cursor: &mut usize, len: usize) -> Result<(), DecodeError> {
    let end = cursor
        .checked_add(len)
        .filter(|end| *end <= bytes.len())
        .ok_or(DecodeError::Truncated { offset: bytes.len() })?;
    *cursor = end;
    Ok(())
}
