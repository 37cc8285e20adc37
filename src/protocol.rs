//! Protocol definitions for Vane
//!
//! This module defines the core types of the collector protocol:
//! - Opcodes shared with the collector
//! - Vector schemas and their implied payload lengths
//! - Data-frame framing
//!
//! All multi-byte quantities on the wire are big-endian. The outbound data
//! frame carries no length field: the collector derives the payload length
//! from the vector id, so both ends must agree on the schema table.

use crate::codec::{ByteReader, ByteWriter};
use crate::error::DecodeError;
use std::fmt;

/// Data-frame header size: opcode + vector id
pub const FRAME_HEADER_SIZE: usize = 2;

/// Largest possible data frame (header + full-schema payload)
pub const MAX_FRAME_SIZE: usize = FRAME_HEADER_SIZE + 20;

/// Operation codes shared by both ends of the link.
///
/// The numeric values are the wire contract with the collector and must not
/// be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Feature-vector payload follows (client to collector)
    Data = 1,
    /// Idle byte; the client keeps polling (collector to client)
    Wait = 2,
    /// Cycle accepted; advance to the next simulated day
    Done = 3,
    /// Stop the run loop
    Quit = 4,
}

impl Opcode {
    /// Convert from the wire byte
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Opcode::Data),
            2 => Some(Opcode::Wait),
            3 => Some(Opcode::Done),
            4 => Some(Opcode::Quit),
            _ => None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::Data => write!(f, "DATA"),
            Opcode::Wait => write!(f, "WAIT"),
            Opcode::Done => write!(f, "DONE"),
            Opcode::Quit => write!(f, "QUIT"),
        }
    }
}

/// Selector fixing which derived fields are sent and the payload length.
///
/// Immutable once chosen for a run; both ends key the payload layout off
/// the one-byte vector id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum VectorSchema {
    /// `[discomfort_index, avg_power]` - 8 bytes
    Discomfort = 0,
    /// `[max_temp, avg_humidity, avg_power]` - 12 bytes
    Compact = 1,
    /// `[max_humidity, max_temp, month, year, avg_power]` - 20 bytes
    #[default]
    Full = 2,
}

impl VectorSchema {
    /// Convert from the wire vector id
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(VectorSchema::Discomfort),
            1 => Some(VectorSchema::Compact),
            2 => Some(VectorSchema::Full),
            _ => None,
        }
    }

    /// Number of feature fields this schema emits
    pub const fn field_count(self) -> usize {
        match self {
            VectorSchema::Discomfort => 2,
            VectorSchema::Compact => 3,
            VectorSchema::Full => 5,
        }
    }

    /// Payload length in bytes (four per field, no padding)
    pub const fn payload_len(self) -> usize {
        self.field_count() * 4
    }
}

impl fmt::Display for VectorSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorSchema::Discomfort => write!(f, "discomfort (2D)"),
            VectorSchema::Compact => write!(f, "compact (3D)"),
            VectorSchema::Full => write!(f, "full (5D)"),
        }
    }
}

/// Terminal control instruction from the collector.
///
/// A control read absorbs any number of WAIT bytes and resolves to exactly
/// one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Proceed to the next cycle
    Done,
    /// Terminate the run loop
    Quit,
}

impl Control {
    /// Map a terminal opcode to its control meaning
    pub fn from_opcode(opcode: Opcode) -> Option<Self> {
        match opcode {
            Opcode::Done => Some(Control::Done),
            Opcode::Quit => Some(Control::Quit),
            Opcode::Data | Opcode::Wait => None,
        }
    }
}

/// One outbound data message: `opcode(1) | vector_id(1) | payload(N)`.
///
/// N is implied by the vector id; there is no explicit length field in this
/// direction.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    /// Schema the payload was derived under
    pub schema: VectorSchema,
    /// Big-endian f32 feature fields, `schema.payload_len()` bytes
    pub payload: Vec<u8>,
}

impl DataFrame {
    /// Create a frame, rejecting a payload whose length contradicts the schema
    pub fn new(schema: VectorSchema, payload: Vec<u8>) -> Result<Self, DecodeError> {
        if payload.len() != schema.payload_len() {
            return Err(DecodeError::LengthMismatch {
                schema,
                expected: schema.payload_len(),
                got: payload.len(),
            });
        }
        Ok(Self { schema, payload })
    }

    /// Total frame size in bytes
    pub fn len(&self) -> usize {
        FRAME_HEADER_SIZE + self.payload.len()
    }

    /// A frame always carries at least its header
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Serialize into one contiguous buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = ByteWriter::with_capacity(self.len());
        w.put_u8(Opcode::Data as u8);
        w.put_u8(self.schema as u8);
        w.put_bytes(&self.payload);
        w.into_bytes()
    }

    /// Parse a frame, enforcing the length the vector id implies.
    ///
    /// Receiver-side counterpart of [`DataFrame::to_bytes`]; a schema-table
    /// divergence between the two ends fails here rather than silently
    /// misaligning the field decode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut r = ByteReader::new(bytes);
        let opcode_byte = r.take_u8()?;
        let opcode = Opcode::from_u8(opcode_byte).ok_or(DecodeError::UnknownOpcode(opcode_byte))?;
        if opcode != Opcode::Data {
            return Err(DecodeError::UnexpectedOpcode { opcode });
        }

        let vector_id = r.take_u8()?;
        let schema = VectorSchema::from_u8(vector_id).ok_or(DecodeError::UnknownSchema(vector_id))?;

        if r.remaining() != schema.payload_len() {
            return Err(DecodeError::LengthMismatch {
                schema,
                expected: schema.payload_len(),
                got: r.remaining(),
            });
        }

        let payload = bytes[FRAME_HEADER_SIZE..].to_vec();
        Ok(Self { schema, payload })
    }

    /// Decode the payload back into its f32 fields
    pub fn fields(&self) -> Vec<f32> {
        let mut r = ByteReader::new(&self.payload);
        let mut out = Vec::with_capacity(self.schema.field_count());
        while let Ok(v) = r.take_f32() {
            out.push(v);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_values() {
        // Shared with the collector; renumbering breaks the wire contract
        assert_eq!(Opcode::Data as u8, 1);
        assert_eq!(Opcode::Wait as u8, 2);
        assert_eq!(Opcode::Done as u8, 3);
        assert_eq!(Opcode::Quit as u8, 4);
    }

    #[test]
    fn test_opcode_roundtrip() {
        for op in [Opcode::Data, Opcode::Wait, Opcode::Done, Opcode::Quit] {
            assert_eq!(Opcode::from_u8(op as u8), Some(op));
        }
        assert_eq!(Opcode::from_u8(0), None);
        assert_eq!(Opcode::from_u8(5), None);
    }

    #[test]
    fn test_schema_lengths() {
        assert_eq!(VectorSchema::Discomfort.payload_len(), 8);
        assert_eq!(VectorSchema::Compact.payload_len(), 12);
        assert_eq!(VectorSchema::Full.payload_len(), 20);
        assert_eq!(VectorSchema::Full.field_count(), 5);
    }

    #[test]
    fn test_schema_from_u8() {
        assert_eq!(VectorSchema::from_u8(0), Some(VectorSchema::Discomfort));
        assert_eq!(VectorSchema::from_u8(1), Some(VectorSchema::Compact));
        assert_eq!(VectorSchema::from_u8(2), Some(VectorSchema::Full));
        assert_eq!(VectorSchema::from_u8(3), None);
    }

    #[test]
    fn test_default_schema_is_full() {
        // The original edge device defaulted to the 5D vector
        assert_eq!(VectorSchema::default(), VectorSchema::Full);
    }

    #[test]
    fn test_control_from_opcode() {
        assert_eq!(Control::from_opcode(Opcode::Done), Some(Control::Done));
        assert_eq!(Control::from_opcode(Opcode::Quit), Some(Control::Quit));
        assert_eq!(Control::from_opcode(Opcode::Wait), None);
        assert_eq!(Control::from_opcode(Opcode::Data), None);
    }

    #[test]
    fn test_frame_layout() {
        let payload = vec![0u8; 12];
        let frame = DataFrame::new(VectorSchema::Compact, payload).unwrap();
        let bytes = frame.to_bytes();

        assert_eq!(bytes.len(), 14);
        assert_eq!(bytes[0], Opcode::Data as u8);
        assert_eq!(bytes[1], VectorSchema::Compact as u8);
    }

    #[test]
    fn test_frame_roundtrip() {
        let payload: Vec<u8> = (0u8..20).collect();
        let frame = DataFrame::new(VectorSchema::Full, payload).unwrap();
        let restored = DataFrame::from_bytes(&frame.to_bytes()).unwrap();
        assert_eq!(restored, frame);
    }

    #[test]
    fn test_frame_rejects_wrong_length() {
        let err = DataFrame::new(VectorSchema::Discomfort, vec![0u8; 12]).unwrap_err();
        assert!(matches!(err, DecodeError::LengthMismatch { expected: 8, got: 12, .. }));
    }

    #[test]
    fn test_frame_rejects_non_data_opcode() {
        let mut bytes = vec![Opcode::Wait as u8, 2];
        bytes.extend_from_slice(&[0u8; 20]);
        let err = DataFrame::from_bytes(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::UnexpectedOpcode { opcode: Opcode::Wait });
    }

    #[test]
    fn test_frame_rejects_unknown_schema() {
        let bytes = vec![Opcode::Data as u8, 7, 0, 0, 0, 0];
        let err = DataFrame::from_bytes(&bytes).unwrap_err();
        assert_eq!(err, DecodeError::UnknownSchema(7));
    }

    #[test]
    fn test_frame_rejects_truncated_payload() {
        let mut bytes = vec![Opcode::Data as u8, VectorSchema::Full as u8];
        bytes.extend_from_slice(&[0u8; 8]); // full schema implies 20
        let err = DataFrame::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::LengthMismatch { expected: 20, got: 8, .. }));
    }

    #[test]
    fn test_frame_fields_decode() {
        let mut w = ByteWriter::with_capacity(8);
        w.put_f32(1.5);
        w.put_f32(-2.25);
        let frame = DataFrame::new(VectorSchema::Discomfort, w.into_bytes()).unwrap();
        assert_eq!(frame.fields(), vec![1.5, -2.25]);
    }
}
