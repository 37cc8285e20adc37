//! Error types for Vane
//!
//! This module defines all error types used throughout the library.

use crate::protocol::{Opcode, VectorSchema};
use thiserror::Error;

/// Result type alias for Vane operations
pub type Result<T> = std::result::Result<T, VaneError>;

/// Main error type for Vane operations
#[derive(Error, Debug)]
pub enum VaneError {
    /// Feature encoding error
    #[error("Encoding error: {0}")]
    Encode(#[from] EncodeError),

    /// Wire decoding / protocol violation
    #[error("Decoding error: {0}")]
    Decode(#[from] DecodeError),

    /// Transport error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Errors while deriving a feature vector from a snapshot
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The snapshot carries no per-meter power readings
    #[error("Snapshot has no meter readings; average power is undefined")]
    NoMeterReadings,

    /// The snapshot timestamp has no local civil-time representation
    #[error("Timestamp {0} is not representable in local civil time")]
    TimestampOutOfRange(i64),
}

/// Errors while decoding wire bytes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Buffer too short
    #[error("Buffer too short: need at least {needed} bytes, got {available}")]
    BufferTooShort { needed: usize, available: usize },

    /// Byte value outside the opcode enumeration
    #[error("Unknown opcode: 0x{0:02x}")]
    UnknownOpcode(u8),

    /// Vector id outside the schema enumeration
    #[error("Unknown vector schema id: {0}")]
    UnknownSchema(u8),

    /// A known opcode arrived where the protocol does not allow it
    #[error("Unexpected {opcode} opcode in this direction")]
    UnexpectedOpcode { opcode: Opcode },

    /// Payload length does not match what the schema implies
    #[error("Payload length {got} does not match {schema} schema (expected {expected})")]
    LengthMismatch {
        schema: VectorSchema,
        expected: usize,
        got: usize,
    },
}

/// Errors on the TCP link
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection could not be established
    #[error("Failed to connect to {addr}: {source}")]
    ConnectFailed {
        addr: String,
        source: std::io::Error,
    },

    /// Peer closed the connection mid-session
    #[error("Connection closed by peer")]
    ConnectionClosed,

    /// Retry budget for a stalled operation ran out
    #[error("Gave up on {op} after {attempts} stalled attempts")]
    RetryExhausted { op: &'static str, attempts: u32 },

    /// Unrecoverable I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VaneError::Decode(DecodeError::UnknownOpcode(0x7f));
        let msg = format!("{}", err);
        assert!(msg.contains("opcode"));
        assert!(msg.contains("7f"));
    }

    #[test]
    fn test_error_conversion() {
        let decode_err = DecodeError::UnknownSchema(9);
        let err: VaneError = decode_err.into();
        assert!(matches!(err, VaneError::Decode(_)));
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = DecodeError::LengthMismatch {
            schema: VectorSchema::Compact,
            expected: 12,
            got: 8,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("12"));
        assert!(msg.contains("8"));
    }
}
