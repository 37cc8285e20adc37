//! # Vane - Edge feature-vector telemetry
//!
//! Core of an edge client that samples an environment/energy dataset once
//! per simulated day, folds each snapshot into a fixed-format vector of
//! big-endian 32-bit floats, and ships it to a collector over a compact
//! TCP protocol, pacing itself on per-cycle control opcodes.
//!
//! ## Quick Start
//!
//! ```rust
//! use vane::{FeatureEncoder, VectorSchema};
//! use vane::dataset::{HumiditySummary, MeterReading, Snapshot, TemperatureSummary};
//!
//! let snapshot = Snapshot::new(
//!     1_686_830_400,
//!     TemperatureSummary::new(23.25),
//!     HumiditySummary::new(55.5, 48.0),
//!     vec![MeterReading::new(120.0)],
//! );
//!
//! let encoder = FeatureEncoder::new(VectorSchema::Compact);
//! let vector = encoder.encode(&snapshot).unwrap();
//! assert_eq!(vector.len(), VectorSchema::Compact.payload_len());
//! ```
//!
//! ## Modules
//!
//! - [`codec`]: big-endian cursor codec and hex dump
//! - [`protocol`]: opcodes, vector schemas, data-frame framing
//! - [`dataset`]: snapshot model and the provider seam
//! - [`features`]: snapshot-to-vector encoder
//! - [`link`]: one-session transport with framed send / control receive
//! - [`retry`]: stall retry policy for the transport loops
//! - [`controller`]: the fetch/encode/send/control run loop

// Modules
pub mod codec;
pub mod controller;
pub mod dataset;
pub mod error;
pub mod features;
pub mod link;
pub mod protocol;
pub mod retry;

// Re-exports for convenient access
pub use codec::{hex_dump, ByteReader, ByteWriter};
pub use controller::{Controller, RunState, DAY_SECS, SIMULATION_EPOCH};
pub use dataset::{Snapshot, SnapshotSource};
pub use error::{DecodeError, EncodeError, Result, TransportError, VaneError};
pub use features::{discomfort_index, FeatureEncoder, FeatureVector};
pub use link::{Link, MemoryTransport};
pub use protocol::{Control, DataFrame, Opcode, VectorSchema};
pub use retry::RetryPolicy;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::{HumiditySummary, MeterReading, TemperatureSummary};

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_encode_frame_roundtrip() {
        let snapshot = Snapshot::new(
            1_686_830_400,
            TemperatureSummary::new(30.0),
            HumiditySummary::new(90.0, 60.0),
            vec![MeterReading::new(42.0)],
        );

        let vector = FeatureEncoder::new(VectorSchema::Discomfort)
            .encode(&snapshot)
            .unwrap();
        let bytes = vector.clone().into_frame().to_bytes();
        let frame = DataFrame::from_bytes(&bytes).unwrap();

        assert_eq!(frame.schema, VectorSchema::Discomfort);
        assert_eq!(frame.payload, vector.as_bytes());
    }
}
