//! Feature encoding
//!
//! Reduces one dataset snapshot to a fixed-format vector of 32-bit floats
//! under the configured [`VectorSchema`]. Field order is part of the wire
//! contract and must not change.

use crate::codec::{ByteReader, ByteWriter};
use crate::dataset::Snapshot;
use crate::error::EncodeError;
use crate::protocol::{DataFrame, VectorSchema};
use chrono::{Datelike, Local, TimeZone};

// Discomfort-index coefficients; fixed domain constants, not configuration.
const DI_TEMP_WEIGHT: f32 = 0.81;
const DI_CROSS_WEIGHT: f32 = 0.01;
const DI_TEMP_SCALE: f32 = 0.99;
const DI_TEMP_BIAS: f32 = 14.3;
const DI_OFFSET: f32 = 46.3;

/// Discomfort index from max temperature (degrees C) and average relative
/// humidity (percent).
pub fn discomfort_index(max_temp: f32, avg_humidity: f32) -> f32 {
    DI_TEMP_WEIGHT * max_temp
        + DI_CROSS_WEIGHT * avg_humidity * (DI_TEMP_SCALE * max_temp - DI_TEMP_BIAS)
        + DI_OFFSET
}

/// One encoded feature payload, ready for framing.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    schema: VectorSchema,
    bytes: Vec<u8>,
}

impl FeatureVector {
    /// Schema the vector was derived under
    pub fn schema(&self) -> VectorSchema {
        self.schema
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// A feature vector always carries at least two fields
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The big-endian payload bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decode the payload back into its f32 fields
    pub fn fields(&self) -> Vec<f32> {
        let mut r = ByteReader::new(&self.bytes);
        let mut out = Vec::with_capacity(self.schema.field_count());
        while let Ok(v) = r.take_f32() {
            out.push(v);
        }
        out
    }

    /// Wrap the payload in a data frame
    pub fn into_frame(self) -> DataFrame {
        // Length always matches by construction
        DataFrame {
            schema: self.schema,
            payload: self.bytes,
        }
    }
}

/// Maps a snapshot to a feature payload under one fixed schema.
#[derive(Debug, Clone, Copy)]
pub struct FeatureEncoder {
    schema: VectorSchema,
}

impl FeatureEncoder {
    /// Create an encoder for `schema`
    pub fn new(schema: VectorSchema) -> Self {
        Self { schema }
    }

    /// The configured schema
    pub fn schema(&self) -> VectorSchema {
        self.schema
    }

    /// Derive the feature vector for one snapshot.
    ///
    /// Pure function of its inputs except for the month/year fields, which
    /// come from the snapshot timestamp interpreted in local civil time.
    /// Requires at least one meter reading; the input is never mutated.
    pub fn encode(&self, snapshot: &Snapshot) -> Result<FeatureVector, EncodeError> {
        let local = Local
            .timestamp_opt(snapshot.timestamp, 0)
            .single()
            .ok_or(EncodeError::TimestampOutOfRange(snapshot.timestamp))?;
        let month = local.month() as f32;
        let year = local.year() as f32;
        log::debug!("month: {}, year: {}", month, year);

        let max_temp = snapshot.temperature.max;
        let max_humidity = snapshot.humidity.max;
        let avg_humidity = snapshot.humidity.average;

        if snapshot.meters.is_empty() {
            return Err(EncodeError::NoMeterReadings);
        }
        let power_sum: f32 = snapshot.meters.iter().map(|m| m.power).sum();
        let avg_power = power_sum / snapshot.meters.len() as f32;

        let mut w = ByteWriter::with_capacity(self.schema.payload_len());
        match self.schema {
            VectorSchema::Full => {
                w.put_f32(max_humidity);
                w.put_f32(max_temp);
                w.put_f32(month);
                w.put_f32(year);
                w.put_f32(avg_power);
            }
            VectorSchema::Compact => {
                w.put_f32(max_temp);
                w.put_f32(avg_humidity);
                w.put_f32(avg_power);
            }
            VectorSchema::Discomfort => {
                w.put_f32(discomfort_index(max_temp, avg_humidity));
                w.put_f32(avg_power);
            }
        }

        debug_assert_eq!(w.len(), self.schema.payload_len());
        Ok(FeatureVector {
            schema: self.schema,
            bytes: w.into_bytes(),
        })
    }
}
