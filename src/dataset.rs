// Vane - Edge feature-vector telemetry
// Copyright (c) 2025 Vane contributors
//
// Licensed under AGPL-3.0. See LICENSE file for details.

//! Snapshot data model
//!
//! The shape of one dataset reading set as the encoder consumes it. How the
//! readings are acquired is the provider's business; this crate only fixes
//! the aggregate fields the feature vectors are derived from.

use crate::error::Result;

/// Aggregate temperature readings for one snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureSummary {
    /// Daily maximum, degrees Celsius
    pub max: f32,
}

impl TemperatureSummary {
    /// Create a temperature summary
    pub fn new(max: f32) -> Self {
        Self { max }
    }
}

/// Aggregate humidity readings for one snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumiditySummary {
    /// Daily maximum, percent relative humidity
    pub max: f32,
    /// Daily average, percent relative humidity
    pub average: f32,
}

impl HumiditySummary {
    /// Create a humidity summary
    pub fn new(max: f32, average: f32) -> Self {
        Self { max, average }
    }
}

/// One metered household's power reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterReading {
    /// Consumed power, kWh
    pub power: f32,
}

impl MeterReading {
    /// Create a meter reading
    pub fn new(power: f32) -> Self {
        Self { power }
    }
}

/// One dataset reading set for a single simulated timestamp.
///
/// Produced fresh by the provider for each simulated day, owned by the
/// controller for one cycle, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Unix timestamp the readings belong to
    pub timestamp: i64,
    /// Aggregate temperature
    pub temperature: TemperatureSummary,
    /// Aggregate humidity
    pub humidity: HumiditySummary,
    /// Per-household power readings; the feature contract requires at least one
    pub meters: Vec<MeterReading>,
}

impl Snapshot {
    /// Create a snapshot
    pub fn new(
        timestamp: i64,
        temperature: TemperatureSummary,
        humidity: HumiditySummary,
        meters: Vec<MeterReading>,
    ) -> Self {
        Self {
            timestamp,
            temperature,
            humidity,
            meters,
        }
    }

    /// Number of metered households in this snapshot
    pub fn meter_count(&self) -> usize {
        self.meters.len()
    }
}

/// Provider of dataset snapshots, keyed by simulated timestamp.
///
/// The run loop treats the call as synchronous and total; a provider that
/// cannot produce a snapshot surfaces a typed error and stops the run.
pub trait SnapshotSource {
    /// Produce the reading set for `timestamp`
    fn snapshot(&mut self, timestamp: i64) -> Result<Snapshot>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_construction() {
        let snap = Snapshot::new(
            1_609_459_200,
            TemperatureSummary::new(23.5),
            HumiditySummary::new(80.0, 61.5),
            vec![MeterReading::new(10.0), MeterReading::new(12.0)],
        );
        assert_eq!(snap.meter_count(), 2);
        assert_eq!(snap.temperature.max, 23.5);
        assert_eq!(snap.humidity.average, 61.5);
    }
}
