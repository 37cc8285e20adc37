// Vane Simdata - Simulated site
// Copyright (c) 2025 Vane contributors
//
// Licensed under AGPL-3.0. See LICENSE file for details.

//! Simulated neighborhood site.
//!
//! Produces one [`Snapshot`] per simulated day: daily maximum temperature
//! follows a seasonal sine around the configured annual mean, humidity runs
//! inversely to temperature, and each household draws a noisy baseline load
//! plus heating/cooling demand. Weekends draw more than weekdays.

use crate::config::SiteConfig;
use chrono::{Datelike, TimeZone, Utc, Weekday};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use vane::dataset::{HumiditySummary, MeterReading, Snapshot, SnapshotSource, TemperatureSummary};
use vane::error::{EncodeError, Result};

// Day of year when the seasonal cycle peaks (mid July)
const SEASON_PEAK_DOY: f32 = 196.0;

// Weekend consumption multiplier
const WEEKEND_FACTOR: f32 = 1.12;

// Heating/cooling demand per degree outside the comfort band, kWh
const HEATING_KWH_PER_DEG: f32 = 0.35;
const COOLING_KWH_PER_DEG: f32 = 0.25;
const HEATING_BELOW: f32 = 18.0;
const COOLING_ABOVE: f32 = 24.0;

/// Deterministic snapshot provider for one simulated neighborhood.
#[derive(Debug, Clone)]
pub struct SimulatedSite {
    config: SiteConfig,
}

impl SimulatedSite {
    /// Create a site from its configuration.
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    /// The site configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    // One independent RNG per (seed, timestamp); replaying a day replays
    // its readings.
    fn rng_for(&self, timestamp: i64) -> StdRng {
        let mixed = self
            .config
            .seed
            .wrapping_add((timestamp as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15));
        StdRng::seed_from_u64(mixed)
    }

    fn seasonal_mean(&self, day_of_year: f32) -> f32 {
        let phase = (day_of_year - SEASON_PEAK_DOY) / 365.25 * std::f32::consts::TAU;
        self.config.mean_temp + self.config.seasonal_swing * phase.cos()
    }
}

impl SnapshotSource for SimulatedSite {
    fn snapshot(&mut self, timestamp: i64) -> Result<Snapshot> {
        let date = Utc
            .timestamp_opt(timestamp, 0)
            .single()
            .ok_or(EncodeError::TimestampOutOfRange(timestamp))?;
        let mut rng = self.rng_for(timestamp);

        let day_mean = self.seasonal_mean(date.ordinal() as f32);
        let temp_noise = Normal::new(0.0f32, 1.2).unwrap();
        let max_temp = day_mean + 4.0 + temp_noise.sample(&mut rng);

        // Hotter days run drier
        let avg_humidity = (self.config.base_humidity - 0.8 * (max_temp - self.config.mean_temp)
            + temp_noise.sample(&mut rng))
        .clamp(20.0, 95.0);
        let max_humidity = (avg_humidity + 15.0 + temp_noise.sample(&mut rng).abs()).min(100.0);

        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let day_factor = if weekend { WEEKEND_FACTOR } else { 1.0 };
        let hvac = HEATING_KWH_PER_DEG * (HEATING_BELOW - day_mean).max(0.0)
            + COOLING_KWH_PER_DEG * (day_mean - COOLING_ABOVE).max(0.0);

        let load_noise = Normal::new(0.0f32, self.config.load_spread).unwrap();
        let meters = (0..self.config.households)
            .map(|_| {
                let draw = (self.config.base_load_kwh * day_factor + hvac
                    + load_noise.sample(&mut rng))
                .max(0.2);
                MeterReading::new(draw)
            })
            .collect();

        Ok(Snapshot::new(
            timestamp,
            TemperatureSummary::new(max_temp),
            HumiditySummary::new(max_humidity, avg_humidity),
            meters,
        ))
    }
}
