// Vane Simdata - Site configuration
// Copyright (c) 2025 Vane contributors
//
// Licensed under AGPL-3.0. See LICENSE file for details.

//! Site configuration.

use serde::{Deserialize, Serialize};

/// Parameters of one simulated neighborhood site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Number of metered households.
    pub households: usize,
    /// Random seed; snapshots are deterministic per `(seed, timestamp)`.
    pub seed: u64,
    /// Annual mean temperature, degrees Celsius.
    pub mean_temp: f32,
    /// Seasonal amplitude around the annual mean, degrees Celsius.
    pub seasonal_swing: f32,
    /// Typical average relative humidity, percent.
    pub base_humidity: f32,
    /// Baseline daily consumption per household, kWh.
    pub base_load_kwh: f32,
    /// Standard deviation of per-household consumption, kWh.
    pub load_spread: f32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            households: 24,
            seed: 42,
            mean_temp: 14.0,
            seasonal_swing: 10.0,
            base_humidity: 65.0,
            base_load_kwh: 9.5,
            load_spread: 2.0,
        }
    }
}

impl SiteConfig {
    /// Create a config with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the household count.
    pub fn with_households(mut self, households: usize) -> Self {
        self.households = households;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the annual mean temperature.
    pub fn with_mean_temp(mut self, mean_temp: f32) -> Self {
        self.mean_temp = mean_temp;
        self
    }

    /// Set the seasonal temperature amplitude.
    pub fn with_seasonal_swing(mut self, swing: f32) -> Self {
        self.seasonal_swing = swing;
        self
    }

    /// Set the typical average humidity.
    pub fn with_base_humidity(mut self, humidity: f32) -> Self {
        self.base_humidity = humidity;
        self
    }

    /// Set the baseline household consumption.
    pub fn with_base_load(mut self, kwh: f32) -> Self {
        self.base_load_kwh = kwh;
        self
    }

    /// Set the per-household consumption spread.
    pub fn with_load_spread(mut self, spread: f32) -> Self {
        self.load_spread = spread;
        self
    }
}
