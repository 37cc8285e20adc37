// Vane Simdata - Deterministic neighborhood dataset simulation
// Copyright (c) 2025 Vane contributors
//
// Licensed under AGPL-3.0. See LICENSE file for details.

//! # Vane Simdata
//!
//! Deterministic simulation of the neighborhood environment/energy dataset
//! the Vane edge client samples: seasonal temperature, correlated humidity,
//! and per-household power draw with weekday/weekend modulation.
//!
//! Snapshots are a pure function of `(seed, timestamp)`, so a run can be
//! replayed bit for bit.
//!
//! ## Quick Start
//!
//! ```rust
//! use vane::dataset::SnapshotSource;
//! use vane_simdata::{SimulatedSite, SiteConfig};
//!
//! let config = SiteConfig::new().with_households(16).with_seed(42);
//! let mut site = SimulatedSite::new(config);
//!
//! let snapshot = site.snapshot(1_609_459_200).unwrap();
//! assert_eq!(snapshot.meter_count(), 16);
//! ```

pub mod config;
pub mod site;

// Re-exports for convenience
pub use config::SiteConfig;
pub use site::SimulatedSite;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
