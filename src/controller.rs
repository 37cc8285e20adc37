// Vane - Edge feature-vector telemetry
// Copyright (c) 2025 Vane contributors
//
// Licensed under AGPL-3.0. See LICENSE file for details.

//! Run-loop controller
//!
//! Drives one sampling period per iteration: fetch a snapshot for the
//! simulated clock, encode it, transmit it, then block for the collector's
//! control opcode. DONE advances the clock one simulated day; QUIT stops
//! the loop. Strictly sequential; the link's blocking calls are the only
//! suspension points.

use crate::dataset::SnapshotSource;
use crate::error::Result;
use crate::features::FeatureEncoder;
use crate::link::Link;
use crate::protocol::{Control, VectorSchema};
use std::io::{Read, Write};

/// First simulated timestamp: 2021-01-01T00:00:00Z
pub const SIMULATION_EPOCH: i64 = 1_609_459_200;

/// One simulated day in seconds
pub const DAY_SECS: i64 = 86_400;

/// Controller lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Cycling: fetch, encode, send, await control
    #[default]
    Running,
    /// Terminal; entered when the collector sends QUIT
    Stopped,
}

impl RunState {
    /// Check whether the loop has terminated
    pub fn is_stopped(&self) -> bool {
        matches!(self, RunState::Stopped)
    }
}

/// The outer cycle binding sampling, encoding, transmission, and control.
#[derive(Debug)]
pub struct Controller<S, T> {
    source: S,
    link: Link<T>,
    encoder: FeatureEncoder,
    clock: i64,
    state: RunState,
    cycles: u64,
}

impl<S: SnapshotSource, T: Read + Write> Controller<S, T> {
    /// Create a controller starting at [`SIMULATION_EPOCH`].
    ///
    /// The schema is fixed for the controller's lifetime; it is not
    /// renegotiated per cycle.
    pub fn new(source: S, link: Link<T>, schema: VectorSchema) -> Self {
        Self {
            source,
            link,
            encoder: FeatureEncoder::new(schema),
            clock: SIMULATION_EPOCH,
            state: RunState::Running,
            cycles: 0,
        }
    }

    /// Override the starting simulated timestamp
    pub fn with_start_time(mut self, timestamp: i64) -> Self {
        self.clock = timestamp;
        self
    }

    /// The configured schema
    pub fn schema(&self) -> VectorSchema {
        self.encoder.schema()
    }

    /// Current simulated timestamp
    pub fn clock(&self) -> i64 {
        self.clock
    }

    /// Completed fetch/encode/send/control cycles
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Current lifecycle state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Borrow the snapshot source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Borrow the link
    pub fn link(&self) -> &Link<T> {
        &self.link
    }

    /// Run cycles until the collector sends QUIT or an error surfaces.
    pub fn run(&mut self) -> Result<()> {
        log::info!(
            "running the edge device ({} vector)",
            self.encoder.schema()
        );
        while !self.state.is_stopped() {
            self.step()?;
        }
        log::info!("end running after {} cycles", self.cycles);
        Ok(())
    }

    /// Execute exactly one cycle and return the control opcode received.
    pub fn step(&mut self) -> Result<Control> {
        let snapshot = self.source.snapshot(self.clock)?;
        let vector = self.encoder.encode(&snapshot)?;
        self.link.send_features(&vector)?;
        let control = self.link.recv_control()?;
        self.cycles += 1;

        match control {
            Control::Done => self.clock += DAY_SECS,
            Control::Quit => self.state = RunState::Stopped,
        }
        Ok(control)
    }
}
