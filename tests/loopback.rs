// Vane - Edge feature-vector telemetry
// Copyright (c) 2025 Vane contributors
//
// Licensed under AGPL-3.0. See LICENSE file for details.

//! Full-session integration tests over real loopback TCP.
//!
//! A scripted collector thread accepts one connection, reads each data
//! frame (deriving the payload length from the vector id, as the real
//! collector does), and answers with a scripted control sequence. The
//! client under test stays single-threaded.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use vane::dataset::{HumiditySummary, MeterReading, Snapshot, SnapshotSource, TemperatureSummary};
use vane::{Controller, DataFrame, Link, Opcode, Result, VectorSchema, DAY_SECS};

// 2023-06-15T12:00:00Z; June 2023 in every civil timezone, so the FULL
// vector's month/year fields are stable wherever the tests run.
const START: i64 = 1_686_830_400;

/// Fixed-weather snapshot source that records every requested timestamp.
struct FixedSite {
    requests: Vec<i64>,
}

impl FixedSite {
    fn new() -> Self {
        Self {
            requests: Vec::new(),
        }
    }
}

impl SnapshotSource for FixedSite {
    fn snapshot(&mut self, timestamp: i64) -> Result<Snapshot> {
        self.requests.push(timestamp);
        Ok(Snapshot::new(
            timestamp,
            TemperatureSummary::new(23.25),
            HumiditySummary::new(55.5, 48.0),
            vec![MeterReading::new(100.0), MeterReading::new(140.0)],
        ))
    }
}

/// Scripted collector: one reply burst per expected frame.
///
/// Returns the bound port and a handle yielding the received frames.
fn spawn_collector(replies: Vec<Vec<Opcode>>) -> (u16, JoinHandle<Vec<Vec<u8>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let port = listener.local_addr().expect("local addr").port();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut frames = Vec::new();
        for burst in replies {
            frames.push(read_frame(&mut stream));
            let bytes: Vec<u8> = burst.iter().map(|op| *op as u8).collect();
            stream.write_all(&bytes).expect("write control");
        }
        frames
    });

    (port, handle)
}

fn read_frame(stream: &mut TcpStream) -> Vec<u8> {
    let mut header = [0u8; 2];
    stream.read_exact(&mut header).expect("read header");
    assert_eq!(header[0], Opcode::Data as u8, "frame must lead with DATA");

    // The collector knows N from the vector id; nothing on the wire says it
    let schema = VectorSchema::from_u8(header[1]).expect("known vector id");
    let mut payload = vec![0u8; schema.payload_len()];
    stream.read_exact(&mut payload).expect("read payload");

    let mut frame = header.to_vec();
    frame.extend_from_slice(&payload);
    frame
}

#[test]
fn session_runs_until_quit() {
    let (port, collector) = spawn_collector(vec![
        vec![Opcode::Done],
        vec![Opcode::Wait, Opcode::Wait, Opcode::Done],
        vec![Opcode::Quit],
    ]);

    let link = Link::connect("127.0.0.1", port).expect("connect");
    let mut controller =
        Controller::new(FixedSite::new(), link, VectorSchema::Full).with_start_time(START);
    controller.run().expect("run to completion");

    assert_eq!(controller.cycles(), 3);
    assert!(controller.state().is_stopped());

    let frames = collector.join().expect("collector thread");
    assert_eq!(frames.len(), 3);
    for bytes in &frames {
        assert_eq!(bytes.len(), 22);
        let frame = DataFrame::from_bytes(bytes).expect("well-formed frame");
        assert_eq!(frame.schema, VectorSchema::Full);
        assert_eq!(frame.fields(), vec![55.5, 23.25, 6.0, 2023.0, 120.0]);
    }
}

#[test]
fn clock_advances_between_cycles() {
    let (port, collector) = spawn_collector(vec![
        vec![Opcode::Done],
        vec![Opcode::Done],
        vec![Opcode::Quit],
    ]);

    let link = Link::connect("127.0.0.1", port).expect("connect");
    let mut controller =
        Controller::new(FixedSite::new(), link, VectorSchema::Compact).with_start_time(START);
    controller.run().expect("run to completion");

    assert_eq!(
        controller.source().requests,
        vec![START, START + DAY_SECS, START + 2 * DAY_SECS]
    );
    collector.join().expect("collector thread");
}

#[test]
fn discomfort_session_sends_8_byte_payloads() {
    let (port, collector) = spawn_collector(vec![vec![Opcode::Quit]]);

    let link = Link::connect("127.0.0.1", port).expect("connect");
    let mut controller =
        Controller::new(FixedSite::new(), link, VectorSchema::Discomfort).with_start_time(START);
    controller.run().expect("run to completion");

    let frames = collector.join().expect("collector thread");
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].len(), 10);
    assert_eq!(frames[0][1], VectorSchema::Discomfort as u8);
}
