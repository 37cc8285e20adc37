// Vane - Edge feature-vector telemetry
// Copyright (c) 2025 Vane contributors
//
// Licensed under AGPL-3.0. See LICENSE file for details.

//! Link management
//!
//! One [`Link`] owns exactly one transport to one collector for its
//! lifetime: it frames and sends data messages, and blocks for the next
//! control opcode. There is no reconnection logic; a new session means a
//! new link.
//!
//! The transport is anything `Read + Write`, so tests drive the link with
//! an in-memory [`MemoryTransport`] while production uses `TcpStream`.

use crate::codec::hex_dump;
use crate::error::{DecodeError, Result, TransportError};
use crate::features::FeatureVector;
use crate::protocol::{Control, Opcode};
use crate::retry::RetryPolicy;
use std::collections::VecDeque;
use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;

/// One session with the collector.
#[derive(Debug)]
pub struct Link<T> {
    transport: T,
    peer: String,
    policy: RetryPolicy,
}

impl Link<TcpStream> {
    /// Resolve `addr:port` and open the TCP session.
    ///
    /// There is no retry here: an edge device without its uplink cannot
    /// proceed, so the caller decides whether the failure is fatal.
    pub fn connect(addr: &str, port: u16) -> std::result::Result<Self, TransportError> {
        let peer = format!("{}:{}", addr, port);
        let stream = TcpStream::connect((addr, port)).map_err(|source| {
            TransportError::ConnectFailed {
                addr: peer.clone(),
                source,
            }
        })?;
        log::info!("connected to {}", peer);
        Ok(Self {
            transport: stream,
            peer,
            policy: RetryPolicy::default(),
        })
    }
}

impl<T: Read + Write> Link<T> {
    /// Wrap an already-open transport (tests, tunnels)
    pub fn from_transport(transport: T) -> Self {
        Self {
            transport,
            peer: String::from("(local)"),
            policy: RetryPolicy::default(),
        }
    }

    /// Replace the stall retry policy
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The peer label this link was opened against
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Borrow the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Frame and transmit one feature vector.
    ///
    /// Builds the `opcode | vector_id | payload` frame into one contiguous
    /// buffer and write-loops until the transport has accepted every byte.
    /// On `Ok(())` the full frame went out.
    pub fn send_features(&mut self, vector: &FeatureVector) -> Result<()> {
        let frame = vector.clone().into_frame().to_bytes();
        self.write_all_retrying(&frame, "send")?;
        log::debug!("sent {} byte frame to {}", frame.len(), self.peer);
        log::trace!("frame bytes:\n{}", hex_dump(&frame));
        Ok(())
    }

    /// Block for the next control opcode.
    ///
    /// Reads one byte at a time, silently absorbing WAIT bytes; the first
    /// non-WAIT byte must resolve to DONE or QUIT. Anything else is a
    /// protocol violation surfaced as a typed error, and EOF mid-poll means
    /// the collector went away.
    pub fn recv_control(&mut self) -> Result<Control> {
        let mut byte = [0u8; 1];
        let mut stalls = 0u32;
        loop {
            match self.transport.read(&mut byte) {
                Ok(0) => return Err(TransportError::ConnectionClosed.into()),
                Ok(_) => {
                    let opcode = Opcode::from_u8(byte[0])
                        .ok_or(DecodeError::UnknownOpcode(byte[0]))?;
                    match Control::from_opcode(opcode) {
                        Some(control) => {
                            log::debug!("control {} from {}", opcode, self.peer);
                            return Ok(control);
                        }
                        None if opcode == Opcode::Wait => {
                            log::trace!("absorbing WAIT from {}", self.peer);
                            stalls = 0;
                        }
                        None => {
                            return Err(DecodeError::UnexpectedOpcode { opcode }.into());
                        }
                    }
                }
                Err(e) if is_retryable(&e) => {
                    self.backoff(&mut stalls, "receive")?;
                }
                Err(e) => return Err(TransportError::Io(e).into()),
            }
        }
    }

    fn write_all_retrying(
        &mut self,
        buf: &[u8],
        op: &'static str,
    ) -> std::result::Result<(), TransportError> {
        let mut offset = 0;
        let mut stalls = 0u32;
        while offset < buf.len() {
            match self.transport.write(&buf[offset..]) {
                Ok(0) => self.backoff(&mut stalls, op)?,
                Ok(n) => {
                    offset += n;
                    stalls = 0;
                }
                Err(e) if is_retryable(&e) => self.backoff(&mut stalls, op)?,
                Err(e) => return Err(TransportError::Io(e)),
            }
        }
        Ok(())
    }

    fn backoff(
        &self,
        stalls: &mut u32,
        op: &'static str,
    ) -> std::result::Result<(), TransportError> {
        match self.policy.delay_for_attempt(*stalls) {
            Some(delay) => {
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
                *stalls += 1;
                Ok(())
            }
            None => Err(TransportError::RetryExhausted {
                op,
                attempts: *stalls,
            }),
        }
    }
}

fn is_retryable(e: &std::io::Error) -> bool {
    matches!(e.kind(), ErrorKind::Interrupted | ErrorKind::WouldBlock)
}

/// In-memory transport for tests and local experiments.
///
/// Feed it inbound bytes with [`push_incoming`](Self::push_incoming),
/// inspect what the link wrote via [`outgoing`](Self::outgoing), and
/// throttle acceptance per write call to exercise the partial-write loop.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    write_limit: Option<usize>,
    stalled_writes: u32,
}

impl MemoryTransport {
    /// Create an empty transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the bytes accepted per `write` call
    pub fn with_write_limit(mut self, limit: usize) -> Self {
        self.write_limit = Some(limit);
        self
    }

    /// Make the first `n` write calls accept nothing
    pub fn with_stalled_writes(mut self, n: u32) -> Self {
        self.stalled_writes = n;
        self
    }

    /// Queue bytes the link will read
    pub fn push_incoming(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Everything the link has written so far
    pub fn outgoing(&self) -> &[u8] {
        &self.tx
    }

    /// Bytes queued but not yet read
    pub fn pending_incoming(&self) -> usize {
        self.rx.len()
    }
}

impl Read for MemoryTransport {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = buf.len().min(self.rx.len());
        for slot in buf.iter_mut().take(n) {
            *slot = self.rx.pop_front().unwrap();
        }
        Ok(n)
    }
}

impl Write for MemoryTransport {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.stalled_writes > 0 {
            self.stalled_writes -= 1;
            return Ok(0);
        }
        let n = match self.write_limit {
            Some(limit) => buf.len().min(limit),
            None => buf.len(),
        };
        self.tx.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
