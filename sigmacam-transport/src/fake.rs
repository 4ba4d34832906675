//! In-memory transport double for protocol tests.

use std::collections::VecDeque;
use std::time::Duration;

use sigmacam_protocol::{Container, ContainerKind, CONTAINER_HEADER_SIZE};

use crate::{Transport, TransportError};

/// Builds a raw Response container, for queuing into a [`FakeTransport`].
pub fn build_response(code: u16, transaction_id: u32, params: &[u32]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(params.len() * 4);
    for p in params {
        payload.extend_from_slice(&p.to_le_bytes());
    }
    let container = Container {
        kind: ContainerKind::Response,
        code,
        transaction_id,
        payload: payload.into(),
    };
    container.encode().to_vec()
}

/// Scriptable transport: records every write, serves queued bytes on reads,
/// and auto-acknowledges the last observed Command with an OK Response when
/// the read queue runs dry.
pub struct FakeTransport {
    /// Every buffer passed to [`Transport::write_exact`], for assertions.
    pub writes: Vec<Vec<u8>>,
    rx: VecDeque<u8>,
    ev: VecDeque<u8>,
    last_txn: u32,
    auto_ok: bool,
    open: bool,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            rx: VecDeque::new(),
            ev: VecDeque::new(),
            last_txn: 0,
            auto_ok: true,
            open: true,
        }
    }

    /// Disables the automatic OK Response, for scripts that provide every
    /// container themselves.
    pub fn without_auto_ok() -> Self {
        Self {
            auto_ok: false,
            ..Self::new()
        }
    }

    /// Appends bytes to the bulk-in queue.
    pub fn queue_read(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    /// Appends bytes to the interrupt queue.
    pub fn queue_event(&mut self, bytes: &[u8]) {
        self.ev.extend(bytes);
    }

    fn ensure_auto_ok(&mut self) {
        if !self.auto_ok || !self.rx.is_empty() || self.last_txn == 0 {
            return;
        }
        let ok = build_response(0x2001, self.last_txn, &[]);
        self.queue_read(&ok);
    }

    fn drain(queue: &mut VecDeque<u8>, max: usize) -> Vec<u8> {
        let n = max.min(queue.len());
        queue.drain(..n).collect()
    }
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for FakeTransport {
    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
        self.writes.clear();
        self.rx.clear();
    }

    fn write_exact(&mut self, data: &[u8], _timeout: Duration) -> Result<(), TransportError> {
        if !self.open {
            return Err(TransportError::NotOpen);
        }
        self.writes.push(data.to_vec());
        // Remember the transaction id of each Command so the auto-OK reply
        // matches it.
        if data.len() >= CONTAINER_HEADER_SIZE
            && u16::from_le_bytes([data[4], data[5]]) == ContainerKind::Command as u16
        {
            self.last_txn = u32::from_le_bytes([data[8], data[9], data[10], data[11]]);
        }
        Ok(())
    }

    fn read_some(&mut self, max: usize, _timeout: Duration) -> Result<Vec<u8>, TransportError> {
        if !self.open {
            return Err(TransportError::NotOpen);
        }
        self.ensure_auto_ok();
        Ok(Self::drain(&mut self.rx, max))
    }

    fn read_intr(&mut self, max: usize, _timeout: Duration) -> Result<Vec<u8>, TransportError> {
        if !self.open {
            return Err(TransportError::NotOpen);
        }
        Ok(Self::drain(&mut self.ev, max))
    }
}
