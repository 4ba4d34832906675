//! Container transaction engine over a blocking transport.

use std::time::Duration;

use tracing::{debug, trace, warn};

use sigmacam_protocol::{
    Container, ContainerKind, EventCode, ProtocolError, StandardOp, CONTAINER_HEADER_SIZE,
    FIRST_TRANSACTION_ID,
};
use sigmacam_transport::Transport;

use crate::error::CameraError;

/// Per-read buffer ceiling; a full-resolution JPEG arrives in several reads.
const READ_CHUNK: usize = 1 << 20;

/// Interrupt events are small; 64 bytes covers the 3-parameter maximum.
const EVENT_BUF: usize = 64;

/// Stray Events tolerated before a Data or Response container shows up.
const MAX_STRAY_EVENTS: usize = 8;

const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(3);

/// Outcome of one PTP transaction.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub response_code: u16,
    pub params: Vec<u32>,
    /// Payload of the Data phase, empty when the device sent none.
    pub data: Vec<u8>,
}

impl Response {
    /// True when the device reported standard OK.
    pub fn is_ok(&self) -> bool {
        self.response_code == 0x2001
    }
}

/// ISO 15740 transaction engine: owns the transport and the transaction-id
/// counter, and speaks the Command / Data / Response / Event container
/// protocol.
pub struct CameraPtp<T> {
    transport: T,
    next_tid: u32,
    io_timeout: Duration,
    /// Bytes past the end of the last container, when a bulk read straddled
    /// a container boundary.
    pending: Vec<u8>,
}

impl<T: Transport> CameraPtp<T> {
    pub fn new(transport: T) -> Self {
        Self::with_io_timeout(transport, DEFAULT_IO_TIMEOUT)
    }

    pub fn with_io_timeout(transport: T, io_timeout: Duration) -> Self {
        Self {
            transport,
            next_tid: FIRST_TRANSACTION_ID,
            io_timeout,
            pending: Vec::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn take_tid(&mut self) -> u32 {
        let tid = self.next_tid;
        self.next_tid += 1;
        tid
    }

    /// Reads one whole container, reassembling across bulk reads when the
    /// declared length exceeds one read, and carrying over bytes when a read
    /// straddles into the next container.
    fn read_full_container(&mut self) -> Result<Container, CameraError> {
        let mut buf = std::mem::take(&mut self.pending);
        if buf.len() < CONTAINER_HEADER_SIZE {
            let first = self.transport.read_some(READ_CHUNK, self.io_timeout)?;
            buf.extend_from_slice(&first);
            if buf.len() < CONTAINER_HEADER_SIZE {
                return Err(ProtocolError::ShortHeader {
                    got: buf.len(),
                    need: CONTAINER_HEADER_SIZE,
                }
                .into());
            }
        }
        let (declared, kind, code, _) = Container::peek_header(&buf)?;
        trace!(?kind, code = format_args!("{code:#06x}"), declared, "container in");

        while buf.len() < declared as usize {
            let more = self.transport.read_some(READ_CHUNK, self.io_timeout)?;
            if more.is_empty() {
                return Err(ProtocolError::TruncatedContainer(buf.len()).into());
            }
            buf.extend_from_slice(&more);
        }
        if buf.len() > declared as usize {
            self.pending = buf.split_off(declared as usize);
        }
        Ok(Container::decode(&buf)?)
    }

    pub fn open_session(&mut self, session_id: u32) -> Result<(), CameraError> {
        debug!(session_id, "open session");
        self.transact(StandardOp::OpenSession.into(), &[session_id], None, false)?;
        Ok(())
    }

    pub fn close_session(&mut self) -> Result<(), CameraError> {
        debug!("close session");
        self.transact(StandardOp::CloseSession.into(), &[], None, false)?;
        Ok(())
    }

    /// Runs one transaction: Command out, optional Data out, then inbound
    /// containers until the Response.
    ///
    /// Stray Event containers on the bulk pipe are dropped, up to a small
    /// bound. A Data container must be followed by the Response; a direct
    /// Response is accepted even when data was expected, since some bodies
    /// skip the Data phase.
    pub fn transact(
        &mut self,
        opcode: u16,
        params: &[u32],
        data_out: Option<&[u8]>,
        expect_data_in: bool,
    ) -> Result<Response, CameraError> {
        let tid = self.take_tid();
        debug!(
            opcode = format_args!("{opcode:#06x}"),
            tid,
            params = params.len(),
            data_out = data_out.map(<[u8]>::len),
            "transact"
        );

        let cmd = Container::command(opcode, tid, params);
        self.transport.write_exact(&cmd.encode(), self.io_timeout)?;

        if let Some(bytes) = data_out {
            let data = Container::data(opcode, tid, bytes);
            self.transport.write_exact(&data.encode(), self.io_timeout)?;
        }

        let mut container = self.read_full_container()?;
        let mut stray = 0;
        while container.kind == ContainerKind::Event && stray < MAX_STRAY_EVENTS {
            trace!(code = format_args!("{:#06x}", container.code), "stray event dropped");
            stray += 1;
            container = self.read_full_container()?;
        }

        let mut response = Response::default();

        if container.kind == ContainerKind::Data {
            self.check_tid(tid, container.transaction_id)?;
            response.data = container.payload.to_vec();

            let tail = self.read_full_container()?;
            if tail.kind != ContainerKind::Response {
                return Err(ProtocolError::UnexpectedContainer {
                    expected: ContainerKind::Response,
                    got: tail.kind,
                }
                .into());
            }
            self.check_tid(tid, tail.transaction_id)?;
            response.response_code = tail.code;
            response.params = tail.params();
            return Ok(response);
        }

        if container.kind == ContainerKind::Response {
            if expect_data_in {
                debug!("device skipped the data phase");
            }
            self.check_tid(tid, container.transaction_id)?;
            response.response_code = container.code;
            response.params = container.params();
            return Ok(response);
        }

        Err(ProtocolError::UnexpectedContainer {
            expected: ContainerKind::Response,
            got: container.kind,
        }
        .into())
    }

    fn check_tid(&self, sent: u32, got: u32) -> Result<(), CameraError> {
        if sent != got {
            return Err(ProtocolError::TransactionMismatch { sent, got }.into());
        }
        Ok(())
    }

    /// One poll of the interrupt pipe; empty when no event arrived in time.
    pub fn event(&mut self, timeout: Duration) -> Result<Vec<u8>, CameraError> {
        Ok(self.transport.read_intr(EVENT_BUF, timeout)?)
    }

    /// Polls the interrupt pipe for an ObjectAdded event and returns the new
    /// object handle, or `None` once the timeout budget is spent.
    pub fn wait_object_added(
        &mut self,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Option<u32>, CameraError> {
        let tries = (timeout.as_millis() / poll_interval.as_millis().max(1)) as u32;
        for _ in 0..tries {
            let ev = self.event(poll_interval)?;
            if ev.len() < 16 {
                continue;
            }
            let kind = u16::from_le_bytes([ev[4], ev[5]]);
            let code = u16::from_le_bytes([ev[6], ev[7]]);
            if kind == ContainerKind::Event as u16 && code == EventCode::ObjectAdded.code() {
                let handle = u32::from_le_bytes([ev[12], ev[13], ev[14], ev[15]]);
                debug!(handle = format_args!("{handle:#010x}"), "object added");
                return Ok(Some(handle));
            }
            warn!(
                kind,
                code = format_args!("{code:#06x}"),
                "ignoring unexpected interrupt container"
            );
        }
        Ok(None)
    }

    pub fn get_device_info(&mut self) -> Result<Vec<u8>, CameraError> {
        Ok(self
            .transact(StandardOp::GetDeviceInfo.into(), &[], None, true)?
            .data)
    }

    pub fn get_storage_ids(&mut self) -> Result<Vec<u32>, CameraError> {
        let data = self
            .transact(StandardOp::GetStorageIds.into(), &[], None, true)?
            .data;
        Ok(u32_run(&data))
    }

    /// Object handles on the first storage, all formats and associations.
    pub fn get_object_handles(&mut self) -> Result<Vec<u32>, CameraError> {
        let storages = self.get_storage_ids()?;
        let storage = storages.first().copied().unwrap_or(0);
        self.get_object_handles_in(storage, 0, 0xFFFF_FFFF)
    }

    pub fn get_object_handles_in(
        &mut self,
        storage: u32,
        format: u32,
        association: u32,
    ) -> Result<Vec<u32>, CameraError> {
        let data = self
            .transact(
                StandardOp::GetObjectHandles.into(),
                &[storage, format, association],
                None,
                true,
            )?
            .data;
        if data.len() < 4 {
            return Ok(Vec::new());
        }

        // Canonical PTP array: <count:u32><items...>. Some firmware omits the
        // count, so fall back to a raw u32 run when it does not line up.
        let count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
        if let Some(body) = count
            .checked_mul(4)
            .and_then(|n| data.get(4..4 + n))
        {
            return Ok(u32_run(body));
        }
        Ok(u32_run(&data))
    }

    pub fn get_object_info(&mut self, handle: u32) -> Result<Vec<u8>, CameraError> {
        Ok(self
            .transact(StandardOp::GetObjectInfo.into(), &[handle], None, true)?
            .data)
    }

    pub fn get_object(&mut self, handle: u32) -> Result<Vec<u8>, CameraError> {
        Ok(self
            .transact(StandardOp::GetObject.into(), &[handle], None, true)?
            .data)
    }

    pub fn get_partial_object(
        &mut self,
        handle: u32,
        offset: u32,
        max_bytes: u32,
    ) -> Result<Vec<u8>, CameraError> {
        Ok(self
            .transact(
                StandardOp::GetPartialObject.into(),
                &[handle, offset, max_bytes],
                None,
                true,
            )?
            .data)
    }

    pub fn initiate_capture(&mut self, storage: u32, format: u32) -> Result<(), CameraError> {
        self.transact(
            StandardOp::InitiateCapture.into(),
            &[storage, format],
            None,
            false,
        )?;
        Ok(())
    }
}

fn u32_run(data: &[u8]) -> Vec<u32> {
    data.chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
