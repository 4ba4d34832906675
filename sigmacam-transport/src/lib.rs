//! # sigmacam-transport
//!
//! Blocking byte transports underneath the PTP container layer.
//!
//! The [`Transport`] trait is the seam between protocol logic and the bus:
//! the client writes whole containers with [`Transport::write_exact`] and
//! pulls whatever the device produces with [`Transport::read_some`], while
//! [`Transport::read_intr`] drains the interrupt pipe that carries PTP
//! events. Every call takes its own timeout; nothing here spawns or blocks
//! beyond it.
//!
//! Two implementations are provided: [`FakeTransport`] for tests, and
//! `UsbTransport` over libusb when the `usb` feature is enabled.

use std::time::Duration;

use thiserror::Error;

mod fake;
#[cfg(feature = "usb")]
mod usb;

pub use fake::{build_response, FakeTransport};
#[cfg(feature = "usb")]
pub use usb::UsbTransport;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport is not open")]
    NotOpen,

    #[error("no PTP device found")]
    DeviceNotFound,

    #[error("device has no PTP interface with bulk endpoints")]
    NoPtpInterface,

    #[error("short bulk write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    #[cfg(feature = "usb")]
    #[error("usb transfer failed: {0}")]
    Usb(#[from] rusb::Error),
}

/// A blocking, per-call-timeout byte pipe to a PTP device.
pub trait Transport {
    fn is_open(&self) -> bool;

    fn close(&mut self);

    /// Writes the whole buffer or fails.
    fn write_exact(&mut self, data: &[u8], timeout: Duration) -> Result<(), TransportError>;

    /// Reads up to `max` bytes from the bulk-in pipe. An empty result means
    /// the device produced nothing within the timeout.
    fn read_some(&mut self, max: usize, timeout: Duration) -> Result<Vec<u8>, TransportError>;

    /// Reads up to `max` bytes from the interrupt pipe. Returns empty on
    /// timeout or when the device has no interrupt endpoint.
    fn read_intr(&mut self, max: usize, timeout: Duration) -> Result<Vec<u8>, TransportError>;
}
