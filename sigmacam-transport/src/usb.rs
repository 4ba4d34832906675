//! libusb-backed transport for still-image-class devices.

use std::time::Duration;

use rusb::{Device, DeviceHandle, Direction, GlobalContext, TransferType};
use tracing::{debug, trace};

use crate::{Transport, TransportError};

/// USB still-image (PTP) interface class.
const USB_CLASS_IMAGE: u8 = 6;

struct PtpEndpoints {
    interface: u8,
    bulk_in: u8,
    bulk_out: u8,
    /// Zero when the interface exposes no interrupt-in endpoint.
    interrupt_in: u8,
}

/// Bulk/interrupt transport over the first still-image interface of a USB
/// device.
pub struct UsbTransport {
    handle: Option<DeviceHandle<GlobalContext>>,
    endpoints: PtpEndpoints,
}

impl UsbTransport {
    /// Opens the first device on the bus that exposes a PTP interface.
    pub fn open_first() -> Result<Self, TransportError> {
        for device in rusb::devices()?.iter() {
            if let Ok(transport) = Self::open_device(&device) {
                return Ok(transport);
            }
        }
        Err(TransportError::DeviceNotFound)
    }

    /// Opens the device with the given vendor and product id.
    pub fn open_vid_pid(vid: u16, pid: u16) -> Result<Self, TransportError> {
        for device in rusb::devices()?.iter() {
            let desc = match device.device_descriptor() {
                Ok(d) => d,
                Err(_) => continue,
            };
            if desc.vendor_id() == vid && desc.product_id() == pid {
                return Self::open_device(&device);
            }
        }
        Err(TransportError::DeviceNotFound)
    }

    fn open_device(device: &Device<GlobalContext>) -> Result<Self, TransportError> {
        let endpoints = Self::find_ptp_interface(device)?;
        let mut handle = device.open()?;
        if handle.kernel_driver_active(endpoints.interface).unwrap_or(false) {
            handle.detach_kernel_driver(endpoints.interface)?;
        }
        handle.claim_interface(endpoints.interface)?;
        debug!(
            bus = device.bus_number(),
            address = device.address(),
            interface = endpoints.interface,
            "opened PTP device"
        );
        Ok(Self {
            handle: Some(handle),
            endpoints,
        })
    }

    fn find_ptp_interface(device: &Device<GlobalContext>) -> Result<PtpEndpoints, TransportError> {
        let config = device
            .active_config_descriptor()
            .map_err(|_| TransportError::NoPtpInterface)?;
        for interface in config.interfaces() {
            for alt in interface.descriptors() {
                if alt.class_code() != USB_CLASS_IMAGE {
                    continue;
                }
                let mut bulk_in = 0;
                let mut bulk_out = 0;
                let mut interrupt_in = 0;
                for ep in alt.endpoint_descriptors() {
                    match (ep.transfer_type(), ep.direction()) {
                        (TransferType::Bulk, Direction::In) => bulk_in = ep.address(),
                        (TransferType::Bulk, Direction::Out) => bulk_out = ep.address(),
                        (TransferType::Interrupt, Direction::In) => interrupt_in = ep.address(),
                        _ => {}
                    }
                }
                if bulk_in != 0 && bulk_out != 0 {
                    return Ok(PtpEndpoints {
                        interface: alt.interface_number(),
                        bulk_in,
                        bulk_out,
                        interrupt_in,
                    });
                }
            }
        }
        Err(TransportError::NoPtpInterface)
    }

    fn handle(&self) -> Result<&DeviceHandle<GlobalContext>, TransportError> {
        self.handle.as_ref().ok_or(TransportError::NotOpen)
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        self.close();
    }
}

impl Transport for UsbTransport {
    fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.release_interface(self.endpoints.interface);
        }
    }

    fn write_exact(&mut self, data: &[u8], timeout: Duration) -> Result<(), TransportError> {
        let written = self
            .handle()?
            .write_bulk(self.endpoints.bulk_out, data, timeout)?;
        trace!(bytes = written, "bulk out");
        if written != data.len() {
            return Err(TransportError::ShortWrite {
                written,
                expected: data.len(),
            });
        }
        Ok(())
    }

    fn read_some(&mut self, max: usize, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0u8; max];
        let n = self
            .handle()?
            .read_bulk(self.endpoints.bulk_in, &mut buf, timeout)?;
        trace!(bytes = n, "bulk in");
        buf.truncate(n);
        Ok(buf)
    }

    fn read_intr(&mut self, max: usize, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        if self.endpoints.interrupt_in == 0 {
            return Ok(Vec::new());
        }
        let mut buf = vec![0u8; max];
        match self
            .handle()?
            .read_interrupt(self.endpoints.interrupt_in, &mut buf, timeout)
        {
            Ok(n) => {
                buf.truncate(n);
                Ok(buf)
            }
            // A quiet interrupt pipe is the normal case while polling.
            Err(rusb::Error::Timeout) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}
