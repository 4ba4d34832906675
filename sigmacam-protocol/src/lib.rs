//! # sigmacam-protocol
//!
//! Wire protocol for PTP/ISO 15740 containers as used by the SIGMA vendor
//! extension.
//!
//! This crate provides:
//! - The fixed 12-byte container framing (Command/Data/Response/Event)
//! - Standard PTP operation, response and event code spaces
//! - The SIGMA vendor opcode space (0x9012..0x9037)
//! - Framing error types

pub mod codes;
pub mod container;
pub mod error;

pub use codes::{EventCode, ResponseCode, StandardOp, VendorOp};
pub use container::{Container, ContainerKind, CONTAINER_HEADER_SIZE};
pub use error::ProtocolError;

/// Session ids start here; transaction ids start at 1 per session.
pub const FIRST_TRANSACTION_ID: u32 = 1;
