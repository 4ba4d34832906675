//! The five presence-bitmap camera data groups.
//!
//! All groups share one framing:
//!
//! ```text
//! +--------+----------------+=================+--------+
//! | 0x00   | presence (BE)  | present fields  | 0x00   |
//! | header | u16 bitmap     | fixed order     | parity |
//! +--------+----------------+=================+--------+
//! ```
//!
//! Each group writes its present fields in a fixed wire order that is not the
//! bitmap bit order; the order is part of wire compatibility and is pinned by
//! golden-byte tests. Decoding skips one byte for every reserved bit the
//! camera sets, so records from newer firmware still parse.

use sigmacam_protocol::VendorOp;

use crate::error::{DecodeError, EncodeError};

mod group1;
mod group2;
mod group3;
mod group4;
mod group5;

pub use group1::CamDataGroup1;
pub use group2::CamDataGroup2;
pub use group3::CamDataGroup3;
pub use group4::CamDataGroup4;
pub use group5::CamDataGroup5;

/// A camera data group record, tied to its Get/Set vendor opcodes.
///
/// The client issues `Self::GET` with no payload to fetch a group and
/// `Self::SET` with the encoded record as the data phase to apply one.
pub trait DataGroup: Default {
    const GET: VendorOp;
    const SET: VendorOp;
    /// Record name used in decode errors.
    const NAME: &'static str;

    fn encode(&self) -> Result<Vec<u8>, EncodeError>;
    fn decode(raw: &[u8]) -> Result<Self, DecodeError>
    where
        Self: Sized;
}
