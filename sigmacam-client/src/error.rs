//! Client error type.

use thiserror::Error;

use sigmacam_protocol::ProtocolError;
use sigmacam_schema::{DecodeError, EncodeError};
use sigmacam_transport::TransportError;

/// Anything that can go wrong talking to the camera.
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    #[error("protocol: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("record decode: {0}")]
    Decode(#[from] DecodeError),

    #[error("record encode: {0}")]
    Encode(#[from] EncodeError),

    #[error("device returned no data for {operation}")]
    EmptyData { operation: &'static str },
}
