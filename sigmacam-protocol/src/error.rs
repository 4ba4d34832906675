//! Protocol-level error types.

use thiserror::Error;

/// Errors raised while framing or parsing PTP containers.
///
/// All variants are fatal for the transaction in flight; the engine never
/// retries on its own.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("short container header: got {got} bytes, need {need}")]
    ShortHeader { got: usize, need: usize },

    #[error("container length {declared} smaller than header")]
    InvalidLength { declared: u32 },

    #[error("unknown container type: {0:#06x}")]
    UnknownContainerKind(u16),

    #[error("unexpected {got:?} container (expected {expected:?})")]
    UnexpectedContainer {
        expected: crate::container::ContainerKind,
        got: crate::container::ContainerKind,
    },

    #[error("transaction id mismatch: sent {sent}, device answered {got}")]
    TransactionMismatch { sent: u32, got: u32 },

    #[error("empty bulk read while {0} bytes of the container were still pending")]
    TruncatedContainer(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::ContainerKind;

    #[test]
    fn test_error_display() {
        let err = ProtocolError::ShortHeader { got: 3, need: 12 };
        assert!(err.to_string().contains("3"));

        let err = ProtocolError::UnexpectedContainer {
            expected: ContainerKind::Response,
            got: ContainerKind::Data,
        };
        assert!(err.to_string().contains("Data"));

        let err = ProtocolError::UnknownContainerKind(0x99);
        assert!(err.to_string().contains("0x0099"));
    }
}
