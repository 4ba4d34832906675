//! Binary container format for PTP transactions.
//!
//! Container layout (12-byte header, little-endian, then payload):
//!
//! ```text
//! +--------------+---------+-----------+----------------+---------+
//! | total_length |  type   |   code    | transaction_id | payload |
//! |   4 bytes    | 2 bytes |  2 bytes  |    4 bytes     |   ...   |
//! +--------------+---------+-----------+----------------+---------+
//! ```
//!
//! `total_length` counts the header. `type` is 1=Command, 2=Data, 3=Response,
//! 4=Event. `code` carries the opcode (Command/Data), response code
//! (Response) or event code (Event). Command and Response payloads are runs
//! of little-endian u32 parameters; Data payloads are raw bytes.

use crate::error::ProtocolError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Size of the fixed container header in bytes.
pub const CONTAINER_HEADER_SIZE: usize = 12;

/// The four container types of ISO 15740.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Command = 1,
    Data = 2,
    Response = 3,
    Event = 4,
}

impl ContainerKind {
    pub fn from_wire(raw: u16) -> Result<Self, ProtocolError> {
        match raw {
            1 => Ok(Self::Command),
            2 => Ok(Self::Data),
            3 => Ok(Self::Response),
            4 => Ok(Self::Event),
            other => Err(ProtocolError::UnknownContainerKind(other)),
        }
    }
}

/// A parsed PTP container.
#[derive(Debug, Clone)]
pub struct Container {
    pub kind: ContainerKind,
    /// Opcode, response code or event code depending on `kind`.
    pub code: u16,
    pub transaction_id: u32,
    pub payload: Bytes,
}

impl Container {
    /// Builds a Command container with a run of u32 parameters.
    pub fn command(opcode: u16, transaction_id: u32, params: &[u32]) -> Self {
        let mut payload = BytesMut::with_capacity(params.len() * 4);
        for p in params {
            payload.put_u32_le(*p);
        }
        Self {
            kind: ContainerKind::Command,
            code: opcode,
            transaction_id,
            payload: payload.freeze(),
        }
    }

    /// Builds a Data container carrying `data` for the same transaction.
    pub fn data(opcode: u16, transaction_id: u32, data: &[u8]) -> Self {
        Self {
            kind: ContainerKind::Data,
            code: opcode,
            transaction_id,
            payload: Bytes::copy_from_slice(data),
        }
    }

    /// Total on-wire length, header included.
    pub fn wire_len(&self) -> u32 {
        (CONTAINER_HEADER_SIZE + self.payload.len()) as u32
    }

    /// Encodes the container into bytes.
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(CONTAINER_HEADER_SIZE + self.payload.len());
        buf.put_u32_le(self.wire_len());
        buf.put_u16_le(self.kind as u16);
        buf.put_u16_le(self.code);
        buf.put_u32_le(self.transaction_id);
        buf.put_slice(&self.payload);
        buf
    }

    /// Parses a complete container from `raw`.
    ///
    /// `raw` must hold exactly the container (header plus payload); the
    /// accumulation of a split container across bulk reads happens in the
    /// engine before this is called.
    pub fn decode(raw: &[u8]) -> Result<Self, ProtocolError> {
        let (declared, kind, code, transaction_id) = Self::peek_header(raw)?;
        let end = (declared as usize).min(raw.len());
        Ok(Self {
            kind,
            code,
            transaction_id,
            payload: Bytes::copy_from_slice(&raw[CONTAINER_HEADER_SIZE..end]),
        })
    }

    /// Reads the fixed header without consuming payload bytes.
    ///
    /// Returns (declared total length, kind, code, transaction id).
    pub fn peek_header(raw: &[u8]) -> Result<(u32, ContainerKind, u16, u32), ProtocolError> {
        if raw.len() < CONTAINER_HEADER_SIZE {
            return Err(ProtocolError::ShortHeader {
                got: raw.len(),
                need: CONTAINER_HEADER_SIZE,
            });
        }
        let mut hdr = &raw[..CONTAINER_HEADER_SIZE];
        let declared = hdr.get_u32_le();
        if (declared as usize) < CONTAINER_HEADER_SIZE {
            return Err(ProtocolError::InvalidLength { declared });
        }
        let kind = ContainerKind::from_wire(hdr.get_u16_le())?;
        let code = hdr.get_u16_le();
        let transaction_id = hdr.get_u32_le();
        Ok((declared, kind, code, transaction_id))
    }

    /// Interprets the payload as a run of little-endian u32 parameters.
    ///
    /// A trailing fragment shorter than 4 bytes is ignored, matching how
    /// devices pad Response containers.
    pub fn params(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.payload.len() / 4);
        let mut rest = &self.payload[..];
        while rest.len() >= 4 {
            out.push(rest.get_u32_le());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_encode_golden() {
        // OpenSession(1), txn 1: length 16, type 1, code 0x1002.
        let c = Container::command(0x1002, 1, &[1]);
        let bytes = c.encode();
        assert_eq!(
            &bytes[..],
            &[
                0x10, 0x00, 0x00, 0x00, // length = 16
                0x01, 0x00, // Command
                0x02, 0x10, // opcode
                0x01, 0x00, 0x00, 0x00, // txn
                0x01, 0x00, 0x00, 0x00, // session id param
            ]
        );
    }

    #[test]
    fn test_command_length_counts_params() {
        for n in 0..5usize {
            let params = vec![7u32; n];
            let c = Container::command(0x9012, 42, &params);
            assert_eq!(c.wire_len() as usize, 12 + 4 * n);
            assert_eq!(c.encode().len(), 12 + 4 * n);
        }
    }

    #[test]
    fn test_data_shares_transaction_id() {
        let c = Container::data(0x9016, 9, b"\x00\x11\x00\x2a\x00");
        assert_eq!(c.kind, ContainerKind::Data);
        assert_eq!(c.transaction_id, 9);
        assert_eq!(c.wire_len(), 17);
    }

    #[test]
    fn test_roundtrip() {
        let c = Container::command(0x9015, 3, &[0x2A]);
        let parsed = Container::decode(&c.encode()).unwrap();
        assert_eq!(parsed.kind, ContainerKind::Command);
        assert_eq!(parsed.code, 0x9015);
        assert_eq!(parsed.transaction_id, 3);
        assert_eq!(parsed.params(), vec![0x2A]);
    }

    #[test]
    fn test_short_header_rejected() {
        let err = Container::decode(&[0x0C, 0x00, 0x00]).unwrap_err();
        assert!(matches!(err, ProtocolError::ShortHeader { got: 3, .. }));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let mut raw = Container::command(0x1002, 1, &[]).encode();
        raw[4] = 9;
        let err = Container::decode(&raw).unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownContainerKind(9)));
    }

    #[test]
    fn test_undersized_declared_length_rejected() {
        let raw = [
            0x04, 0x00, 0x00, 0x00, // length 4 < header
            0x03, 0x00, 0x01, 0x20, 0x01, 0x00, 0x00, 0x00,
        ];
        let err = Container::decode(&raw).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidLength { declared: 4 }));
    }

    #[test]
    fn test_params_ignores_trailing_fragment() {
        let mut raw = Container::command(0x2001, 5, &[1, 2]).encode();
        raw.extend_from_slice(&[0xEE, 0xEE]); // 2 stray bytes
        let c = Container::decode(&raw[..]).unwrap();
        // decode clamps to declared length, so the fragment is dropped
        assert_eq!(c.params(), vec![1, 2]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_command_roundtrip(
                code in any::<u16>(),
                txn in 1u32..=u32::MAX,
                params in proptest::collection::vec(any::<u32>(), 0..6),
            ) {
                let raw = Container::command(code, txn, &params).encode();
                prop_assert_eq!(raw.len(), CONTAINER_HEADER_SIZE + 4 * params.len());
                let c = Container::decode(&raw).unwrap();
                prop_assert_eq!(c.kind, ContainerKind::Command);
                prop_assert_eq!(c.code, code);
                prop_assert_eq!(c.transaction_id, txn);
                prop_assert_eq!(c.params(), params);
            }

            #[test]
            fn prop_data_roundtrip(
                code in any::<u16>(),
                txn in 1u32..=u32::MAX,
                payload in proptest::collection::vec(any::<u8>(), 0..256),
            ) {
                let raw = Container::data(code, txn, &payload).encode();
                let c = Container::decode(&raw).unwrap();
                prop_assert_eq!(c.kind, ContainerKind::Data);
                prop_assert_eq!(c.payload, payload);
            }
        }
    }
}
