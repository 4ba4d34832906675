//! Fixed-layout vendor records outside the data groups.

use bytes::BufMut;

use crate::enums::{CaptStatus, CaptureMode, DestToSave};
use crate::error::DecodeError;
use crate::wire::Reader;

/// Capture pipeline status snapshot (decode only).
///
/// ```text
/// +--------+---------+---------+---------+-----------+------+--------+
/// | 0x00   | ImageId | DBHead  | DBTail  | Status    | Dest | 0x00   |
/// | header | u8      | u8      | u8      | u16 LE    | u8   | parity |
/// +--------+---------+---------+---------+-----------+------+--------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CamCaptStatus {
    pub image_id: u8,
    pub image_db_head: u8,
    pub image_db_tail: u8,
    pub status: CaptStatus,
    pub dest: DestToSave,
}

impl CamCaptStatus {
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let mut r = Reader::new("CamCaptStatus", raw);
        r.skip(1)?;
        let image_id = r.u8()?;
        let image_db_head = r.u8()?;
        let image_db_tail = r.u8()?;
        let status = CaptStatus::from_code(r.u16_le()?);
        let dest = DestToSave::from_code(r.u8()?);
        r.skip(1)?;
        Ok(Self {
            image_id,
            image_db_head,
            image_db_tail,
            status,
            dest,
        })
    }
}

/// Capture trigger record (encode only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapCommand {
    pub mode: CaptureMode,
    pub amount: u8,
}

impl Default for SnapCommand {
    fn default() -> Self {
        Self {
            mode: CaptureMode::GeneralCapt,
            amount: 1,
        }
    }
}

impl SnapCommand {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4);
        out.put_u8(0x00);
        out.put_u8(self.mode.code());
        out.put_u8(self.amount);
        out.put_u8(0x00);
        out
    }
}

/// Metadata for a picture held in the camera's frame buffer (decode only).
///
/// A 36-byte fixed header (file address, size, format fourcc, dimensions)
/// followed by two NUL-terminated strings for path and file name. The header
/// also carries string offsets, unused here since the strings are inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictFileInfo2 {
    pub file_address: u32,
    pub file_size: u32,
    pub picture_format: String,
    pub size_x: u16,
    pub size_y: u16,
    pub path_name: String,
    pub file_name: String,
}

impl PictFileInfo2 {
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let mut r = Reader::new("PictFileInfo2", raw);
        r.skip(12)?;
        let file_address = r.u32_le()?;
        let file_size = r.u32_le()?;
        r.skip(8)?; // path/file name offsets
        let picture_format = r.ascii(4)?;
        let size_x = r.u16_le()?;
        let size_y = r.u16_le()?;
        let path_name = r.cstr()?;
        let file_name = r.cstr()?;
        // Two unknown trailing bytes may follow; ignored.
        Ok(Self {
            file_address,
            file_size,
            picture_format,
            size_x,
            size_y,
            path_name,
            file_name,
        })
    }
}

/// One chunk of a frame-buffer download (decode only).
///
/// The camera prefixes the chunk with the byte count it actually produced,
/// which can be shorter than both the request and the buffer that carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigPartialPictFile {
    pub acquired_size: u32,
    pub partial_data: Vec<u8>,
}

impl BigPartialPictFile {
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let mut r = Reader::new("BigPartialPictFile", raw);
        let acquired_size = r.u32_le()?;
        let have = (acquired_size as usize).min(r.remaining());
        let partial_data = raw[4..4 + have].to_vec();
        Ok(Self {
            acquired_size,
            partial_data,
        })
    }
}

/// One live-view frame: a 10-byte vendor preamble, then JPEG bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFrame {
    pub data: Vec<u8>,
}

impl ViewFrame {
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let mut r = Reader::new("ViewFrame", raw);
        r.skip(10)?;
        Ok(Self {
            data: raw[10..].to_vec(),
        })
    }
}

/// Tag/type/count directory entry types in the [`ApiConfig`] blob.
mod dir_type {
    pub const UINT8: u16 = 0x01;
    pub const STRING: u16 = 0x02;
    pub const UINT16: u16 = 0x03;
    pub const UINT32: u16 = 0x04;
    pub const URATIONAL: u16 = 0x05;
    pub const INT8: u16 = 0x06;
    pub const ANY8: u16 = 0x07;
    pub const INT16: u16 = 0x08;
    pub const INT32: u16 = 0x09;
    pub const RATIONAL: u16 = 0x0A;
    pub const FLOAT32: u16 = 0x0B;
    pub const FLOAT64: u16 = 0x0C;

    pub fn elem_size(t: u16) -> u32 {
        match t {
            UINT8 | INT8 | ANY8 | STRING => 1,
            UINT16 | INT16 => 2,
            UINT32 | INT32 | FLOAT32 => 4,
            URATIONAL | RATIONAL | FLOAT64 => 8,
            _ => 0,
        }
    }
}

/// Identity block returned by the API handshake (decode only).
///
/// A TIFF-style directory: `{u32 blob_len, u32 entry_count}` then 12-byte
/// entries of `{u16 tag, u16 type, u32 count, u32 value_or_offset}`. Values
/// of four bytes or fewer are inline; larger ones live at an offset from the
/// start of the blob. Unknown tags and out-of-bounds offsets are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiConfig {
    pub camera_model: String,
    pub serial_number: String,
    pub firmware_version: String,
    pub communication_version: f64,
}

mod api_tag {
    pub const CAMERA_MODEL: u16 = 1;
    pub const SERIAL_NUMBER: u16 = 2;
    pub const FIRMWARE_VERSION: u16 = 3;
    pub const COMMUNICATION_VERSION: u16 = 5;
}

impl ApiConfig {
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let mut cfg = Self::default();
        if raw.len() < 8 {
            return Ok(cfg);
        }
        let entry_count = u32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]) as usize;
        let Some(index_end) = entry_count
            .checked_mul(12)
            .and_then(|n| n.checked_add(8))
        else {
            return Ok(cfg);
        };
        if raw.len() < index_end {
            return Ok(cfg);
        }

        for i in 0..entry_count {
            let off = 8 + i * 12;
            let tag = u16::from_le_bytes([raw[off], raw[off + 1]]);
            let ty = u16::from_le_bytes([raw[off + 2], raw[off + 3]]);
            let count =
                u32::from_le_bytes([raw[off + 4], raw[off + 5], raw[off + 6], raw[off + 7]]);
            let value = &raw[off + 8..off + 12];

            let nbytes = if ty == dir_type::STRING {
                count
            } else {
                count.saturating_mul(dir_type::elem_size(ty))
            } as usize;

            let payload: &[u8] = if nbytes <= 4 {
                &value[..nbytes]
            } else {
                let ofs = u32::from_le_bytes([value[0], value[1], value[2], value[3]]) as usize;
                match raw.get(ofs..ofs + nbytes) {
                    Some(p) => p,
                    None => continue,
                }
            };

            match tag {
                api_tag::CAMERA_MODEL => cfg.camera_model = trimmed_string(payload),
                api_tag::SERIAL_NUMBER => cfg.serial_number = trimmed_string(payload),
                api_tag::FIRMWARE_VERSION => cfg.firmware_version = trimmed_string(payload),
                api_tag::COMMUNICATION_VERSION => {
                    if ty == dir_type::FLOAT32 && payload.len() >= 4 {
                        let bits =
                            u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
                        cfg.communication_version = f64::from(f32::from_bits(bits));
                    } else if ty == dir_type::FLOAT64 && payload.len() >= 8 {
                        let mut b = [0u8; 8];
                        b.copy_from_slice(&payload[..8]);
                        cfg.communication_version = f64::from_bits(u64::from_le_bytes(b));
                    }
                }
                _ => {}
            }
        }
        Ok(cfg)
    }
}

fn trimmed_string(payload: &[u8]) -> String {
    let end = payload
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(payload.len());
    String::from_utf8_lossy(&payload[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cam_capt_status_decode() {
        let raw = [0x00, 0x07, 0x02, 0x05, 0x05, 0x00, 0x03, 0x00];
        let s = CamCaptStatus::decode(&raw).unwrap();
        assert_eq!(s.image_id, 7);
        assert_eq!(s.image_db_head, 2);
        assert_eq!(s.image_db_tail, 5);
        assert_eq!(s.status, CaptStatus::ImageGenCompleted);
        assert_eq!(s.dest, DestToSave::Both);
    }

    #[test]
    fn test_cam_capt_status_short() {
        let err = CamCaptStatus::decode(&[0x00, 0x01, 0x02]).unwrap_err();
        assert!(matches!(err, DecodeError::ShortBuffer { .. }));
    }

    #[test]
    fn test_snap_command_encode() {
        assert_eq!(SnapCommand::default().encode(), [0x00, 0x01, 0x01, 0x00]);
        let snap = SnapCommand {
            mode: CaptureMode::NonAfCapt,
            amount: 3,
        };
        assert_eq!(snap.encode(), [0x00, 0x02, 0x03, 0x00]);
    }

    #[test]
    fn test_pict_file_info2_decode() {
        let mut raw = vec![0u8; 36];
        raw[12..16].copy_from_slice(&0x0060_0000u32.to_le_bytes());
        raw[16..20].copy_from_slice(&1_234_567u32.to_le_bytes());
        raw[28..32].copy_from_slice(b"JPG ");
        raw[32..34].copy_from_slice(&6000u16.to_le_bytes());
        raw[34..36].copy_from_slice(&4000u16.to_le_bytes());
        raw.extend_from_slice(b"100SIGMA\0");
        raw.extend_from_slice(b"SDIM0001.JPG\0");
        raw.extend_from_slice(&[0xDE, 0xAD]); // trailing unknown bytes

        let info = PictFileInfo2::decode(&raw).unwrap();
        assert_eq!(info.file_address, 0x0060_0000);
        assert_eq!(info.file_size, 1_234_567);
        assert_eq!(info.picture_format, "JPG ");
        assert_eq!(info.size_x, 6000);
        assert_eq!(info.size_y, 4000);
        assert_eq!(info.path_name, "100SIGMA");
        assert_eq!(info.file_name, "SDIM0001.JPG");
    }

    #[test]
    fn test_pict_file_info2_short_header() {
        let err = PictFileInfo2::decode(&[0u8; 20]).unwrap_err();
        assert!(matches!(err, DecodeError::ShortBuffer { .. }));
    }

    #[test]
    fn test_big_partial_pict_file_clamps() {
        // Declared size larger than the carried bytes.
        let mut raw = 100u32.to_le_bytes().to_vec();
        raw.extend_from_slice(&[1, 2, 3]);
        let part = BigPartialPictFile::decode(&raw).unwrap();
        assert_eq!(part.acquired_size, 100);
        assert_eq!(part.partial_data, [1, 2, 3]);

        // Declared size smaller than the carried bytes.
        let mut raw = 2u32.to_le_bytes().to_vec();
        raw.extend_from_slice(&[1, 2, 3, 4]);
        let part = BigPartialPictFile::decode(&raw).unwrap();
        assert_eq!(part.partial_data, [1, 2]);

        let err = BigPartialPictFile::decode(&[0x01, 0x00]).unwrap_err();
        assert!(matches!(err, DecodeError::ShortBuffer { .. }));
    }

    #[test]
    fn test_view_frame_strips_preamble() {
        let mut raw = vec![0u8; 10];
        raw.extend_from_slice(&[0xFF, 0xD8, 0xFF]);
        let frame = ViewFrame::decode(&raw).unwrap();
        assert_eq!(frame.data, [0xFF, 0xD8, 0xFF]);

        let err = ViewFrame::decode(&[0u8; 9]).unwrap_err();
        assert!(matches!(err, DecodeError::ShortBuffer { .. }));
    }

    fn push_entry(blob: &mut Vec<u8>, tag: u16, ty: u16, count: u32, value: [u8; 4]) {
        blob.extend_from_slice(&tag.to_le_bytes());
        blob.extend_from_slice(&ty.to_le_bytes());
        blob.extend_from_slice(&count.to_le_bytes());
        blob.extend_from_slice(&value);
    }

    #[test]
    fn test_api_config_decode() {
        // Three entries: model (offset string), comm version (inline f32),
        // and an unknown tag that must be ignored.
        let model = b"fp L\0";
        let data_start = 8 + 3 * 12;
        let mut blob = Vec::new();
        blob.extend_from_slice(&0u32.to_le_bytes()); // blob length, unused
        blob.extend_from_slice(&3u32.to_le_bytes());
        push_entry(
            &mut blob,
            1,
            0x02,
            model.len() as u32,
            (data_start as u32).to_le_bytes(),
        );
        push_entry(&mut blob, 5, 0x0B, 1, 1.1f32.to_le_bytes());
        push_entry(&mut blob, 99, 0x04, 1, 7u32.to_le_bytes());
        blob.extend_from_slice(model);

        let cfg = ApiConfig::decode(&blob).unwrap();
        assert_eq!(cfg.camera_model, "fp L");
        assert!((cfg.communication_version - 1.1).abs() < 1e-6);
        assert_eq!(cfg.serial_number, "");
    }

    #[test]
    fn test_api_config_out_of_bounds_entry_skipped() {
        let mut blob = Vec::new();
        blob.extend_from_slice(&0u32.to_le_bytes());
        blob.extend_from_slice(&2u32.to_le_bytes());
        // Serial number points past the end of the blob.
        push_entry(&mut blob, 2, 0x02, 64, 5000u32.to_le_bytes());
        // Inline firmware string survives.
        push_entry(&mut blob, 3, 0x02, 4, *b"1.0\0");

        let cfg = ApiConfig::decode(&blob).unwrap();
        assert_eq!(cfg.serial_number, "");
        assert_eq!(cfg.firmware_version, "1.0");
    }

    #[test]
    fn test_api_config_short_blob_is_empty() {
        let cfg = ApiConfig::decode(&[0x01, 0x02]).unwrap();
        assert_eq!(cfg, ApiConfig::default());
    }
}
