//! Data group 1: exposure parameters plus camera-reported state.

use bytes::BufMut;
use sigmacam_protocol::VendorOp;

use crate::enums::{AbSetting, IsoAuto, ProgramShift};
use crate::error::{DecodeError, EncodeError};
use crate::groups::DataGroup;
use crate::wire::{fp12_4_decode, Reader};

/// Presence bits, big-endian on the wire. The low byte is camera-reported
/// state: decoded when present, never encoded.
mod bits {
    pub const AB_SETTING: u16 = 0x8000;
    pub const AB_VALUE: u16 = 0x4000;
    pub const EXP_COMP: u16 = 0x2000;
    pub const ISO_SPEED: u16 = 0x1000;
    pub const ISO_AUTO: u16 = 0x0800;
    pub const PROGRAM_SHIFT: u16 = 0x0400;
    pub const APERTURE: u16 = 0x0200;
    pub const SHUTTER_SPEED: u16 = 0x0100;
    pub const RESERVED_0: u16 = 0x0080;
    pub const EXP_COMP_EXCLUDE_AB: u16 = 0x0040;
    pub const AB_SHOT_REMAIN: u16 = 0x0020;
    pub const BATTERY_STATE: u16 = 0x0010;
    pub const CURRENT_LENS_FOCAL_LENGTH: u16 = 0x0008;
    pub const MEDIA_STATUS: u16 = 0x0004;
    pub const MEDIA_FREE_SPACE: u16 = 0x0002;
    pub const FRAME_BUFFER_STATE: u16 = 0x0001;
}

/// Shutter, aperture, ISO and bracketing, all as APEX codes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CamDataGroup1 {
    pub shutter_speed: Option<u8>,
    pub aperture: Option<u8>,
    pub program_shift: Option<ProgramShift>,
    pub iso_auto: Option<IsoAuto>,
    pub iso_speed: Option<u8>,
    pub exp_comp: Option<u8>,
    pub ab_value: Option<u8>,
    pub ab_setting: Option<AbSetting>,

    // Camera-reported, decode only.
    pub frame_buffer_state: Option<u8>,
    pub media_free_space: Option<u16>,
    pub media_status: Option<u8>,
    pub current_lens_focal_length: Option<f32>,
    pub battery_state: Option<u8>,
    pub ab_shot_remain_number: Option<u8>,
    pub exp_comp_exclude_ab: Option<u8>,
}

impl DataGroup for CamDataGroup1 {
    const GET: VendorOp = VendorOp::GetCamDataGroup1;
    const SET: VendorOp = VendorOp::SetCamDataGroup1;
    const NAME: &'static str = "CamDataGroup1";

    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fp = 0u16;
        if self.shutter_speed.is_some() {
            fp |= bits::SHUTTER_SPEED;
        }
        if self.aperture.is_some() {
            fp |= bits::APERTURE;
        }
        if self.program_shift.is_some() {
            fp |= bits::PROGRAM_SHIFT;
        }
        if self.iso_auto.is_some() {
            fp |= bits::ISO_AUTO;
        }
        if self.iso_speed.is_some() {
            fp |= bits::ISO_SPEED;
        }
        if self.exp_comp.is_some() {
            fp |= bits::EXP_COMP;
        }
        if self.ab_value.is_some() {
            fp |= bits::AB_VALUE;
        }
        if self.ab_setting.is_some() {
            fp |= bits::AB_SETTING;
        }

        let mut out = Vec::new();
        out.put_u8(0x00);
        out.put_u16(fp);
        if let Some(v) = self.shutter_speed {
            out.put_u8(v);
        }
        if let Some(v) = self.aperture {
            out.put_u8(v);
        }
        if let Some(v) = self.program_shift {
            out.put_u8(v.code());
        }
        if let Some(v) = self.iso_auto {
            out.put_u8(v.code());
        }
        if let Some(v) = self.iso_speed {
            out.put_u8(v);
        }
        if let Some(v) = self.exp_comp {
            out.put_u8(v);
        }
        if let Some(v) = self.ab_value {
            out.put_u8(v);
        }
        if let Some(v) = self.ab_setting {
            out.put_u8(v.code());
        }
        out.put_u8(0x00);
        Ok(out)
    }

    fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let mut r = Reader::new(Self::NAME, raw);
        r.skip(1)?;
        let fp = r.u16_be()?;
        let has = |b: u16| fp & b != 0;

        let mut g = Self::default();
        if has(bits::SHUTTER_SPEED) {
            g.shutter_speed = Some(r.u8()?);
        }
        if has(bits::APERTURE) {
            g.aperture = Some(r.u8()?);
        }
        if has(bits::PROGRAM_SHIFT) {
            g.program_shift = Some(ProgramShift::from_code(r.u8()?));
        }
        if has(bits::ISO_AUTO) {
            g.iso_auto = Some(IsoAuto::from_code(r.u8()?));
        }
        if has(bits::ISO_SPEED) {
            g.iso_speed = Some(r.u8()?);
        }
        if has(bits::EXP_COMP) {
            g.exp_comp = Some(r.u8()?);
        }
        if has(bits::AB_VALUE) {
            g.ab_value = Some(r.u8()?);
        }
        if has(bits::AB_SETTING) {
            g.ab_setting = Some(AbSetting::from_code(r.u8()?));
        }
        if has(bits::FRAME_BUFFER_STATE) {
            g.frame_buffer_state = Some(r.u8()?);
        }
        if has(bits::MEDIA_FREE_SPACE) {
            g.media_free_space = Some(r.u16_le()?);
        }
        if has(bits::MEDIA_STATUS) {
            g.media_status = Some(r.u8()?);
        }
        if has(bits::CURRENT_LENS_FOCAL_LENGTH) {
            g.current_lens_focal_length = Some(fp12_4_decode(r.u16_le()?));
        }
        if has(bits::BATTERY_STATE) {
            g.battery_state = Some(r.u8()?);
        }
        if has(bits::AB_SHOT_REMAIN) {
            g.ab_shot_remain_number = Some(r.u8()?);
        }
        if has(bits::EXP_COMP_EXCLUDE_AB) {
            g.exp_comp_exclude_ab = Some(r.u8()?);
        }
        if has(bits::RESERVED_0) {
            r.skip(1)?;
        }
        r.skip(1)?;
        Ok(g)
    }
}
