//! Data group 3: color, lens range, sounds and save destination.

use bytes::BufMut;
use sigmacam_protocol::VendorOp;

use crate::enums::{AfAuxLight, BatteryKind, ColorMode, ColorSpace, DestToSave};
use crate::error::{DecodeError, EncodeError};
use crate::groups::DataGroup;
use crate::wire::{fp12_4_decode, fp12_4_encode, Reader};

mod bits {
    pub const LENS_TELE_FOCAL_LENGTH: u16 = 0x8000;
    pub const LENS_WIDE_FOCAL_LENGTH: u16 = 0x4000;
    pub const BATTERY_KIND: u16 = 0x2000;
    pub const COLOR_MODE: u16 = 0x1000;
    pub const COLOR_SPACE: u16 = 0x0800;
    pub const RESERVED_2: u16 = 0x0400;
    pub const RESERVED_1: u16 = 0x0200;
    pub const RESERVED_0: u16 = 0x0100;
    pub const DEST_TO_SAVE: u16 = 0x0080;
    pub const RESERVED_6: u16 = 0x0040;
    pub const TIMER_SOUND: u16 = 0x0020;
    pub const RESERVED_5: u16 = 0x0010;
    pub const RESERVED_4: u16 = 0x0008;
    pub const RESERVED_3: u16 = 0x0004;
    pub const AF_BEEP: u16 = 0x0002;
    pub const AF_AUX_LIGHT: u16 = 0x0001;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CamDataGroup3 {
    pub color_space: Option<ColorSpace>,
    pub color_mode: Option<ColorMode>,
    pub battery_kind: Option<BatteryKind>,
    /// Lens wide-end focal length in millimeters (12.4 fixed point on wire).
    pub lens_wide_focal_length: Option<f32>,
    /// Lens tele-end focal length in millimeters (12.4 fixed point on wire).
    pub lens_tele_focal_length: Option<f32>,
    pub af_aux_light: Option<AfAuxLight>,
    pub af_beep: Option<u8>,
    pub timer_sound: Option<u8>,
    pub dest_to_save: Option<DestToSave>,
}

impl DataGroup for CamDataGroup3 {
    const GET: VendorOp = VendorOp::GetCamDataGroup3;
    const SET: VendorOp = VendorOp::SetCamDataGroup3;
    const NAME: &'static str = "CamDataGroup3";

    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fp = 0u16;
        if self.lens_tele_focal_length.is_some() {
            fp |= bits::LENS_TELE_FOCAL_LENGTH;
        }
        if self.lens_wide_focal_length.is_some() {
            fp |= bits::LENS_WIDE_FOCAL_LENGTH;
        }
        if self.battery_kind.is_some() {
            fp |= bits::BATTERY_KIND;
        }
        if self.color_mode.is_some() {
            fp |= bits::COLOR_MODE;
        }
        if self.color_space.is_some() {
            fp |= bits::COLOR_SPACE;
        }
        if self.dest_to_save.is_some() {
            fp |= bits::DEST_TO_SAVE;
        }
        if self.timer_sound.is_some() {
            fp |= bits::TIMER_SOUND;
        }
        if self.af_beep.is_some() {
            fp |= bits::AF_BEEP;
        }
        if self.af_aux_light.is_some() {
            fp |= bits::AF_AUX_LIGHT;
        }

        let mut out = Vec::new();
        out.put_u8(0x00);
        out.put_u16(fp);
        if let Some(v) = self.color_space {
            out.put_u8(v.code());
        }
        if let Some(v) = self.color_mode {
            out.put_u8(v.code());
        }
        if let Some(v) = self.battery_kind {
            out.put_u8(v.code());
        }
        if let Some(v) = self.lens_wide_focal_length {
            out.put_u16_le(fp12_4_encode(v));
        }
        if let Some(v) = self.lens_tele_focal_length {
            out.put_u16_le(fp12_4_encode(v));
        }
        if let Some(v) = self.af_aux_light {
            out.put_u8(v.code());
        }
        if let Some(v) = self.af_beep {
            out.put_u8(v);
        }
        if let Some(v) = self.timer_sound {
            out.put_u8(v);
        }
        if let Some(v) = self.dest_to_save {
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
        if has(bits::RESERVED_0) {
            r.skip(1)?;
        }
        if has(bits::RESERVED_1) {
            r.skip(1)?;
        }
        if has(bits::RESERVED_2) {
            r.skip(1)?;
        }
        if has(bits::COLOR_SPACE) {
            g.color_space = Some(ColorSpace::from_code(r.u8()?));
        }
        if has(bits::COLOR_MODE) {
            g.color_mode = Some(ColorMode::from_code(r.u8()?));
        }
        if has(bits::BATTERY_KIND) {
            g.battery_kind = Some(BatteryKind::from_code(r.u8()?));
        }
        if has(bits::LENS_WIDE_FOCAL_LENGTH) {
            g.lens_wide_focal_length = Some(fp12_4_decode(r.u16_le()?));
        }
        if has(bits::LENS_TELE_FOCAL_LENGTH) {
            g.lens_tele_focal_length = Some(fp12_4_decode(r.u16_le()?));
        }
        if has(bits::AF_AUX_LIGHT) {
            g.af_aux_light = Some(AfAuxLight::from_code(r.u8()?));
        }
        if has(bits::AF_BEEP) {
            g.af_beep = Some(r.u8()?);
        }
        if has(bits::RESERVED_3) {
            r.skip(1)?;
        }
        if has(bits::RESERVED_4) {
            r.skip(1)?;
        }
        if has(bits::RESERVED_5) {
            r.skip(1)?;
        }
        if has(bits::TIMER_SOUND) {
            g.timer_sound = Some(r.u8()?);
        }
        if has(bits::RESERVED_6) {
            r.skip(1)?;
        }
        if has(bits::DEST_TO_SAVE) {
            g.dest_to_save = Some(DestToSave::from_code(r.u8()?));
        }
        r.skip(1)?;
        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_color_mode_and_dest() {
        let g = CamDataGroup3 {
            color_mode: Some(ColorMode::Standard),
            dest_to_save: Some(DestToSave::Both),
            ..Default::default()
        };
        assert_eq!(g.encode().unwrap(), [0x00, 0x10, 0x80, 0x03, 0x03, 0x00]);
    }

    #[test]
    fn test_focal_lengths_fixed_point() {
        let g = CamDataGroup3 {
            lens_wide_focal_length: Some(24.0),
            lens_tele_focal_length: Some(70.5),
            ..Default::default()
        };
        let wire = g.encode().unwrap();
        // 24.0 -> 0x0180 LE, 70.5 -> 0x0468 LE.
        assert_eq!(wire, [0x00, 0xC0, 0x00, 0x80, 0x01, 0x68, 0x04, 0x00]);
        let back = CamDataGroup3::decode(&wire).unwrap();
        assert_eq!(back.lens_wide_focal_length, Some(24.0));
        assert_eq!(back.lens_tele_focal_length, Some(70.5));
    }

    #[test]
    fn test_roundtrip_all_fields() {
        let g = CamDataGroup3 {
            color_space: Some(ColorSpace::AdobeRgb),
            color_mode: Some(ColorMode::Vivid),
            battery_kind: Some(BatteryKind::AcAdapter),
            lens_wide_focal_length: Some(17.0),
            lens_tele_focal_length: Some(50.0),
            af_aux_light: Some(AfAuxLight::On),
            af_beep: Some(1),
            timer_sound: Some(0),
            dest_to_save: Some(DestToSave::InComputer),
        };
        let back = CamDataGroup3::decode(&g.encode().unwrap()).unwrap();
        assert_eq!(back, g);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        // Every subset of settable fields must survive the wire unchanged.
        // Focal lengths are exact sixteenths, so the fixed-point trip is
        // lossless.
        proptest! {
            #[test]
            fn prop_any_subset_roundtrips(mask in 0u16..512) {
                let g = CamDataGroup3 {
                    color_space: (mask & 0x001 != 0).then_some(ColorSpace::AdobeRgb),
                    color_mode: (mask & 0x002 != 0).then_some(ColorMode::Vivid),
                    battery_kind: (mask & 0x004 != 0).then_some(BatteryKind::AcAdapter),
                    lens_wide_focal_length: (mask & 0x008 != 0).then_some(24.0),
                    lens_tele_focal_length: (mask & 0x010 != 0).then_some(70.5),
                    af_aux_light: (mask & 0x020 != 0).then_some(AfAuxLight::On),
                    af_beep: (mask & 0x040 != 0).then_some(1),
                    timer_sound: (mask & 0x080 != 0).then_some(0),
                    dest_to_save: (mask & 0x100 != 0).then_some(DestToSave::InCamera),
                };
                let wire = g.encode().unwrap();
                // Focal lengths take two bytes; everything else one.
                let focal = (mask & 0x008 != 0) as usize + (mask & 0x010 != 0) as usize;
                prop_assert_eq!(wire.len(), 4 + (mask as u32).count_ones() as usize + focal);
                prop_assert_eq!(CamDataGroup3::decode(&wire).unwrap(), g);
            }
        }
    }
}
