//! Data group 4: crop, live view, HDR, DNG and lens optics correction.

use bytes::BufMut;
use sigmacam_protocol::VendorOp;

use crate::enums::{
    ContShootSpeed, DcCropMode, DngQuality, EImageStab, Hdr, HighIsoExt, LocChromaticAberration,
    LocColorShade, LocColorShadeAcq, LocDiffraction, LocDistortion, LocVignetting, LvMagnifyRatio,
};
use crate::error::{DecodeError, EncodeError};
use crate::groups::DataGroup;
use crate::wire::Reader;

mod bits {
    pub const CONT_SHOOT_SPEED: u16 = 0x8000;
    pub const HIGH_ISO_EXT: u16 = 0x4000;
    pub const LV_MAGNIFY_RATIO: u16 = 0x2000;
    pub const DC_CROP_MODE: u16 = 0x1000;
    pub const RESERVED_3: u16 = 0x0800;
    pub const RESERVED_2: u16 = 0x0400;
    pub const RESERVED_1: u16 = 0x0200;
    pub const RESERVED_0: u16 = 0x0100;
    pub const RESERVED_5: u16 = 0x0080;
    pub const RESERVED_6: u16 = 0x0040;
    pub const SHUTTER_SOUND: u16 = 0x0020;
    pub const E_IMAGE_STAB: u16 = 0x0010;
    pub const LOC: u16 = 0x0008;
    pub const FILL_LIGHT: u16 = 0x0004;
    pub const DNG_QUALITY: u16 = 0x0002;
    pub const HDR: u16 = 0x0001;
}

/// Lens optics correction settings share the single `LOC` presence bit: the
/// six fields travel as one block, with unset members encoded as `Off`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CamDataGroup4 {
    pub dc_crop_mode: Option<DcCropMode>,
    pub lv_magnify_ratio: Option<LvMagnifyRatio>,
    pub high_iso_ext: Option<HighIsoExt>,
    pub cont_shoot_speed: Option<ContShootSpeed>,
    pub hdr: Option<Hdr>,
    pub dng_quality: Option<DngQuality>,
    pub fill_light: Option<i8>,
    pub loc_distortion: Option<LocDistortion>,
    pub loc_chromatic_aberration: Option<LocChromaticAberration>,
    pub loc_diffraction: Option<LocDiffraction>,
    pub loc_vignetting: Option<LocVignetting>,
    pub loc_color_shade: Option<LocColorShade>,
    pub loc_color_shade_acq: Option<LocColorShadeAcq>,
    pub e_image_stab: Option<EImageStab>,
    pub shutter_sound: Option<u8>,
}

impl CamDataGroup4 {
    fn has_loc(&self) -> bool {
        self.loc_distortion.is_some()
            || self.loc_chromatic_aberration.is_some()
            || self.loc_diffraction.is_some()
            || self.loc_vignetting.is_some()
            || self.loc_color_shade.is_some()
            || self.loc_color_shade_acq.is_some()
    }
}

impl DataGroup for CamDataGroup4 {
    const GET: VendorOp = VendorOp::GetCamDataGroup4;
    const SET: VendorOp = VendorOp::SetCamDataGroup4;
    const NAME: &'static str = "CamDataGroup4";

    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fp = 0u16;
        if self.cont_shoot_speed.is_some() {
            fp |= bits::CONT_SHOOT_SPEED;
        }
        if self.high_iso_ext.is_some() {
            fp |= bits::HIGH_ISO_EXT;
        }
        if self.lv_magnify_ratio.is_some() {
            fp |= bits::LV_MAGNIFY_RATIO;
        }
        if self.dc_crop_mode.is_some() {
            fp |= bits::DC_CROP_MODE;
        }
        if self.shutter_sound.is_some() {
            fp |= bits::SHUTTER_SOUND;
        }
        if self.e_image_stab.is_some() {
            fp |= bits::E_IMAGE_STAB;
        }
        if self.has_loc() {
            fp |= bits::LOC;
        }
        if self.fill_light.is_some() {
            fp |= bits::FILL_LIGHT;
        }
        if self.dng_quality.is_some() {
            fp |= bits::DNG_QUALITY;
        }
        if self.hdr.is_some() {
            fp |= bits::HDR;
        }

        let mut out = Vec::new();
        out.put_u8(0x00);
        out.put_u16(fp);
        if let Some(v) = self.dc_crop_mode {
            out.put_u8(v.code());
        }
        if let Some(v) = self.lv_magnify_ratio {
            out.put_u8(v.code());
        }
        if let Some(v) = self.high_iso_ext {
            out.put_u8(v.code());
        }
        if let Some(v) = self.cont_shoot_speed {
            out.put_u8(v.code());
        }
        if let Some(v) = self.hdr {
            out.put_u8(v.code());
        }
        if let Some(v) = self.dng_quality {
            out.put_u8(v.code());
        }
        if let Some(v) = self.fill_light {
            out.put_u8(v as u8);
        }
        if self.has_loc() {
            out.put_u8(self.loc_distortion.unwrap_or(LocDistortion::Off).code());
            out.put_u8(
                self.loc_chromatic_aberration
                    .unwrap_or(LocChromaticAberration::Off)
                    .code(),
            );
            out.put_u8(self.loc_diffraction.unwrap_or(LocDiffraction::Off).code());
            out.put_u8(self.loc_vignetting.unwrap_or(LocVignetting::Off).code());
            out.put_u8(self.loc_color_shade.unwrap_or(LocColorShade::Off).code());
            out.put_u8(
                self.loc_color_shade_acq
                    .unwrap_or(LocColorShadeAcq::Off)
                    .code(),
            );
        }
        if let Some(v) = self.e_image_stab {
            out.put_u8(v.code());
        }
        if let Some(v) = self.shutter_sound {
            out.put_u8(v);
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
        if has(bits::RESERVED_3) {
            r.skip(1)?;
        }
        if has(bits::DC_CROP_MODE) {
            g.dc_crop_mode = Some(DcCropMode::from_code(r.u8()?));
        }
        if has(bits::LV_MAGNIFY_RATIO) {
            g.lv_magnify_ratio = Some(LvMagnifyRatio::from_code(r.u8()?));
        }
        if has(bits::HIGH_ISO_EXT) {
            g.high_iso_ext = Some(HighIsoExt::from_code(r.u8()?));
        }
        if has(bits::CONT_SHOOT_SPEED) {
            g.cont_shoot_speed = Some(ContShootSpeed::from_code(r.u8()?));
        }
        if has(bits::HDR) {
            g.hdr = Some(Hdr::from_code(r.u8()?));
        }
        if has(bits::DNG_QUALITY) {
            g.dng_quality = Some(DngQuality::from_code(r.u8()?));
        }
        if has(bits::FILL_LIGHT) {
            g.fill_light = Some(r.i8()?);
        }
        if has(bits::LOC) {
            g.loc_distortion = Some(LocDistortion::from_code(r.u8()?));
            g.loc_chromatic_aberration = Some(LocChromaticAberration::from_code(r.u8()?));
            g.loc_diffraction = Some(LocDiffraction::from_code(r.u8()?));
            g.loc_vignetting = Some(LocVignetting::from_code(r.u8()?));
            g.loc_color_shade = Some(LocColorShade::from_code(r.u8()?));
            g.loc_color_shade_acq = Some(LocColorShadeAcq::from_code(r.u8()?));
        }
        if has(bits::E_IMAGE_STAB) {
            g.e_image_stab = Some(EImageStab::from_code(r.u8()?));
        }
        if has(bits::SHUTTER_SOUND) {
            g.shutter_sound = Some(r.u8()?);
        }
        r.skip(1)?;
        Ok(g)
    }
}
