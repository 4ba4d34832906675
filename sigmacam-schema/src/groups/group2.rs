//! Data group 2: drive, exposure mode, flash and white balance.

use bytes::BufMut;
use sigmacam_protocol::VendorOp;

use crate::enums::{
    AeMeteringMode, DriveMode, ExposureMode, FlashMode, FlashSetting, FlashType, ImageQuality,
    Resolution, SpecialMode, WhiteBalance,
};
use crate::error::{DecodeError, EncodeError};
use crate::groups::DataGroup;
use crate::wire::Reader;

mod bits {
    pub const RESERVED_3: u16 = 0x8000;
    pub const RESERVED_2: u16 = 0x4000;
    pub const RESERVED_1: u16 = 0x2000;
    pub const RESERVED_0: u16 = 0x1000;
    pub const AE_METERING: u16 = 0x0800;
    pub const EXPOSURE_MODE: u16 = 0x0400;
    pub const SPECIAL_MODE: u16 = 0x0200;
    pub const DRIVE_MODE: u16 = 0x0100;
    pub const IMAGE_QUALITY: u16 = 0x0080;
    pub const RESOLUTION: u16 = 0x0040;
    pub const WHITE_BALANCE: u16 = 0x0020;
    pub const RESERVED_5: u16 = 0x0010;
    pub const FLASH_SETTING: u16 = 0x0008;
    pub const FLASH_MODE: u16 = 0x0004;
    pub const RESERVED_4: u16 = 0x0002;
    pub const FLASH_TYPE: u16 = 0x0001;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CamDataGroup2 {
    pub drive_mode: Option<DriveMode>,
    pub special_mode: Option<SpecialMode>,
    pub exposure_mode: Option<ExposureMode>,
    pub ae_metering_mode: Option<AeMeteringMode>,
    pub flash_type: Option<FlashType>,
    pub flash_mode: Option<FlashMode>,
    pub flash_setting: Option<FlashSetting>,
    pub white_balance: Option<WhiteBalance>,
    pub resolution: Option<Resolution>,
    pub image_quality: Option<ImageQuality>,
}

impl DataGroup for CamDataGroup2 {
    const GET: VendorOp = VendorOp::GetCamDataGroup2;
    const SET: VendorOp = VendorOp::SetCamDataGroup2;
    const NAME: &'static str = "CamDataGroup2";

    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fp = 0u16;
        if self.ae_metering_mode.is_some() {
            fp |= bits::AE_METERING;
        }
        if self.exposure_mode.is_some() {
            fp |= bits::EXPOSURE_MODE;
        }
        if self.special_mode.is_some() {
            fp |= bits::SPECIAL_MODE;
        }
        if self.drive_mode.is_some() {
            fp |= bits::DRIVE_MODE;
        }
        if self.image_quality.is_some() {
            fp |= bits::IMAGE_QUALITY;
        }
        if self.resolution.is_some() {
            fp |= bits::RESOLUTION;
        }
        if self.white_balance.is_some() {
            fp |= bits::WHITE_BALANCE;
        }
        if self.flash_setting.is_some() {
            fp |= bits::FLASH_SETTING;
        }
        if self.flash_mode.is_some() {
            fp |= bits::FLASH_MODE;
        }
        if self.flash_type.is_some() {
            fp |= bits::FLASH_TYPE;
        }

        let mut out = Vec::new();
        out.put_u8(0x00);
        out.put_u16(fp);
        if let Some(v) = self.drive_mode {
            out.put_u8(v.code());
        }
        if let Some(v) = self.special_mode {
            out.put_u8(v.code());
        }
        if let Some(v) = self.exposure_mode {
            out.put_u8(v.code());
        }
        if let Some(v) = self.ae_metering_mode {
            out.put_u8(v.code());
        }
        if let Some(v) = self.flash_type {
            out.put_u8(v.code());
        }
        if let Some(v) = self.flash_mode {
            out.put_u8(v.code());
        }
        if let Some(v) = self.flash_setting {
            out.put_u8(v.code());
        }
        if let Some(v) = self.white_balance {
            out.put_u8(v.code());
        }
        if let Some(v) = self.resolution {
            out.put_u8(v.code());
        }
        if let Some(v) = self.image_quality {
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
        if has(bits::DRIVE_MODE) {
            g.drive_mode = Some(DriveMode::from_code(r.u8()?));
        }
        if has(bits::SPECIAL_MODE) {
            g.special_mode = Some(SpecialMode::from_code(r.u8()?));
        }
        if has(bits::EXPOSURE_MODE) {
            g.exposure_mode = Some(ExposureMode::from_code(r.u8()?));
        }
        if has(bits::AE_METERING) {
            g.ae_metering_mode = Some(AeMeteringMode::from_code(r.u8()?));
        }
        if has(bits::RESERVED_3) {
            r.skip(1)?;
        }
        if has(bits::RESERVED_2) {
            r.skip(1)?;
        }
        if has(bits::RESERVED_1) {
            r.skip(1)?;
        }
        if has(bits::RESERVED_0) {
            r.skip(1)?;
        }
        if has(bits::FLASH_TYPE) {
            g.flash_type = Some(FlashType::from_code(r.u8()?));
        }
        if has(bits::RESERVED_4) {
            r.skip(1)?;
        }
        if has(bits::FLASH_MODE) {
            g.flash_mode = Some(FlashMode::from_code(r.u8()?));
        }
        if has(bits::FLASH_SETTING) {
            g.flash_setting = Some(FlashSetting::from_code(r.u8()?));
        }
        if has(bits::RESERVED_5) {
            r.skip(1)?;
        }
        if has(bits::WHITE_BALANCE) {
            g.white_balance = Some(WhiteBalance::from_code(r.u8()?));
        }
        if has(bits::RESOLUTION) {
            g.resolution = Some(Resolution::from_code(r.u8()?));
        }
        if has(bits::IMAGE_QUALITY) {
            g.image_quality = Some(ImageQuality::from_code(r.u8()?));
        }
        r.skip(1)?;
        Ok(g)
    }
}
