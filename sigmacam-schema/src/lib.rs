//! # sigmacam-schema
//!
//! Binary record codecs for the SIGMA PTP vendor extension.
//!
//! This crate provides:
//! - The five presence-bitmap camera data groups ([`CamDataGroup1`] ..
//!   [`CamDataGroup5`]) behind the [`DataGroup`] trait
//! - Fixed-layout decode-only records ([`CamCaptStatus`], [`PictFileInfo2`],
//!   [`BigPartialPictFile`], [`ViewFrame`], [`ApiConfig`])
//! - The [`SnapCommand`] capture-trigger record
//! - APEX lookup tables for ISO, shutter speed, aperture and exposure
//!   compensation
//!
//! Every data group shares one wire convention: a zero header byte, a
//! big-endian 16-bit presence bitmap, the present fields in a fixed per-group
//! order, and a zero parity byte. The bit-to-field assignment is part of wire
//! compatibility and lives in a named constant block per group.

pub mod apex;
pub mod enums;
pub mod error;
pub mod groups;
pub mod records;
pub mod wire;

pub use apex::{
    ApexConverter, APERTURE_HALF, APERTURE_THIRD, EXP_COMP_HALF, EXP_COMP_THIRD, ISO_SPEED,
    SHUTTER_SPEED_HALF, SHUTTER_SPEED_THIRD,
};
pub use enums::*;
pub use error::{DecodeError, EncodeError};
pub use groups::{
    CamDataGroup1, CamDataGroup2, CamDataGroup3, CamDataGroup4, CamDataGroup5, DataGroup,
};
pub use records::{ApiConfig, BigPartialPictFile, CamCaptStatus, PictFileInfo2, SnapCommand, ViewFrame};
