//! # sigmacam-client
//!
//! Camera control client for the SIGMA PTP vendor extension.
//!
//! This crate provides:
//! - [`CameraPtp`], the container transaction engine over any
//!   [`sigmacam_transport::Transport`]
//! - [`SigmaCamera`], the vendor operation surface (data groups, capture,
//!   status polling, image download)
//! - [`CameraError`], the combined error type for both layers

pub mod camera;
pub mod engine;
pub mod error;

pub use camera::SigmaCamera;
pub use engine::{CameraPtp, Response};
pub use error::CameraError;
