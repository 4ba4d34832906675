//! # sigmacam
//!
//! Remote control for SIGMA cameras over the PTP/ISO 15740 vendor extension.
//!
//! This umbrella crate re-exports the workspace components:
//!
//! - [`protocol`] — PTP container wire format and code spaces
//! - [`schema`] — vendor record codecs (data groups, capture status, APEX)
//! - [`transport`] — the byte-pipe trait, a fake for tests, USB behind the
//!   `usb` feature
//! - [`client`] — the transaction engine and the vendor command layer
//!
//! # Example
//!
//! ```no_run
//! use sigmacam::client::{CameraPtp, SigmaCamera};
//! use sigmacam::schema::{CamDataGroup2, DriveMode};
//! # fn run(transport: impl sigmacam::transport::Transport) -> Result<(), sigmacam::client::CameraError> {
//! let mut cam = SigmaCamera::new(CameraPtp::new(transport));
//! cam.ptp_mut().open_session(1)?;
//! let cfg = cam.config_api()?;
//! println!("connected to {}", cfg.camera_model);
//!
//! let mut g2 = CamDataGroup2::default();
//! g2.drive_mode = Some(DriveMode::SingleCapture);
//! cam.set_group(&g2)?;
//! # Ok(()) }
//! ```

pub use sigmacam_client as client;
pub use sigmacam_protocol as protocol;
pub use sigmacam_schema as schema;
pub use sigmacam_transport as transport;
