//! Takes a single picture and downloads it to the current directory.
//!
//! Run with `cargo run --example capture --features usb` while a camera is
//! connected over USB.

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use sigmacam_client::{CameraPtp, SigmaCamera};
use sigmacam_schema::{CamDataGroup2, CaptureMode, DriveMode};
use sigmacam_transport::UsbTransport;

const CHUNK: u32 = 1 << 20;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let transport = UsbTransport::open_first()?;
    let mut cam = SigmaCamera::new(CameraPtp::new(transport));

    cam.ptp_mut().open_session(1)?;
    let config = cam.config_api()?;
    println!(
        "connected to {} (firmware {})",
        config.camera_model, config.firmware_version
    );

    let group2 = CamDataGroup2 {
        drive_mode: Some(DriveMode::SingleCapture),
        ..Default::default()
    };
    cam.set_group(&group2)?;

    cam.snap(CaptureMode::GeneralCapt, 1)?;
    let status = cam.wait_completion(0, 50, Duration::from_millis(200))?;
    println!("capture finished with status {:?}", status.status);

    let info = cam.get_pict_file_info2(None)?;
    let data = cam.get_current_image_vendor(CHUNK)?;
    std::fs::write(&info.file_name, &data)?;
    println!("wrote {} ({} bytes)", info.file_name, data.len());

    cam.clear_image_db_single(u32::from(status.image_id))?;
    cam.close_application()?;
    cam.ptp_mut().close_session()?;
    Ok(())
}
