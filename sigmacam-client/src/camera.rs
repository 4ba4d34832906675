//! SIGMA vendor operations on top of the transaction engine.

use std::time::Duration;

use tracing::{debug, info, warn};

use sigmacam_protocol::VendorOp;
use sigmacam_schema::{
    ApiConfig, BigPartialPictFile, CamCaptStatus, CaptureMode, DataGroup, DestToSave,
    PictFileInfo2, SnapCommand, ViewFrame,
};
use sigmacam_transport::Transport;

use crate::engine::{CameraPtp, Response};
use crate::error::CameraError;

/// Undocumented zero padding several vendor operations require as their data
/// phase.
const ZERO_PAD: [u8; 10] = [0; 10];

const OBJECT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Default chunk size for vendor frame-buffer downloads.
const DOWNLOAD_CHUNK: u32 = 1024 * 1024;

/// A SIGMA camera in Camera Control mode.
///
/// Wraps a [`CameraPtp`] engine; the standard PTP surface stays reachable
/// through [`SigmaCamera::ptp_mut`].
pub struct SigmaCamera<T> {
    ptp: CameraPtp<T>,
}

impl<T: Transport> SigmaCamera<T> {
    pub fn new(ptp: CameraPtp<T>) -> Self {
        Self { ptp }
    }

    pub fn ptp(&self) -> &CameraPtp<T> {
        &self.ptp
    }

    pub fn ptp_mut(&mut self) -> &mut CameraPtp<T> {
        &mut self.ptp
    }

    fn transact_vendor(
        &mut self,
        op: VendorOp,
        params: &[u32],
        data_out: Option<&[u8]>,
        expect_data_in: bool,
    ) -> Result<Response, CameraError> {
        self.ptp.transact(op.into(), params, data_out, expect_data_in)
    }

    /// Puts the camera under API control and returns its identity block.
    ///
    /// Must be the first vendor operation of a session; the camera resets to
    /// default settings and ignores body controls until
    /// [`SigmaCamera::close_application`].
    pub fn config_api(&mut self) -> Result<ApiConfig, CameraError> {
        let r = self.transact_vendor(VendorOp::ConfigApi, &[0], None, true)?;
        if r.data.is_empty() {
            return Err(CameraError::EmptyData {
                operation: "ConfigApi",
            });
        }
        let cfg = ApiConfig::decode(&r.data)?;
        info!(
            model = %cfg.camera_model,
            serial = %cfg.serial_number,
            firmware = %cfg.firmware_version,
            version = cfg.communication_version,
            "api configured"
        );
        Ok(cfg)
    }

    /// Tells the camera the controlling application is going away.
    pub fn close_application(&mut self) -> Result<(), CameraError> {
        let r = self.transact_vendor(VendorOp::CloseApplication, &[], Some(&ZERO_PAD), false)?;
        debug!(
            response = format_args!("{:#06x}", r.response_code),
            "close application"
        );
        Ok(())
    }

    /// Fetches one camera data group.
    pub fn get_group<G: DataGroup>(&mut self) -> Result<G, CameraError> {
        let r = self.ptp.transact(G::GET.into(), &[], None, true)?;
        Ok(G::decode(&r.data)?)
    }

    /// Applies the set fields of one camera data group.
    pub fn set_group<G: DataGroup>(&mut self, group: &G) -> Result<Response, CameraError> {
        let bytes = group.encode()?;
        debug!(record = G::NAME, len = bytes.len(), "set group");
        self.ptp.transact(G::SET.into(), &[], Some(&bytes), false)
    }

    /// Triggers a capture.
    pub fn snap_command(&mut self, cmd: &SnapCommand) -> Result<u16, CameraError> {
        let payload = cmd.encode();
        let r = self.transact_vendor(VendorOp::SnapCommand, &[], Some(&payload), false)?;
        Ok(r.response_code)
    }

    pub fn snap(&mut self, mode: CaptureMode, amount: u8) -> Result<u16, CameraError> {
        self.snap_command(&SnapCommand { mode, amount })
    }

    /// Reads the capture status, for one image id or the most recent shot.
    pub fn get_capt_status(&mut self, image_id: Option<u8>) -> Result<CamCaptStatus, CameraError> {
        let params = image_id.map(|id| [u32::from(id)]);
        let params = params.as_ref().map_or(&[][..], |p| p);
        let r = self.transact_vendor(VendorOp::GetCamCaptStatus, params, None, true)?;
        Ok(CamCaptStatus::decode(&r.data)?)
    }

    /// Polls the capture status until the image is ready.
    ///
    /// Completion statuses (`ImageGenCompleted`, `ImageDataStorageCompleted`,
    /// `Cleared`) return immediately; in-progress statuses keep polling until
    /// the budget runs out; anything else is reported and returned as-is so
    /// the caller can inspect the failure.
    pub fn wait_completion(
        &mut self,
        image_id: u8,
        polls: u32,
        sleep: Duration,
    ) -> Result<CamCaptStatus, CameraError> {
        std::thread::sleep(sleep);
        let mut status = self.get_capt_status(Some(image_id))?;
        for _ in 1..polls.max(1) {
            if status.status.is_terminal_success() {
                return Ok(status);
            }
            if !status.status.is_in_progress() {
                warn!(
                    code = format_args!("{:#06x}", status.status.code()),
                    "unexpected capture status"
                );
                return Ok(status);
            }
            debug!(
                image_id = status.image_id,
                head = status.image_db_head,
                tail = status.image_db_tail,
                code = format_args!("{:#06x}", status.status.code()),
                "capture in progress"
            );
            std::thread::sleep(sleep);
            status = self.get_capt_status(Some(image_id))?;
        }
        Ok(status)
    }

    /// Drops one shooting result from the camera's status database.
    pub fn clear_image_db_single(&mut self, image_id: u32) -> Result<(), CameraError> {
        self.transact_vendor(
            VendorOp::ClearImageDbSingle,
            &[image_id],
            Some(&ZERO_PAD),
            false,
        )?;
        debug!(image_id, "cleared image db entry");
        Ok(())
    }

    /// Metadata of a frame-buffer image; `None` asks for the current shot.
    pub fn get_pict_file_info2(
        &mut self,
        object_handle: Option<u32>,
    ) -> Result<PictFileInfo2, CameraError> {
        let params = object_handle.map(|h| [h]);
        let params = params.as_ref().map_or(&[][..], |p| p);
        let r = self.transact_vendor(VendorOp::GetPictFileInfo2, params, None, true)?;
        Ok(PictFileInfo2::decode(&r.data)?)
    }

    /// Downloads one chunk of a frame-buffer image.
    pub fn get_big_partial_pict_file(
        &mut self,
        address: u32,
        start: u32,
        max_bytes: u32,
    ) -> Result<BigPartialPictFile, CameraError> {
        let r = self.transact_vendor(
            VendorOp::GetBigPartialPictFile,
            &[address, start, max_bytes],
            None,
            true,
        )?;
        Ok(BigPartialPictFile::decode(&r.data)?)
    }

    /// One live-view JPEG frame.
    pub fn get_view_frame(&mut self) -> Result<ViewFrame, CameraError> {
        let r = self.transact_vendor(VendorOp::GetViewFrame, &[], None, true)?;
        Ok(ViewFrame::decode(&r.data)?)
    }

    /// Downloads a frame-buffer image in chunks through the vendor partial
    /// transfer.
    pub fn get_object_vendor(
        &mut self,
        object_handle: u32,
        chunk: u32,
    ) -> Result<Vec<u8>, CameraError> {
        let info = self.get_pict_file_info2(Some(object_handle))?;
        self.download_pict_file(&info, chunk)
    }

    /// Like [`SigmaCamera::get_object_vendor`] for the current shot.
    pub fn get_current_image_vendor(&mut self, chunk: u32) -> Result<Vec<u8>, CameraError> {
        let info = self.get_pict_file_info2(None)?;
        self.download_pict_file(&info, chunk)
    }

    fn download_pict_file(
        &mut self,
        info: &PictFileInfo2,
        chunk: u32,
    ) -> Result<Vec<u8>, CameraError> {
        debug!(
            file = %info.file_name,
            size = info.file_size,
            address = format_args!("{:#010x}", info.file_address),
            "vendor download"
        );
        let mut out = Vec::with_capacity(info.file_size as usize);
        let mut start = 0u32;
        let mut left = info.file_size;
        while left > 0 {
            let req = chunk.min(left);
            let part = self.get_big_partial_pict_file(info.file_address, start, req)?;
            if part.acquired_size == 0 || part.partial_data.is_empty() {
                break;
            }
            out.extend_from_slice(&part.partial_data);
            start += part.acquired_size;
            left = left.saturating_sub(part.acquired_size);
            // A short chunk means the camera has nothing more to give.
            if (part.partial_data.len() as u32) < req {
                break;
            }
        }
        Ok(out)
    }

    /// Fetches the image produced by the last capture.
    ///
    /// With [`DestToSave::InComputer`] the camera exposes the shot as a PTP
    /// object and announces it on the interrupt pipe; otherwise the bytes are
    /// pulled from the frame buffer through the vendor transfer.
    pub fn get_latest_image(
        &mut self,
        dest: DestToSave,
        timeout: Duration,
    ) -> Result<Vec<u8>, CameraError> {
        if dest == DestToSave::InComputer {
            match self.ptp.wait_object_added(timeout, OBJECT_POLL_INTERVAL)? {
                Some(handle) => self.ptp.get_object(handle),
                None => Ok(Vec::new()),
            }
        } else {
            self.get_current_image_vendor(DOWNLOAD_CHUNK)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigmacam_protocol::{Container, ContainerKind};
    use sigmacam_schema::{CamDataGroup2, CamDataGroup3, CaptStatus, ColorMode, DriveMode};
    use sigmacam_transport::{build_response, FakeTransport};

    fn camera() -> SigmaCamera<FakeTransport> {
        SigmaCamera::new(CameraPtp::new(FakeTransport::new()))
    }

    // `txn` must match the transaction the engine will issue next (ids start
    // at 1 and increase per call).
    fn queue_data_response(
        cam: &mut SigmaCamera<FakeTransport>,
        opcode: u16,
        txn: u32,
        payload: &[u8],
    ) {
        let mut wire = Container::data(opcode, txn, payload).encode().to_vec();
        wire.extend_from_slice(&build_response(0x2001, txn, &[]));
        cam.ptp_mut().transport_mut().queue_read(&wire);
    }

    #[test]
    fn test_set_group_writes_command_then_data() {
        let mut cam = camera();
        let g = CamDataGroup2 {
            drive_mode: Some(DriveMode::SingleCapture),
            ..Default::default()
        };
        let r = cam.set_group(&g).unwrap();
        assert!(r.is_ok());

        let writes = &cam.ptp().transport().writes;
        assert_eq!(writes.len(), 2);

        let cmd = Container::decode(&writes[0]).unwrap();
        assert_eq!(cmd.kind, ContainerKind::Command);
        assert_eq!(cmd.code, u16::from(CamDataGroup2::SET));
        assert!(cmd.payload.is_empty());

        let data = Container::decode(&writes[1]).unwrap();
        assert_eq!(data.kind, ContainerKind::Data);
        assert_eq!(data.code, u16::from(CamDataGroup2::SET));
        assert_eq!(data.transaction_id, cmd.transaction_id);
        assert_eq!(&data.payload[..], [0x00, 0x01, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn test_set_group3_wire_bytes() {
        // Save-destination Both + color mode Normal, both containers pinned
        // byte for byte. Transaction ids are session state, so they are
        // zeroed before comparing.
        let mut cam = camera();
        let g = CamDataGroup3 {
            dest_to_save: Some(DestToSave::Both),
            color_mode: Some(ColorMode::Normal),
            ..Default::default()
        };
        cam.set_group(&g).unwrap();

        let mask_txn = |w: &[u8]| {
            let mut w = w.to_vec();
            w[8..12].fill(0);
            w
        };
        let writes = &cam.ptp().transport().writes;
        assert_eq!(
            mask_txn(&writes[0]),
            [0x0C, 0x00, 0x00, 0x00, 0x01, 0x00, 0x18, 0x90, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(
            mask_txn(&writes[1]),
            [
                0x12, 0x00, 0x00, 0x00, 0x02, 0x00, 0x18, 0x90, 0x00, 0x00, 0x00, 0x00, //
                0x00, 0x10, 0x80, 0x00, 0x03, 0x00,
            ]
        );
    }

    #[test]
    fn test_get_group_decodes_data_phase() {
        let mut cam = camera();
        queue_data_response(
            &mut cam,
            CamDataGroup2::GET.into(),
            1,
            &[0x00, 0x01, 0x00, 0x02, 0x00],
        );
        let g: CamDataGroup2 = cam.get_group().unwrap();
        assert_eq!(g.drive_mode, Some(DriveMode::ContinuousCapture));
        assert_eq!(g.white_balance, None);
    }

    #[test]
    fn test_snap_payload() {
        let mut cam = camera();
        let rc = cam.snap(CaptureMode::NonAfCapt, 2).unwrap();
        assert_eq!(rc, 0x2001);

        let data = Container::decode(&cam.ptp().transport().writes[1]).unwrap();
        assert_eq!(&data.payload[..], [0x00, 0x02, 0x02, 0x00]);
    }

    #[test]
    fn test_close_application_pads_ten_zeros() {
        let mut cam = camera();
        cam.close_application().unwrap();
        let data = Container::decode(&cam.ptp().transport().writes[1]).unwrap();
        assert_eq!(data.kind, ContainerKind::Data);
        assert_eq!(&data.payload[..], [0u8; 10]);
    }

    #[test]
    fn test_clear_image_db_single_params_and_padding() {
        let mut cam = camera();
        cam.clear_image_db_single(7).unwrap();
        let cmd = Container::decode(&cam.ptp().transport().writes[0]).unwrap();
        assert_eq!(cmd.params(), vec![7]);
        let data = Container::decode(&cam.ptp().transport().writes[1]).unwrap();
        assert_eq!(&data.payload[..], [0u8; 10]);
    }

    #[test]
    fn test_get_capt_status_optional_image_id() {
        let mut cam = camera();
        let payload = [0x00, 0x01, 0x00, 0x01, 0x02, 0x00, 0x01, 0x00];
        queue_data_response(&mut cam, VendorOp::GetCamCaptStatus.into(), 1, &payload);
        let st = cam.get_capt_status(None).unwrap();
        assert_eq!(st.status, CaptStatus::ShootSuccess);
        let cmd = Container::decode(&cam.ptp().transport().writes[0]).unwrap();
        assert!(cmd.params().is_empty());

        queue_data_response(&mut cam, VendorOp::GetCamCaptStatus.into(), 2, &payload);
        cam.get_capt_status(Some(3)).unwrap();
        let cmd = Container::decode(&cam.ptp().transport().writes[1]).unwrap();
        assert_eq!(cmd.params(), vec![3]);
    }

    #[test]
    fn test_config_api_empty_data_rejected() {
        let mut cam = camera();
        // Auto-OK only: no data phase arrives.
        let err = cam.config_api().unwrap_err();
        assert!(matches!(err, CameraError::EmptyData { operation: "ConfigApi" }));
    }

    fn capt_status_payload(code: u16) -> [u8; 8] {
        let c = code.to_le_bytes();
        [0x00, 0x01, 0x00, 0x01, c[0], c[1], 0x01, 0x00]
    }

    #[test]
    fn test_wait_completion_returns_on_terminal_status() {
        let mut cam = camera();
        queue_data_response(
            &mut cam,
            VendorOp::GetCamCaptStatus.into(),
            1,
            &capt_status_payload(0x0005),
        );
        let st = cam
            .wait_completion(1, 5, Duration::from_millis(1))
            .unwrap();
        assert_eq!(st.status, CaptStatus::ImageGenCompleted);
        assert_eq!(cam.ptp().transport().writes.len(), 1);
    }

    #[test]
    fn test_wait_completion_keeps_polling_through_progress() {
        let mut cam = camera();
        for (txn, code) in [(1, 0x0001u16), (2, 0x0004), (3, 0x0005)] {
            queue_data_response(
                &mut cam,
                VendorOp::GetCamCaptStatus.into(),
                txn,
                &capt_status_payload(code),
            );
        }
        let st = cam
            .wait_completion(1, 10, Duration::from_millis(1))
            .unwrap();
        assert_eq!(st.status, CaptStatus::ImageGenCompleted);
        assert_eq!(cam.ptp().transport().writes.len(), 3);
    }

    #[test]
    fn test_wait_completion_stops_on_failure_status() {
        let mut cam = camera();
        queue_data_response(
            &mut cam,
            VendorOp::GetCamCaptStatus.into(),
            1,
            &capt_status_payload(0x6001),
        );
        let st = cam
            .wait_completion(1, 10, Duration::from_millis(1))
            .unwrap();
        assert_eq!(st.status, CaptStatus::AfFailed);
        assert_eq!(cam.ptp().transport().writes.len(), 1);
    }

    #[test]
    fn test_vendor_download_loops_until_complete() {
        let mut cam = camera();

        // PictFileInfo2: 6-byte file at address 0x1000.
        let mut info = vec![0u8; 36];
        info[12..16].copy_from_slice(&0x1000u32.to_le_bytes());
        info[16..20].copy_from_slice(&6u32.to_le_bytes());
        info[28..32].copy_from_slice(b"JPG ");
        info.extend_from_slice(b"100SIGMA\0SDIM0001.JPG\0");
        queue_data_response(&mut cam, VendorOp::GetPictFileInfo2.into(), 1, &info);

        // Two chunks of 4 and 2 bytes.
        let mut part1 = 4u32.to_le_bytes().to_vec();
        part1.extend_from_slice(&[1, 2, 3, 4]);
        queue_data_response(&mut cam, VendorOp::GetBigPartialPictFile.into(), 2, &part1);
        let mut part2 = 2u32.to_le_bytes().to_vec();
        part2.extend_from_slice(&[5, 6]);
        queue_data_response(&mut cam, VendorOp::GetBigPartialPictFile.into(), 3, &part2);

        let bytes = cam.get_object_vendor(0x42, 4).unwrap();
        assert_eq!(bytes, [1, 2, 3, 4, 5, 6]);

        // Chunk requests: (addr, start, len) = (0x1000, 0, 4) then (0x1000, 4, 2).
        let writes = &cam.ptp().transport().writes;
        let first = Container::decode(&writes[1]).unwrap();
        assert_eq!(first.params(), vec![0x1000, 0, 4]);
        let second = Container::decode(&writes[2]).unwrap();
        assert_eq!(second.params(), vec![0x1000, 4, 2]);
    }
}
