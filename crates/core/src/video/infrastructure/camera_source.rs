use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use thiserror::Error;

use crate::shared::frame::Frame;
use crate::shared::mat::mat_to_frame;
use crate::video::domain::frame_source::FrameSource;

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("could not open camera {index}")]
    NotOpened { index: i32 },
    #[error("camera backend error: {0}")]
    Backend(#[from] opencv::Error),
}

/// Webcam capture through OpenCV's `VideoCapture`.
///
/// The device is released on [`FrameSource::close`] or when dropped,
/// whichever comes first.
pub struct CameraSource {
    capture: VideoCapture,
    buffer: Mat,
    frames_read: usize,
    released: bool,
}

impl CameraSource {
    pub fn open(index: i32) -> Result<Self, CameraError> {
        let capture = VideoCapture::new(index, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            return Err(CameraError::NotOpened { index });
        }
        log::info!("Opened camera {index}");
        Ok(Self {
            capture,
            buffer: Mat::default(),
            frames_read: 0,
            released: false,
        })
    }
}

impl FrameSource for CameraSource {
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        if self.released {
            return Ok(None);
        }
        if !self.capture.read(&mut self.buffer)? || self.buffer.empty() {
            return Ok(None);
        }

        let frame = if self.buffer.is_continuous() {
            mat_to_frame(&self.buffer, self.frames_read)?
        } else {
            mat_to_frame(&self.buffer.try_clone()?, self.frames_read)?
        };
        self.frames_read += 1;
        Ok(Some(frame))
    }

    fn close(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.capture.release() {
            log::warn!("Failed to release camera: {e}");
        }
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CameraError::NotOpened { index: 3 }.to_string(),
            "could not open camera 3"
        );
    }

    #[test]
    fn test_unlikely_device_index_fails_to_open() {
        // No machine running the tests has a thousand cameras attached.
        assert!(CameraSource::open(999).is_err());
    }
}
