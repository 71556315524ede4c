use opencv::core::Mat;
use opencv::imgproc;
use opencv::prelude::*;

use crate::detection::domain::gray_converter::GrayConverter;
use crate::shared::frame::{Frame, GrayFrame};
use crate::shared::mat::frame_to_mat;

/// `cvtColor(BGR2GRAY)`; single-channel frames are copied through.
#[derive(Debug, Default)]
pub struct OpencvGrayConverter;

impl OpencvGrayConverter {
    pub fn new() -> Self {
        Self
    }
}

impl GrayConverter for OpencvGrayConverter {
    fn to_gray(&self, frame: &Frame) -> Result<GrayFrame, Box<dyn std::error::Error>> {
        if frame.channels() == 1 {
            return Ok(GrayFrame::new(
                frame.data().to_vec(),
                frame.width(),
                frame.height(),
            ));
        }
        let bgr = frame_to_mat(frame)?;
        let mut gray = Mat::default();
        imgproc::cvt_color_def(&bgr, &mut gray, imgproc::COLOR_BGR2GRAY)?;
        Ok(GrayFrame::new(
            gray.data_bytes()?.to_vec(),
            frame.width(),
            frame.height(),
        ))
    }
}
