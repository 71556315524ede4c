//! Copies between owned frames and OpenCV matrices.

use opencv::core::{Mat, Rect, Scalar, CV_8UC1, CV_8UC3};
use opencv::prelude::*;

use crate::shared::frame::{Frame, GrayFrame};
use crate::shared::region::Region;

pub fn frame_to_mat(frame: &Frame) -> opencv::Result<Mat> {
    let typ = if frame.channels() == 1 { CV_8UC1 } else { CV_8UC3 };
    let mut mat = Mat::new_rows_cols_with_default(
        frame.height() as i32,
        frame.width() as i32,
        typ,
        Scalar::all(0.0),
    )?;
    mat.data_bytes_mut()?.copy_from_slice(frame.data());
    Ok(mat)
}

pub fn gray_to_mat(gray: &GrayFrame) -> opencv::Result<Mat> {
    let mut mat = Mat::new_rows_cols_with_default(
        gray.height() as i32,
        gray.width() as i32,
        CV_8UC1,
        Scalar::all(0.0),
    )?;
    mat.data_bytes_mut()?.copy_from_slice(gray.data());
    Ok(mat)
}

/// Builds a frame from a continuous 8-bit BGR (or gray) matrix.
pub fn mat_to_frame(mat: &Mat, index: usize) -> opencv::Result<Frame> {
    let channels = mat.channels() as u8;
    let data = mat.data_bytes()?.to_vec();
    Ok(Frame::new(
        data,
        mat.cols() as u32,
        mat.rows() as u32,
        channels,
        index,
    ))
}

pub fn region_to_rect(region: &Region) -> Rect {
    Rect::new(region.x, region.y, region.width, region.height)
}

pub fn rect_to_region(rect: &Rect) -> Region {
    Region::new(rect.x, rect.y, rect.width, rect.height)
}
