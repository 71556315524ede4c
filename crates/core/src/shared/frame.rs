use ndarray::{s, ArrayView2};

use crate::shared::region::Region;

/// A single captured frame: contiguous BGR bytes in row-major order.
///
/// BGR is the camera's native order, so no channel swap happens on the hot
/// path; writers that need RGB convert at their own boundary.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Single-channel 8-bit image used as detector input.
#[derive(Clone, Debug)]
pub struct GrayFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl GrayFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize),
            "data length must equal width * height"
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_ndarray(&self) -> ArrayView2<'_, u8> {
        ArrayView2::from_shape((self.height as usize, self.width as usize), &self.data)
            .expect("GrayFrame data length must match dimensions")
    }

    /// Copies out the pixels under `region`, clamped to the image.
    pub fn crop(&self, region: &Region) -> GrayFrame {
        let r = region.clamp_to(self.width, self.height);
        let (x, y) = (r.x as usize, r.y as usize);
        let (w, h) = (r.width as usize, r.height as usize);
        let view = self.as_ndarray();
        let data: Vec<u8> = view.slice(s![y..y + h, x..x + w]).iter().copied().collect();
        GrayFrame::new(data, w as u32, h as u32)
    }
}
