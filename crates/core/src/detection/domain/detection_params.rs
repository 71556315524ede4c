use crate::shared::constants::{
    DEFAULT_MIN_NEIGHBORS, DEFAULT_SCALE_PERCENT, MIN_SCALE_FACTOR, SMILE_MIN_HEIGHT_RATIO,
    SMILE_MIN_NEIGHBORS_FLOOR, SMILE_MIN_WIDTH_RATIO, SMILE_SCALE_FACTOR,
};
use crate::shared::region::Region;

/// Raw trackbar positions as read from the preview window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderPositions {
    pub min_neighbors: i32,
    pub scale_percent: i32,
}

impl Default for SliderPositions {
    fn default() -> Self {
        Self {
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            scale_percent: DEFAULT_SCALE_PERCENT,
        }
    }
}

/// Arguments for one multi-scale cascade pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionParams {
    /// Always >= [`MIN_SCALE_FACTOR`].
    pub scale_factor: f64,
    pub min_neighbors: i32,
    /// Smallest object (width, height) to report; `None` means no limit.
    pub min_size: Option<(i32, i32)>,
}

impl DetectionParams {
    pub fn from_sliders(sliders: SliderPositions) -> Self {
        Self {
            scale_factor: (sliders.scale_percent as f64 / 100.0).max(MIN_SCALE_FACTOR),
            min_neighbors: sliders.min_neighbors.max(0),
            min_size: None,
        }
    }

    /// Parameters for the smile pass inside `face`.
    ///
    /// Fixed scale step, a neighbor floor well above the face setting and a
    /// minimum size relative to the face.
    pub fn for_smile(&self, face: &Region) -> Self {
        Self {
            scale_factor: SMILE_SCALE_FACTOR,
            min_neighbors: self.min_neighbors.max(SMILE_MIN_NEIGHBORS_FLOOR),
            min_size: Some((
                (face.width as f64 * SMILE_MIN_WIDTH_RATIO) as i32,
                (face.height as f64 * SMILE_MIN_HEIGHT_RATIO) as i32,
            )),
        }
    }
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self::from_sliders(SliderPositions::default())
    }
}
