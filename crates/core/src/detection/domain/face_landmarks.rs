use thiserror::Error;

use crate::shared::constants::LANDMARK_COUNT;

#[derive(Error, Debug, PartialEq)]
pub enum LandmarkError {
    #[error("expected {expected} landmarks, got {actual}")]
    WrongCount { expected: usize, actual: usize },
}

/// The 68 landmark points of one face, in frame coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceLandmarks {
    points: Vec<(f64, f64)>,
}

impl FaceLandmarks {
    pub fn new(points: Vec<(f64, f64)>) -> Result<Self, LandmarkError> {
        if points.len() != LANDMARK_COUNT {
            return Err(LandmarkError::WrongCount {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }

    /// Points rounded to the pixel grid, for drawing.
    pub fn pixels(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.points
            .iter()
            .map(|&(x, y)| (x.round() as i32, y.round() as i32))
    }
}
