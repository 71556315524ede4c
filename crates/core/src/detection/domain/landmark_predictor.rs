use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::shared::frame::GrayFrame;
use crate::shared::region::Region;

/// Fits 68 landmark points to every detected face box of one image.
///
/// Returns one entry per face, in the order of `faces`, in frame
/// coordinates.
pub trait LandmarkPredictor {
    fn predict(
        &mut self,
        image: &GrayFrame,
        faces: &[Region],
    ) -> Result<Vec<FaceLandmarks>, Box<dyn std::error::Error>>;
}
