use crate::detection::domain::detection_params::DetectionParams;
use crate::shared::frame::GrayFrame;
use crate::shared::region::Region;

/// Domain interface for a pretrained object detector (face, eye, smile).
///
/// When `roi` is given only that part of the image is searched and the
/// returned regions are relative to the ROI's top-left corner. An empty
/// result is not an error.
pub trait ObjectDetector {
    fn detect(
        &mut self,
        image: &GrayFrame,
        roi: Option<Region>,
        params: &DetectionParams,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>>;
}
