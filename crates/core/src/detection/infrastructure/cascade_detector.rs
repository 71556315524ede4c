use std::path::Path;

use opencv::core::{Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::shared::frame::GrayFrame;
use crate::shared::mat::{gray_to_mat, rect_to_region};
use crate::shared::region::Region;

/// Viola-Jones detector backed by an OpenCV Haar cascade file.
pub struct CascadeDetector {
    classifier: CascadeClassifier,
    hits: Vector<Rect>,
}

impl CascadeDetector {
    /// Loads a cascade XML. A missing or malformed file is an error rather
    /// than a detector that silently finds nothing.
    pub fn new(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let name = path.to_str().ok_or("cascade path is not valid UTF-8")?;
        let classifier = CascadeClassifier::new(name)?;
        if classifier.empty()? {
            return Err(format!("failed to load cascade {}", path.display()).into());
        }
        Ok(Self {
            classifier,
            hits: Vector::new(),
        })
    }
}

impl ObjectDetector for CascadeDetector {
    fn detect(
        &mut self,
        image: &GrayFrame,
        roi: Option<Region>,
        params: &DetectionParams,
    ) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
        let cropped;
        let source = match roi {
            Some(r) => {
                cropped = image.crop(&r);
                &cropped
            }
            None => image,
        };
        if source.width() == 0 || source.height() == 0 {
            return Ok(Vec::new());
        }
        let mat = gray_to_mat(source)?;

        let min_size = params
            .min_size
            .map(|(w, h)| Size::new(w, h))
            .unwrap_or_default();

        self.hits.clear();
        self.classifier.detect_multi_scale(
            &mat,
            &mut self.hits,
            params.scale_factor,
            params.min_neighbors,
            0,
            min_size,
            Size::default(),
        )?;

        Ok(self.hits.iter().map(|r| rect_to_region(&r)).collect())
    }
}
