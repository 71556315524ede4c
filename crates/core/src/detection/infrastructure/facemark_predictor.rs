use std::path::Path;

use opencv::core::{Point2f, Ptr, Rect, Vector};
use opencv::face::{self, Facemark};
use opencv::prelude::*;

use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::detection::domain::landmark_predictor::LandmarkPredictor;
use crate::shared::frame::GrayFrame;
use crate::shared::mat::{gray_to_mat, region_to_rect};
use crate::shared::region::Region;

/// 68-point landmarks from OpenCV's Facemark LBF model (`lbfmodel.yaml`).
pub struct FacemarkPredictor {
    facemark: Ptr<Facemark>,
}

impl FacemarkPredictor {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let name = model_path
            .to_str()
            .ok_or("landmark model path is not valid UTF-8")?;
        let mut facemark = face::create_facemark_lbf()?;
        facemark.load_model(name)?;
        log::debug!("Loaded landmark model {}", model_path.display());
        Ok(Self { facemark })
    }
}

impl LandmarkPredictor for FacemarkPredictor {
    /// One `fit` over the whole frame for all faces.
    fn predict(
        &mut self,
        image: &GrayFrame,
        faces: &[Region],
    ) -> Result<Vec<FaceLandmarks>, Box<dyn std::error::Error>> {
        if faces.is_empty() {
            return Ok(Vec::new());
        }
        let mat = gray_to_mat(image)?;
        let rects: Vector<Rect> = faces.iter().map(region_to_rect).collect();
        let mut fitted: Vector<Vector<Point2f>> = Vector::new();

        if !self.facemark.fit(&mat, &rects, &mut fitted)? {
            return Err(format!("landmark fit failed for {} face(s)", faces.len()).into());
        }
        collect_landmarks(&fitted, faces.len())
    }
}

/// Converts Facemark output, requiring one 68-point set per face.
fn collect_landmarks(
    fitted: &Vector<Vector<Point2f>>,
    expected_faces: usize,
) -> Result<Vec<FaceLandmarks>, Box<dyn std::error::Error>> {
    if fitted.len() != expected_faces {
        return Err(format!(
            "landmark fit returned {} result(s) for {expected_faces} face(s)",
            fitted.len()
        )
        .into());
    }
    fitted
        .iter()
        .map(|points| -> Result<FaceLandmarks, Box<dyn std::error::Error>> {
            let points = points.iter().map(|p| (p.x as f64, p.y as f64)).collect();
            Ok(FaceLandmarks::new(points)?)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::LANDMARK_COUNT;

    fn face_points(offset: f32) -> Vector<Point2f> {
        (0..LANDMARK_COUNT)
            .map(|i| Point2f::new(offset + i as f32, offset))
            .collect()
    }

    #[test]
    fn test_missing_model_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FacemarkPredictor::new(&dir.path().join("lbfmodel.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_collect_keeps_face_order() {
        let fitted: Vector<Vector<Point2f>> =
            Vector::from_iter([face_points(10.0), face_points(200.0)]);
        let landmarks = collect_landmarks(&fitted, 2).unwrap();

        assert_eq!(landmarks.len(), 2);
        assert_eq!(landmarks[0].pixels().next(), Some((10, 10)));
        assert_eq!(landmarks[1].pixels().next(), Some((200, 200)));
    }

    #[test]
    fn test_collect_rejects_missing_faces() {
        let fitted: Vector<Vector<Point2f>> = Vector::from_iter([face_points(0.0)]);
        assert!(collect_landmarks(&fitted, 2).is_err());
    }

    #[test]
    fn test_collect_rejects_short_point_set() {
        let short: Vector<Point2f> = (0..5).map(|i| Point2f::new(i as f32, 0.0)).collect();
        let fitted: Vector<Vector<Point2f>> = Vector::from_iter([short]);
        assert!(collect_landmarks(&fitted, 1).is_err());
    }
}
