use crate::detection::domain::detection_mode::DetectionMode;
use crate::detection::domain::detection_params::DetectionParams;
use crate::detection::domain::face_landmarks::FaceLandmarks;
use crate::detection::domain::gray_converter::GrayConverter;
use crate::detection::domain::landmark_predictor::LandmarkPredictor;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::shared::frame::{Frame, GrayFrame};
use crate::shared::region::Region;

/// Everything found in one frame, in frame coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Analysis {
    pub mode: DetectionMode,
    pub faces: Vec<Region>,
    /// Eyes in eyes mode, smiles in smile mode, empty in face mode.
    pub features: Vec<Region>,
    /// One entry per face, only in face mode with landmarks enabled.
    pub landmarks: Vec<FaceLandmarks>,
}

/// Converts the frame to gray once, then runs the face pass and the
/// mode-specific pass inside each face.
pub struct FrameAnalyzer {
    gray_converter: Box<dyn GrayConverter>,
    face_detector: Box<dyn ObjectDetector>,
    eye_detector: Box<dyn ObjectDetector>,
    smile_detector: Box<dyn ObjectDetector>,
    landmark_predictor: Box<dyn LandmarkPredictor>,
}

impl FrameAnalyzer {
    pub fn new(
        gray_converter: Box<dyn GrayConverter>,
        face_detector: Box<dyn ObjectDetector>,
        eye_detector: Box<dyn ObjectDetector>,
        smile_detector: Box<dyn ObjectDetector>,
        landmark_predictor: Box<dyn LandmarkPredictor>,
    ) -> Self {
        Self {
            gray_converter,
            face_detector,
            eye_detector,
            smile_detector,
            landmark_predictor,
        }
    }

    pub fn analyze(
        &mut self,
        frame: &Frame,
        mode: DetectionMode,
        params: &DetectionParams,
        show_landmarks: bool,
    ) -> Result<Analysis, Box<dyn std::error::Error>> {
        let image = self.gray_converter.to_gray(frame)?;
        let faces = self.face_detector.detect(&image, None, params)?;
        let mut analysis = Analysis {
            mode,
            faces,
            ..Analysis::default()
        };

        match mode {
            DetectionMode::Face => {
                if show_landmarks && !analysis.faces.is_empty() {
                    analysis.landmarks = self.landmark_predictor.predict(&image, &analysis.faces)?;
                }
            }
            DetectionMode::Eyes => {
                for face in &analysis.faces {
                    let found = search_inside(self.eye_detector.as_mut(), &image, *face, params)?;
                    analysis.features.extend(found);
                }
            }
            DetectionMode::Smile => {
                for face in &analysis.faces {
                    let smile_params = params.for_smile(face);
                    let found = search_inside(
                        self.smile_detector.as_mut(),
                        &image,
                        face.lower_half(),
                        &smile_params,
                    )?;
                    analysis.features.extend(found);
                }
            }
        }

        Ok(analysis)
    }
}

/// Detects within `roi` and maps the hits back to frame coordinates.
fn search_inside(
    detector: &mut dyn ObjectDetector,
    image: &GrayFrame,
    roi: Region,
    params: &DetectionParams,
) -> Result<Vec<Region>, Box<dyn std::error::Error>> {
    let roi = roi.clamp_to(image.width(), image.height());
    if roi.is_empty() {
        return Ok(Vec::new());
    }
    let found = detector.detect(image, Some(roi), params)?;
    Ok(found.iter().map(|r| r.translate(roi.x, roi.y)).collect())
}
