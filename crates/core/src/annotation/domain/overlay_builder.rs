use crate::annotation::domain::overlay::{Color, Overlay};
use crate::detection::domain::detection_mode::DetectionMode;
use crate::detection::domain::frame_analyzer::Analysis;

const BOX_THICKNESS: i32 = 2;
const THIN_BOX_THICKNESS: i32 = 1;
const LANDMARK_RADIUS: i32 = 1;

const FPS_ORIGIN: (i32, i32) = (10, 30);
const MODE_ORIGIN: (i32, i32) = (10, 60);
/// Distance of the REC marker from the right edge.
const REC_RIGHT_INSET: i32 = 100;
const REC_Y: i32 = 30;

/// Session status printed over the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hud {
    pub fps: f64,
    pub mode: DetectionMode,
    pub recording: bool,
    pub frame_width: u32,
}

/// Detection boxes and landmarks first, HUD text on top.
pub fn build_overlay(analysis: &Analysis, hud: &Hud) -> Overlay {
    let mut overlay = Overlay::new();
    draw_analysis(&mut overlay, analysis);
    draw_hud(&mut overlay, hud);
    overlay
}

fn draw_analysis(overlay: &mut Overlay, analysis: &Analysis) {
    match analysis.mode {
        DetectionMode::Face => {
            for face in &analysis.faces {
                overlay.rect(*face, Color::GREEN, BOX_THICKNESS);
            }
            for landmarks in &analysis.landmarks {
                for point in landmarks.pixels() {
                    overlay.dot(point, LANDMARK_RADIUS, Color::YELLOW);
                }
            }
        }
        DetectionMode::Eyes => {
            for eye in &analysis.features {
                overlay.rect(*eye, Color::BLUE, BOX_THICKNESS);
            }
        }
        DetectionMode::Smile => {
            for face in &analysis.faces {
                overlay.rect(*face, Color::GREEN, THIN_BOX_THICKNESS);
            }
            for smile in &analysis.features {
                overlay.rect(*smile, Color::RED, BOX_THICKNESS);
            }
        }
    }
}

fn draw_hud(overlay: &mut Overlay, hud: &Hud) {
    overlay.text(format!("FPS: {:.2}", hud.fps), FPS_ORIGIN, Color::GREEN);
    overlay.text(format!("Mode: {}", hud.mode), MODE_ORIGIN, Color::GREEN);
    if hud.recording {
        let x = hud.frame_width as i32 - REC_RIGHT_INSET;
        overlay.text("REC", (x, REC_Y), Color::RED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::domain::overlay::Shape;
    use crate::detection::domain::face_landmarks::FaceLandmarks;
    use crate::shared::constants::LANDMARK_COUNT;
    use crate::shared::region::Region;

    fn hud(mode: DetectionMode, recording: bool) -> Hud {
        Hud {
            fps: 29.971,
            mode,
            recording,
            frame_width: 640,
        }
    }

    fn rects(overlay: &Overlay) -> Vec<(Region, Color, i32)> {
        overlay
            .shapes()
            .iter()
            .filter_map(|s| match s {
                Shape::Rect {
                    region,
                    color,
                    thickness,
                } => Some((*region, *color, *thickness)),
                _ => None,
            })
            .collect()
    }

    fn texts(overlay: &Overlay) -> Vec<(String, (i32, i32), Color)> {
        overlay
            .shapes()
            .iter()
            .filter_map(|s| match s {
                Shape::Text {
                    text,
                    origin,
                    color,
                    ..
                } => Some((text.clone(), *origin, *color)),
                _ => None,
            })
            .collect()
    }

    fn dot_count(overlay: &Overlay) -> usize {
        overlay
            .shapes()
            .iter()
            .filter(|s| matches!(s, Shape::Dot { .. }))
            .count()
    }

    #[test]
    fn test_face_mode_draws_thick_green_boxes() {
        let face = Region::new(10, 20, 30, 40);
        let analysis = Analysis {
            mode: DetectionMode::Face,
            faces: vec![face],
            ..Analysis::default()
        };
        let overlay = build_overlay(&analysis, &hud(DetectionMode::Face, false));

        assert_eq!(rects(&overlay), vec![(face, Color::GREEN, 2)]);
        assert_eq!(dot_count(&overlay), 0);
    }

    #[test]
    fn test_face_mode_draws_one_dot_per_landmark() {
        let landmarks = FaceLandmarks::new(vec![(50.0, 60.0); LANDMARK_COUNT]).unwrap();
        let analysis = Analysis {
            mode: DetectionMode::Face,
            faces: vec![Region::new(0, 0, 100, 100)],
            landmarks: vec![landmarks.clone(), landmarks],
            ..Analysis::default()
        };
        let overlay = build_overlay(&analysis, &hud(DetectionMode::Face, false));

        assert_eq!(dot_count(&overlay), 2 * LANDMARK_COUNT);
        assert!(overlay.shapes().contains(&Shape::Dot {
            center: (50, 60),
            radius: 1,
            color: Color::YELLOW,
        }));
    }

    #[test]
    fn test_eyes_mode_draws_eyes_without_face_box() {
        let eye = Region::new(15, 25, 8, 6);
        let analysis = Analysis {
            mode: DetectionMode::Eyes,
            faces: vec![Region::new(10, 20, 30, 40)],
            features: vec![eye],
            ..Analysis::default()
        };
        let overlay = build_overlay(&analysis, &hud(DetectionMode::Eyes, false));

        assert_eq!(rects(&overlay), vec![(eye, Color::BLUE, 2)]);
    }

    #[test]
    fn test_smile_mode_draws_thin_face_and_red_smile() {
        let face = Region::new(10, 20, 30, 40);
        let smile = Region::new(15, 45, 12, 6);
        let analysis = Analysis {
            mode: DetectionMode::Smile,
            faces: vec![face],
            features: vec![smile],
            ..Analysis::default()
        };
        let overlay = build_overlay(&analysis, &hud(DetectionMode::Smile, false));

        assert_eq!(
            rects(&overlay),
            vec![(face, Color::GREEN, 1), (smile, Color::RED, 2)]
        );
    }

    #[test]
    fn test_hud_text_and_positions() {
        let overlay = build_overlay(&Analysis::default(), &hud(DetectionMode::Eyes, false));
        assert_eq!(
            texts(&overlay),
            vec![
                ("FPS: 29.97".to_string(), (10, 30), Color::GREEN),
                ("Mode: eyes".to_string(), (10, 60), Color::GREEN),
            ]
        );
    }

    #[test]
    fn test_rec_marker_only_while_recording() {
        let overlay = build_overlay(&Analysis::default(), &hud(DetectionMode::Face, true));
        let texts = texts(&overlay);
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[2], ("REC".to_string(), (540, 30), Color::RED));
    }

    #[test]
    fn test_hud_drawn_after_detections() {
        let analysis = Analysis {
            mode: DetectionMode::Face,
            faces: vec![Region::new(0, 0, 5, 5)],
            ..Analysis::default()
        };
        let overlay = build_overlay(&analysis, &hud(DetectionMode::Face, false));
        assert!(matches!(overlay.shapes()[0], Shape::Rect { .. }));
        assert!(matches!(overlay.shapes().last(), Some(Shape::Text { .. })));
    }
}
