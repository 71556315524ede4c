use opencv::core::{Mat, Point, Scalar};
use opencv::imgproc;
use opencv::prelude::*;

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::annotation::domain::overlay::{Color, Overlay, Shape};
use crate::shared::frame::Frame;
use crate::shared::mat::{frame_to_mat, region_to_rect};

/// Renders overlays with OpenCV's raster primitives and Hershey font.
pub struct OpencvAnnotator;

impl OpencvAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OpencvAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAnnotator for OpencvAnnotator {
    fn render(
        &self,
        frame: &mut Frame,
        overlay: &Overlay,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if overlay.is_empty() {
            return Ok(());
        }
        let mut mat = frame_to_mat(frame)?;
        for shape in overlay.shapes() {
            draw(&mut mat, shape)?;
        }
        frame.data_mut().copy_from_slice(mat.data_bytes()?);
        Ok(())
    }
}

fn draw(mat: &mut Mat, shape: &Shape) -> opencv::Result<()> {
    match shape {
        Shape::Rect {
            region,
            color,
            thickness,
        } => imgproc::rectangle(
            mat,
            region_to_rect(region),
            scalar(*color),
            *thickness,
            imgproc::LINE_8,
            0,
        ),
        Shape::Dot {
            center,
            radius,
            color,
        } => imgproc::circle(
            mat,
            Point::new(center.0, center.1),
            *radius,
            scalar(*color),
            imgproc::FILLED,
            imgproc::LINE_8,
            0,
        ),
        Shape::Text {
            text,
            origin,
            scale,
            color,
            thickness,
        } => imgproc::put_text(
            mat,
            text,
            Point::new(origin.0, origin.1),
            imgproc::FONT_HERSHEY_SIMPLEX,
            *scale,
            scalar(*color),
            *thickness,
            imgproc::LINE_8,
            false,
        ),
    }
}

fn scalar(color: Color) -> Scalar {
    Scalar::new(color.b as f64, color.g as f64, color.r as f64, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::region::Region;

    fn black(width: u32, height: u32) -> Frame {
        Frame::new(vec![0u8; (width * height * 3) as usize], width, height, 3, 0)
    }

    fn pixel(frame: &Frame, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * frame.width() + x) * 3) as usize;
        [frame.data()[i], frame.data()[i + 1], frame.data()[i + 2]]
    }

    #[test]
    fn test_rect_outline_drawn_in_bgr() {
        let mut frame = black(20, 20);
        let mut overlay = Overlay::new();
        overlay.rect(Region::new(2, 2, 10, 10), Color::RED, 1);

        OpencvAnnotator::new().render(&mut frame, &overlay).unwrap();

        assert_eq!(pixel(&frame, 2, 2), [0, 0, 255]);
        // interior untouched
        assert_eq!(pixel(&frame, 6, 6), [0, 0, 0]);
    }

    #[test]
    fn test_dot_is_filled() {
        let mut frame = black(10, 10);
        let mut overlay = Overlay::new();
        overlay.dot((5, 5), 1, Color::YELLOW);

        OpencvAnnotator::new().render(&mut frame, &overlay).unwrap();

        assert_eq!(pixel(&frame, 5, 5), [0, 255, 255]);
    }

    #[test]
    fn test_text_changes_pixels() {
        let mut frame = black(200, 60);
        let mut overlay = Overlay::new();
        overlay.text("FPS: 1.00", (10, 30), Color::GREEN);

        OpencvAnnotator::new().render(&mut frame, &overlay).unwrap();

        assert!(frame.data().chunks(3).any(|p| p == [0, 255, 0]));
    }

    #[test]
    fn test_empty_overlay_leaves_frame_alone() {
        let mut frame = black(4, 4);
        OpencvAnnotator::new()
            .render(&mut frame, &Overlay::new())
            .unwrap();
        assert!(frame.data().iter().all(|&b| b == 0));
    }
}
