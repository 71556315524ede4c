use crate::annotation::domain::overlay::Overlay;
use crate::shared::frame::Frame;

/// Draws an overlay onto a frame in place.
pub trait FrameAnnotator {
    fn render(&self, frame: &mut Frame, overlay: &Overlay)
        -> Result<(), Box<dyn std::error::Error>>;
}
