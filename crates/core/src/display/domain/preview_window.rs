use crate::detection::domain::detection_params::SliderPositions;
use crate::shared::frame::Frame;

/// On-screen preview with the two tuning sliders and keyboard input.
pub trait PreviewWindow {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Pumps GUI events briefly and returns the key pressed, if any.
    fn poll_key(&mut self) -> Result<Option<char>, Box<dyn std::error::Error>>;

    fn slider_positions(&self) -> Result<SliderPositions, Box<dyn std::error::Error>>;

    /// Destroys the window. Safe to call more than once.
    fn close(&mut self);
}
