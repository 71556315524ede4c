use crate::shared::frame::{Frame, GrayFrame};

/// Produces the single-channel image every detector runs on.
pub trait GrayConverter {
    fn to_gray(&self, frame: &Frame) -> Result<GrayFrame, Box<dyn std::error::Error>>;
}
