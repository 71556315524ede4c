/// Stream properties a video writer needs before the first frame arrives.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

impl VideoMetadata {
    /// Metadata for a recording sized to `frame` at a fixed rate.
    pub fn for_frame(frame: &crate::shared::frame::Frame, fps: f64) -> Self {
        Self {
            width: frame.width(),
            height: frame.height(),
            fps,
        }
    }
}
