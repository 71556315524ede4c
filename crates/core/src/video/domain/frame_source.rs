use crate::shared::frame::Frame;

/// A live stream of frames, such as a camera.
pub trait FrameSource {
    /// Blocks for the next frame. `Ok(None)` means the stream has ended.
    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases the device. Safe to call more than once.
    fn close(&mut self);
}
