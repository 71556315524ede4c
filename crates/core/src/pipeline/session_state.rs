use crate::detection::domain::detection_mode::DetectionMode;
use crate::pipeline::fps_counter::FpsCounter;
use crate::pipeline::recording::Recording;

/// Everything the keyboard can change, plus the running frame rate.
///
/// Lives for the whole session and is passed into every loop iteration.
pub struct SessionState {
    pub mode: DetectionMode,
    pub show_landmarks: bool,
    /// `Some` while recording; the guard owns the video writer.
    pub recording: Option<Recording>,
    pub fps: FpsCounter,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            mode: DetectionMode::default(),
            show_landmarks: false,
            recording: None,
            fps: FpsCounter::start(),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SessionState::new();
        assert_eq!(state.mode, DetectionMode::Face);
        assert!(!state.show_landmarks);
        assert!(!state.is_recording());
        assert_eq!(state.fps.frames(), 0);
    }
}
