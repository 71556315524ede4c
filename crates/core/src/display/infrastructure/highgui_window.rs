use opencv::highgui;

use crate::detection::domain::detection_params::SliderPositions;
use crate::display::domain::preview_window::PreviewWindow;
use crate::shared::constants::{
    KEY_POLL_DELAY_MS, MIN_NEIGHBORS_MAX, MIN_NEIGHBORS_TRACKBAR, SCALE_PERCENT_MAX,
    SCALE_TRACKBAR, WINDOW_TITLE,
};
use crate::shared::frame::Frame;
use crate::shared::mat::frame_to_mat;

/// OpenCV HighGUI window with the detection trackbars.
///
/// Must be created, used and dropped on the same thread.
pub struct HighguiWindow {
    title: String,
    open: bool,
}

impl HighguiWindow {
    pub fn open(initial: SliderPositions) -> Result<Self, Box<dyn std::error::Error>> {
        Self::open_titled(WINDOW_TITLE, initial)
    }

    pub fn open_titled(
        title: &str,
        initial: SliderPositions,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE)?;
        let window = Self {
            title: title.to_string(),
            open: true,
        };

        highgui::create_trackbar(MIN_NEIGHBORS_TRACKBAR, title, None, MIN_NEIGHBORS_MAX, None)?;
        highgui::set_trackbar_pos(
            MIN_NEIGHBORS_TRACKBAR,
            title,
            initial.min_neighbors.clamp(0, MIN_NEIGHBORS_MAX),
        )?;
        highgui::create_trackbar(SCALE_TRACKBAR, title, None, SCALE_PERCENT_MAX, None)?;
        highgui::set_trackbar_pos(
            SCALE_TRACKBAR,
            title,
            initial.scale_percent.clamp(0, SCALE_PERCENT_MAX),
        )?;

        Ok(window)
    }
}

impl PreviewWindow for HighguiWindow {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mat = frame_to_mat(frame)?;
        highgui::imshow(&self.title, &mat)?;
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<char>, Box<dyn std::error::Error>> {
        Ok(decode_key(highgui::wait_key(KEY_POLL_DELAY_MS)?))
    }

    fn slider_positions(&self) -> Result<SliderPositions, Box<dyn std::error::Error>> {
        Ok(SliderPositions {
            min_neighbors: highgui::get_trackbar_pos(MIN_NEIGHBORS_TRACKBAR, &self.title)?,
            scale_percent: highgui::get_trackbar_pos(SCALE_TRACKBAR, &self.title)?,
        })
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if let Err(e) = highgui::destroy_window(&self.title) {
            log::warn!("Failed to close window: {e}");
        }
    }
}

impl Drop for HighguiWindow {
    fn drop(&mut self) {
        self.close();
    }
}

/// `waitKey` returns -1 for no key; some backends set modifier bits above
/// the low byte.
fn decode_key(code: i32) -> Option<char> {
    if code < 0 {
        return None;
    }
    let byte = (code & 0xFF) as u8;
    byte.is_ascii().then_some(byte as char)
}
