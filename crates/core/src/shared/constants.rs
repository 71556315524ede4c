pub const FACE_CASCADE_NAME: &str = "haarcascade_frontalface_default.xml";
pub const FACE_CASCADE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/haarcascades/haarcascade_frontalface_default.xml";

pub const EYE_CASCADE_NAME: &str = "haarcascade_eye.xml";
pub const EYE_CASCADE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/haarcascades/haarcascade_eye.xml";

pub const SMILE_CASCADE_NAME: &str = "haarcascade_smile.xml";
pub const SMILE_CASCADE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/haarcascades/haarcascade_smile.xml";

pub const LANDMARK_MODEL_NAME: &str = "lbfmodel.yaml";
pub const LANDMARK_MODEL_URL: &str =
    "https://raw.githubusercontent.com/kurnianggoro/GSOC2017/master/data/lbfmodel.yaml";

/// Where distribution packages and Homebrew install the OpenCV cascades.
pub const OPENCV_DATA_DIRS: &[&str] = &[
    "/usr/share/opencv4/haarcascades",
    "/usr/local/share/opencv4/haarcascades",
    "/opt/homebrew/share/opencv4/haarcascades",
    "/usr/share/opencv/haarcascades",
];

pub const LANDMARK_COUNT: usize = 68;

pub const WINDOW_TITLE: &str = "Face Detection";

pub const MIN_NEIGHBORS_TRACKBAR: &str = "Min Neighbors";
pub const MIN_NEIGHBORS_MAX: i32 = 20;
pub const DEFAULT_MIN_NEIGHBORS: i32 = 5;

pub const SCALE_TRACKBAR: &str = "Scale Factor (%)";
pub const SCALE_PERCENT_MAX: i32 = 200;
pub const DEFAULT_SCALE_PERCENT: i32 = 110;

/// Cascade scale step must exceed 1.0; anything below 1.1 is too slow to be live.
pub const MIN_SCALE_FACTOR: f64 = 1.1;

pub const SMILE_SCALE_FACTOR: f64 = 1.1;
/// Smile cascades fire on teeth and lips everywhere; demand much more agreement.
pub const SMILE_MIN_NEIGHBORS_FLOOR: i32 = 25;
pub const SMILE_MIN_WIDTH_RATIO: f64 = 0.3;
pub const SMILE_MIN_HEIGHT_RATIO: f64 = 0.1;

pub const DEFAULT_OUTPUT_DIR: &str = "screenshots";
pub const DEFAULT_RECORDING_FPS: f64 = 20.0;
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// `waitKey` delay: just long enough for the GUI to pump its events.
pub const KEY_POLL_DELAY_MS: i32 = 1;
