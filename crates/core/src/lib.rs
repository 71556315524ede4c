//! Live webcam face, eye and smile detection with landmark overlay,
//! recording and screenshots.
//!
//! Each bounded context keeps its traits in `domain` and the OpenCV,
//! FFmpeg and `image` implementations in `infrastructure`.

pub mod annotation;
pub mod detection;
pub mod display;
pub mod pipeline;
pub mod shared;
pub mod video;
