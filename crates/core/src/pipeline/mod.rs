pub mod command;
pub mod fps_counter;
pub mod live_detection_use_case;
pub mod output_paths;
pub mod recording;
pub mod session_logger;
pub mod session_state;
