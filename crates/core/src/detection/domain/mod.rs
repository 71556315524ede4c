pub mod detection_mode;
pub mod detection_params;
pub mod face_landmarks;
pub mod frame_analyzer;
pub mod gray_converter;
pub mod landmark_predictor;
pub mod object_detector;
