pub mod cascade_detector;
pub mod facemark_predictor;
pub mod opencv_gray_converter;
