pub mod constants;
pub mod frame;
pub mod mat;
pub mod model_resolver;
pub mod region;
pub mod video_metadata;
