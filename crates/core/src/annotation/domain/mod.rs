pub mod frame_annotator;
pub mod overlay;
pub mod overlay_builder;
