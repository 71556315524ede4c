pub mod preview_window;
