pub mod graph_canvas;
pub mod input_panel;
pub mod log_panel;
pub mod playback_controls;
