//! Reusable TUI widgets.

pub mod dropdown;
pub mod form;
pub mod status_bar;

pub use dropdown::{PanelRow, draw_panel};
pub use form::{
    ControlState, draw_checkbox, draw_error_line, draw_text_input, draw_trigger, edit_line,
};
pub use status_bar::{StatusBarContext, draw_status_bar};
