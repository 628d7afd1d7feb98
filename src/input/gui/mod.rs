//! GUI input adapter for interactive fractal exploration.
//!
//! winit owns the window and event loop, pixels the framebuffer, and egui
//! the control panels drawn over it.

mod app;
pub mod commands;
pub mod events;
pub mod ports;
mod shortcuts;
mod ui_state;

pub use commands::run_gui::RunGuiCommand;
