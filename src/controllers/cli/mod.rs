pub mod render_command;

pub use render_command::{RenderCommand, RenderCommandError, RenderSettings};
