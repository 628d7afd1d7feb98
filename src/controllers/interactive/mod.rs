//! Interactive rendering for real-time fractal exploration.
//!
//! The [`Explorer`] owns the view and turns user input into render and
//! trajectory requests; the [`RenderScheduler`] runs one cancellable render
//! job at a time and hands finished frames to the presenter port.

pub mod data;
pub mod errors;
pub mod events;
mod explorer;
pub mod ports;
mod scheduler;

pub use data::frame_data::FrameData;
pub use data::render_request::RenderRequest;
pub use data::render_status::{RenderProgress, RenderState};
pub use errors::render_error::{RenderError, RenderSetupError};
pub use events::render_event::RenderEvent;
pub use explorer::{Explorer, RenderTrigger, ViewInfo};
pub use ports::presenter_port::InteractiveControllerPresenterPort;
pub use scheduler::{column_plan, RenderScheduler};
