use crate::core::data::resolution::{Resolution, ResolutionScale};
use crate::core::data::view_state::ViewState;
use crate::core::fractals::fractal_kinds::FractalKind;

/// Snapshot of everything one render job reads.
///
/// The view is copied in, so later edits to the session never reach a running job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub view: ViewState,
    pub fractal: FractalKind,
    pub resolution: ResolutionScale,
    pub max_iterations: u32,
}

impl RenderRequest {
    /// Size of the image actually computed, before upscaling to the window.
    #[must_use]
    pub fn render_resolution(&self) -> Resolution {
        self.view.window().scaled(self.resolution)
    }
}
