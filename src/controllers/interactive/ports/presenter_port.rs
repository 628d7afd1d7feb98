use crate::controllers::interactive::events::render_event::RenderEvent;

/// Receives finished frames and setup failures, called from the render thread.
pub trait InteractiveControllerPresenterPort: Send + Sync {
    fn present(&self, event: RenderEvent);
}
